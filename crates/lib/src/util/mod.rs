//! Shared utilities.
//!
//! External process execution plus test helpers.

pub mod process;
