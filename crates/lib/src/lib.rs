//! rocksenv-lib: build RocksDB once and point cargo at the static archive
//!
//! The pipeline ensures a checkout of the bindings repository, runs the
//! nested cargo build (or reuses a cached archive), locates `librocksdb.a`
//! and produces the `ROCKSDB_LIB_DIR` / `ROCKSDB_STATIC` assignments that
//! make `librocksdb-sys` link it statically instead of compiling RocksDB
//! again.
//!
//! - [`source`]: checkout management
//! - [`build`]: the external build step and its cache policy
//! - [`locate`]: archive discovery with an explicit tie-break policy
//! - [`cache`]: the stable archive copy
//! - [`export`]: shell assignment rendering
//! - [`pipeline`]: the steps in order

pub mod build;
pub mod cache;
pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod locate;
pub mod pipeline;
pub mod platform;
pub mod source;
pub mod util;

pub use error::PrebuildError;
