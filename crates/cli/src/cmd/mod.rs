mod prebuild;

pub use prebuild::{PrebuildArgs, cmd_prebuild};
