//! Fixed names and defaults.

pub const APP_NAME: &str = "rocksenv";

/// Upstream repository holding the RocksDB sources and their cargo bindings.
pub const DEFAULT_REPO_URL: &str = "https://github.com/rust-rocksdb/rust-rocksdb";

/// Directory name of the checkout under the cache directory.
pub const SOURCE_DIR_NAME: &str = "rust-rocksdb";

/// File name of the static archive produced by `librocksdb-sys`.
pub const DEFAULT_ARCHIVE_NAME: &str = "librocksdb.a";

/// Compression feature enabled in place of the crate defaults.
pub const DEFAULT_FEATURES: &[&str] = &["lz4"];

/// Directory of the build output tree, relative to the checkout.
pub const TARGET_DIR_NAME: &str = "target";

/// Exported: directory containing the static archive.
pub const LIB_DIR_VAR: &str = "ROCKSDB_LIB_DIR";

/// Exported: request static linking.
pub const STATIC_VAR: &str = "ROCKSDB_STATIC";
