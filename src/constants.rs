/// Smallest base a share value may be encoded in.
pub const MIN_BASE: u32 = 2;

/// Largest base a share value may be encoded in (`0-9` then `a-z`).
pub const MAX_BASE: u32 = 36;

/// Default upper bound on the number of shares accepted for one
/// reconstruction. Subset enumeration grows as C(n, k).
pub const DEFAULT_MAX_SHARES: usize = 20;

/// Default directory holding `conf.toml`.
pub const DEFAULT_CONFIG_DIR: &str = ".shard";

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "conf.toml";

/// Prefix for environment variable overrides, e.g. `SHARD_MAX_SHARES=12`.
pub const ENV_PREFIX: &str = "SHARD";

/// Default exclusive upper bound for random polynomial coefficients dealt by
/// [`crate::dealer`].
pub const DEFAULT_COEFFICIENT_BOUND: u64 = 1_000;
