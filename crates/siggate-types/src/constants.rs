//! Workspace-wide tunables and identity strings.

/// Engine name reported in logs.
pub const ENGINE_NAME: &str = "SigGate";

/// Workspace version, from the types crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default freshness window: a request timestamp may deviate from server
/// time by at most this many milliseconds in either direction.
pub const DEFAULT_MAX_SKEW_MS: i64 = 180_000;

/// Default retention for consumed nonces: 7 days in milliseconds. Nonces
/// older than this are unreplayable anyway (the freshness window rejects
/// their timestamp), so the guard may purge them.
pub const DEFAULT_NONCE_RETENTION_MS: i64 = 604_800_000;

/// Default maximum age of a TON proof timestamp, in seconds.
pub const DEFAULT_TON_PROOF_MAX_AGE_SECS: i64 = 86_400;

/// Minimum accepted nonce length, in characters.
pub const DEFAULT_MIN_NONCE_LEN: usize = 16;

/// Maximum accepted token symbol length, in characters.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Maximum accepted bridge provider name length, in characters.
pub const MAX_PROVIDER_LEN: usize = 64;
