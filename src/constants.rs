//! # Constants
//!
//! Shared constants used throughout the crate.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default bcrypt work factor for new digests
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts
pub const MIN_HASH_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_HASH_COST: u32 = 31;

/// Highest work factor a recorded digest may carry before it is treated as
/// malformed. Verification runs at the digest's cost, so an unbounded value
/// from state could stall a reconciliation pass.
pub const DEFAULT_MAX_VERIFY_COST: u32 = 16;

/// bcrypt only reads this many bytes of input.
/// Longer values are rejected instead of being silently truncated.
pub const MAX_SECRET_BYTES: usize = 72;

/// Suffix of the companion state attribute that carries a secret's digest
pub const HASH_KEY_SUFFIX: &str = "_hash";

/// Default log level when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";
