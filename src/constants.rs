/// Minimum accepted password length at registration
/// Passwords of 8 characters or fewer are rejected
pub const MIN_PASSWORD_LENGTH: usize = 9;

/// Default lifetime of an issued bearer token (7 days)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 604_800;

/// Default bcrypt work factor for stored passwords
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Default size of the database connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Maximum number of per-routine activity lookups in flight while decorating a list
pub const DECORATE_CONCURRENCY: usize = 8;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a password below the minimum length
pub const ERR_PASSWORD_TOO_SHORT: &str = "Password Too Short!";

/// Error message for a blank username
pub const ERR_USERNAME_REQUIRED: &str = "Username is required";

/// Error message for a blank routine or activity name
pub const ERR_NAME_REQUIRED: &str = "Name must not be empty";

/// Error message for negative count or duration on a routine activity
pub const ERR_NEGATIVE_AMOUNT: &str = "Count and duration must not be negative";
