//! Identifier and capability-token generation.
//!
//! Jobs are addressed by a short public id and guarded by a longer secret
//! token. Both are uniformly random alphanumeric strings generated
//! independently of each other, so the token is never derivable from the
//! id. Lengths are a configuration choice (see
//! [`JobSettings`](crate::settings::JobSettings)); the constants here are
//! the defaults.

use rand::Rng;

/// Default length of the public job identifier.
pub const JOB_ID_LENGTH: usize = 10;

/// Default length of the secret capability token.
pub const TOKEN_LENGTH: usize = 20;

/// Generate a random alphanumeric string of the given length.
pub fn generate(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
