//! services/api/src/adapters/password.rs
//!
//! Argon2 implementation of the `PasswordHasher` port.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, SaltString},
    Argon2, PasswordVerifier,
};
use prompt_architect_core::ports::{PasswordHasher, PortError, PortResult};

/// Hashes and verifies passwords with Argon2 and a per-password random salt.
#[derive(Clone)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PortError::Unexpected(format!("Failed to hash password: {e}")))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        // An unparseable stored hash verifies as false rather than erroring;
        // the caller only ever learns accept/reject.
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
