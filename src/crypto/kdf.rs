//! PBKDF2 key derivation for password-based encryption.

use crate::config::pbkdf2_params;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// Key derivation using PBKDF2 with HMAC-SHA-256.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: [u8; pbkdf2_params::SALT_LENGTH],
    iterations: u32,
}

impl KeyDerivation {
    /// Create a new KDF with a random salt.
    pub fn new() -> Self {
        let mut salt = [0u8; pbkdf2_params::SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::from_salt(salt)
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: [u8; pbkdf2_params::SALT_LENGTH]) -> Self {
        Self {
            salt,
            iterations: pbkdf2_params::ITERATIONS,
        }
    }

    /// Override the iteration count. Envelopes written with a
    /// non-default count can only be opened with the same count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8; pbkdf2_params::SALT_LENGTH] {
        &self.salt
    }

    /// Iteration count used by `derive_key`.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a 256-bit key from a password.
    pub fn derive_key(&self, password: &str) -> [u8; pbkdf2_params::KEY_LENGTH] {
        let mut key = [0u8; pbkdf2_params::KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &self.salt, self.iterations, &mut key);
        key
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self::new()
    }
}
