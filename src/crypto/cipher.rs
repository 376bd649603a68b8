//! AES-256-GCM authenticated encryption.

use crate::config::pbkdf2_params::{IV_LENGTH, KEY_LENGTH, SALT_LENGTH, TAG_LENGTH};
use crate::crypto::kdf::KeyDerivation;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::RngCore;

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: [u8; KEY_LENGTH]) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        Self { cipher }
    }

    /// Encrypt data with a random IV.
    ///
    /// Returns: iv (12 bytes) || ciphertext || tag (16 bytes)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        let mut result = Vec::with_capacity(IV_LENGTH + ciphertext.len());
        result.extend_from_slice(&iv);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypt data that was encrypted with `encrypt`.
    ///
    /// Expects: iv (12 bytes) || ciphertext || tag (16 bytes)
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < IV_LENGTH + TAG_LENGTH {
            return Err(Error::Decryption);
        }

        let (iv, ciphertext) = ciphertext.split_at(IV_LENGTH);

        self.cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// Encrypted data with all information needed for decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// Salt for key derivation.
    pub salt: [u8; SALT_LENGTH],
    /// The encrypted payload (iv || ciphertext || tag).
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Get the total size of the encrypted data.
    pub fn size(&self) -> usize {
        self.salt.len() + self.ciphertext.len()
    }

    /// Flatten to `salt || iv || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Split `salt || iv || ciphertext || tag` back apart.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SALT_LENGTH + IV_LENGTH + TAG_LENGTH {
            return Err(Error::Decryption);
        }

        let (salt, ciphertext) = bytes.split_at(SALT_LENGTH);
        let mut salt_bytes = [0u8; SALT_LENGTH];
        salt_bytes.copy_from_slice(salt);

        Ok(Self {
            salt: salt_bytes,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Encrypt data with a password.
///
/// Uses PBKDF2-HMAC-SHA256 for key derivation and AES-256-GCM for
/// encryption. Salt and IV are fresh on every call.
pub fn encrypt_data(plaintext: &[u8], password: &str) -> Result<EncryptedData> {
    let kdf = KeyDerivation::new();
    let cipher = Cipher::new(kdf.derive_key(password));

    let ciphertext = cipher.encrypt(plaintext)?;

    Ok(EncryptedData {
        salt: *kdf.salt(),
        ciphertext,
    })
}

/// Decrypt data with a password.
pub fn decrypt_data(encrypted: &EncryptedData, password: &str) -> Result<Vec<u8>> {
    let kdf = KeyDerivation::from_salt(encrypted.salt);
    let cipher = Cipher::new(kdf.derive_key(password));

    cipher.decrypt(&encrypted.ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, World! This is a secret message.";
        let password = "secure_password_123";

        let encrypted = encrypt_data(plaintext, password).unwrap();
        let decrypted = decrypt_data(&encrypted, password).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = encrypt_data(b"Secret data", "correct_password").unwrap();

        let result = decrypt_data(&encrypted, "wrong_password");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_different_encryptions_different_ciphertext() {
        let encrypted1 = encrypt_data(b"Same message", "password").unwrap();
        let encrypted2 = encrypt_data(b"Same message", "password").unwrap();

        // Different salts and IVs should produce different ciphertext
        assert_ne!(encrypted1.ciphertext, encrypted2.ciphertext);
        assert_ne!(encrypted1.salt, encrypted2.salt);
    }

    #[test]
    fn test_layout_sizes() {
        let encrypted = encrypt_data(b"abc", "password").unwrap();

        assert_eq!(encrypted.ciphertext.len(), IV_LENGTH + 3 + TAG_LENGTH);
        assert_eq!(encrypted.size(), 16 + 12 + 3 + 16);

        let parsed = EncryptedData::from_bytes(&encrypted.to_bytes()).unwrap();
        assert_eq!(parsed, encrypted);
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt_data(b"", "password").unwrap();
        let decrypted = decrypt_data(&encrypted, "password").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut encrypted = encrypt_data(b"Secret data", "password").unwrap();
        encrypted.ciphertext[IV_LENGTH] ^= 0x01;

        assert!(matches!(
            decrypt_data(&encrypted, "password"),
            Err(Error::Decryption)
        ));
    }

    #[test]
    fn test_truncated_data_fails() {
        assert!(matches!(
            EncryptedData::from_bytes(&[0u8; 43]),
            Err(Error::Decryption)
        ));

        let cipher = Cipher::new([7u8; KEY_LENGTH]);
        assert!(matches!(cipher.decrypt(&[0u8; 27]), Err(Error::Decryption)));
    }
}
