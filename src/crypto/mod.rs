//! Cryptographic operations for hidden payloads.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation
//! - AES-256-GCM authenticated encryption
//! - The JSON envelope that carries salt, IV and ciphertext

mod cipher;
mod envelope;
mod kdf;

pub use cipher::{decrypt_data, encrypt_data, Cipher, EncryptedData};
pub use envelope::{effective_password, open_payload, seal_payload, Envelope};
pub use kdf::KeyDerivation;
