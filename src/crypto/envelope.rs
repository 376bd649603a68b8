//! Self-describing JSON wrapper around a (possibly) encrypted payload.
//!
//! Wire shapes:
//!
//! ```text
//! {"encrypted":false,"message":"<payload as Latin-1 text>"}
//! {"encrypted":true,"data":"<base64(salt || iv || ciphertext || tag)>"}
//! ```

use crate::crypto::cipher::{decrypt_data, encrypt_data, EncryptedData};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct EnvelopeJson {
    encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

/// A payload either passed through in the clear or sealed with a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// No password: the payload is carried as-is, with no confidentiality.
    Plain { message: Vec<u8> },
    /// Password-sealed payload.
    Sealed { data: EncryptedData },
}

/// Treat empty and all-whitespace passwords as absent.
pub fn effective_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.trim().is_empty())
}

impl Envelope {
    /// Wrap a payload, encrypting it when a usable password is given.
    pub fn seal(plaintext: &[u8], password: Option<&str>) -> Result<Self> {
        match effective_password(password) {
            None => Ok(Envelope::Plain {
                message: plaintext.to_vec(),
            }),
            Some(password) => Ok(Envelope::Sealed {
                data: encrypt_data(plaintext, password)?,
            }),
        }
    }

    /// Recover the payload.
    ///
    /// A plain envelope opens regardless of the password. A sealed one
    /// without a password, or with the wrong one, fails with
    /// [`Error::Decryption`].
    pub fn open(&self, password: Option<&str>) -> Result<Vec<u8>> {
        match self {
            Envelope::Plain { message } => Ok(message.clone()),
            Envelope::Sealed { data } => {
                let password = effective_password(password).ok_or(Error::Decryption)?;
                decrypt_data(data, password)
            }
        }
    }

    /// Whether the payload is password-protected.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Envelope::Sealed { .. })
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        let repr = match self {
            Envelope::Plain { message } => EnvelopeJson {
                encrypted: false,
                message: Some(message.iter().map(|&b| char::from(b)).collect()),
                data: None,
            },
            Envelope::Sealed { data } => EnvelopeJson {
                encrypted: true,
                message: None,
                data: Some(STANDARD.encode(data.to_bytes())),
            },
        };
        Ok(serde_json::to_string(&repr)?)
    }

    /// Serialize to JSON bytes, ready for embedding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_json().map(String::into_bytes)
    }

    /// Parse the JSON wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let repr: EnvelopeJson =
            serde_json::from_slice(bytes).map_err(|e| Error::MalformedEnvelope(e.to_string()))?;

        if !repr.encrypted {
            let message = repr
                .message
                .ok_or_else(|| Error::MalformedEnvelope("missing \"message\"".to_string()))?;
            let message = message
                .chars()
                .map(|c| {
                    u8::try_from(c).map_err(|_| {
                        Error::MalformedEnvelope(format!("non-Latin-1 character {:?}", c))
                    })
                })
                .collect::<Result<Vec<u8>>>()?;
            return Ok(Envelope::Plain { message });
        }

        let data = repr
            .data
            .ok_or_else(|| Error::MalformedEnvelope("missing \"data\"".to_string()))?;
        let raw = STANDARD
            .decode(data.as_bytes())
            .map_err(|e| Error::MalformedEnvelope(e.to_string()))?;
        let data = EncryptedData::from_bytes(&raw)
            .map_err(|_| Error::MalformedEnvelope(format!("{} bytes is too short", raw.len())))?;

        Ok(Envelope::Sealed { data })
    }
}

/// Seal a payload and serialize the envelope in one step.
pub fn seal_payload(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    Envelope::seal(plaintext, Some(password))?.to_bytes()
}

/// Parse and open an embedded envelope.
///
/// Every failure, including a malformed envelope, is reported as
/// [`Error::Decryption`] so callers cannot tell the causes apart.
pub fn open_payload(bytes: &[u8], password: &str) -> Result<Vec<u8>> {
    Envelope::from_bytes(bytes)
        .and_then(|envelope| envelope.open(Some(password)))
        .map_err(|e| {
            log::debug!("envelope rejected: {}", e);
            Error::Decryption
        })
}
