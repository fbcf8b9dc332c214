//! Object identifier (SHA-256 hash)
//!
//! Object IDs are 64-character lowercase hexadecimal strings. They uniquely
//! identify every object in the store (blobs, trees, commits).
//!
//! ## Format
//!
//! - Full: 64 hex characters
//! - Short: first 7 characters
//!
//! ## Storage
//!
//! Objects are stored in `.kit/objects/<first-2-chars>/<remaining-62-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::KitError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Length of the abbreviated form used in human-facing output
const SHORT_OID_LENGTH: usize = 7;

/// Object identifier (SHA-256 hash)
///
/// Always holds a validated, lowercase, 64-character hex string.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID
    ///
    /// Upper-case hex is accepted and normalised to lower case.
    pub fn try_parse(id: String) -> Result<Self, KitError> {
        let id = id.trim();
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KitError::InvalidObjectId(id.to_string()));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash a framed object buffer (`"<type> <len>\0<payload>"`)
    pub fn digest(framed: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(framed);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OID_LENGTH].to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = KitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
