use md5::{Digest, Md5};
use uuid::Uuid;

use crate::app::{MigrateError, Result};

/// Derive the deterministic identifier for a canonical reference.
///
/// The reference is hashed with MD5 and rendered as lowercase hex. The first
/// sixteen *characters* of that hex string (not the raw digest bytes) become
/// the sixteen bytes of a UUID. Identifiers already stored in dedup caches
/// depend on this exact construction.
pub fn derive_identifier(reference: &str) -> Result<String> {
    let digest = hex::encode(Md5::digest(reference.as_bytes()));
    let uuid = Uuid::from_slice(&digest.as_bytes()[..16])
        .map_err(|e| MigrateError::Identity(e.to_string()))?;
    Ok(uuid.to_string())
}
