use super::error::SaveError;
use super::ROSTER_VERSION;
use crate::models::Entrant;
use serde::{Deserialize, Serialize};

use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

/// Upper bound on persisted roster size. Far above operator-console
/// scale; a snapshot past this is treated as corrupted, not as data.
pub const MAX_ROSTER_ENTRANTS: usize = 10_000;

/// Persisted roster snapshot. Draw results are not part of the snapshot:
/// winners exist only for the lifetime of a session.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RosterSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    /// Registered entrants, in registration order
    pub entrants: Vec<Entrant>,

    /// Requested winner count at save time
    #[serde(default = "default_requested_winners")]
    pub requested_winners: u32,
}

fn default_requested_winners() -> u32 {
    1
}

impl Default for RosterSave {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterSave {
    pub fn new() -> Self {
        Self {
            version: ROSTER_VERSION,
            timestamp: current_timestamp(),
            entrants: Vec::new(),
            requested_winners: 1,
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.entrants.len() > MAX_ROSTER_ENTRANTS {
            return Err(SaveError::DataTooLarge { size: self.entrants.len() });
        }

        // Check for duplicate entrant IDs
        let mut entrant_ids = std::collections::HashSet::new();
        for entrant in &self.entrants {
            if !entrant_ids.insert(&entrant.id) {
                return Err(SaveError::Corrupted);
            }
        }

        Ok(())
    }
}

/// Serialize and compress a roster snapshot
pub fn serialize_and_compress(save: &RosterSave) -> Result<Vec<u8>, SaveError> {
    // Validate before serialization
    save.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a roster snapshot
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<RosterSave, SaveError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Deserialize
    let save: RosterSave = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    // Validate version
    if save.version > ROSTER_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: ROSTER_VERSION });
    }

    save.validate()?;

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}
