//! # Record Persistence Format
//!
//! Binary serialization for stored employee records.
//!
//! Format: Header (5 bytes) + postcard-serialized `EmployeeRecord`.
//! - 4 bytes: Magic ("ONBD")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is deserialized, so a
//! corrupted row fails fast instead of allocating.

use crate::{EmployeeRecord, OnboardError, primitives};

/// Maximum accepted size of one encoded record.
///
/// Names, emails and hashes are bounded well below this.
pub const MAX_RECORD_SIZE: usize = 64 * 1024;

/// Header length in bytes.
const HEADER_SIZE: usize = 5;

// =============================================================================
// RECORD HEADER
// =============================================================================

/// The header that precedes every encoded record.
#[derive(Debug, Clone, Copy)]
pub struct RecordHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl RecordHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), OnboardError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(OnboardError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(OnboardError::DeserializationError(format!(
                "Unsupported record version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OnboardError> {
        if bytes.len() < HEADER_SIZE {
            return Err(OnboardError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a record to bytes (header + payload).
pub fn record_to_bytes(record: &EmployeeRecord) -> Result<Vec<u8>, OnboardError> {
    let payload = postcard::to_stdvec(record)
        .map_err(|e| OnboardError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&RecordHeader::new().to_bytes());
    result.extend_from_slice(&payload);

    if result.len() > MAX_RECORD_SIZE {
        return Err(OnboardError::SerializationError(format!(
            "Encoded record is {} bytes, maximum is {}",
            result.len(),
            MAX_RECORD_SIZE
        )));
    }
    Ok(result)
}

/// Deserialize a record from bytes.
pub fn record_from_bytes(bytes: &[u8]) -> Result<EmployeeRecord, OnboardError> {
    if bytes.len() > MAX_RECORD_SIZE {
        return Err(OnboardError::DeserializationError(format!(
            "Record size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_RECORD_SIZE
        )));
    }

    let header = RecordHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
        OnboardError::DeserializationError(format!("Failed to decode record: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProgressEngine, Role};

    #[test]
    fn stored_record_decodes_identically() {
        let mut record =
            EmployeeRecord::new("Dana", "dana@example.com", "$argon2id$stub", Role::Admin);
        ProgressEngine::default().complete_step(&mut record, 3);
        record.version = 7;

        let bytes = record_to_bytes(&record).expect("encode");
        assert_eq!(&bytes[0..4], b"ONBD");

        let restored = record_from_bytes(&bytes).expect("decode");
        assert_eq!(restored, record);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0u8; 10];
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(record_from_bytes(&bytes).is_err());
    }

    #[test]
    fn future_version_rejected() {
        let record = EmployeeRecord::new("Eve", "eve@example.com", "$stub", Role::Employee);
        let mut bytes = record_to_bytes(&record).expect("encode");
        bytes[4] = primitives::FORMAT_VERSION + 1;
        assert!(matches!(
            record_from_bytes(&bytes),
            Err(OnboardError::DeserializationError(_))
        ));
    }

    #[test]
    fn truncated_input_rejected() {
        assert!(record_from_bytes(b"ON").is_err());
    }
}
