//! # Record Persistence Format
//!
//! Binary encoding of a `SubmissionRecord` as stored by a sheet backend.
//! This is a pure transformation; storage I/O lives in `storage`.
//!
//! Format: Header (5 bytes) + postcard-serialized record.
//! - 4 bytes: Magic ("SATY")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded.

use crate::{SaatyError, SubmissionRecord, primitives};

/// Maximum allowed encoded record size (1 MB).
///
/// A record holds at most `CRITERIA_CEILING` labels of `MAX_LABEL_LENGTH`
/// bytes plus two short fields; anything near this limit is corrupt.
pub const MAX_RECORD_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Header length in bytes.
const HEADER_SIZE: usize = 5;

// =============================================================================
// HEADER
// =============================================================================

/// The persistence header precedes every stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl PersistenceHeader {
    /// Create a new header with current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), SaatyError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(SaatyError::Serialization("Invalid magic bytes".to_string()));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(SaatyError::Serialization(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaatyError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SaatyError::Serialization("Header too short".to_string()));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for PersistenceHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Encode a record (header + payload).
pub fn record_to_bytes(record: &SubmissionRecord) -> Result<Vec<u8>, SaatyError> {
    let payload =
        postcard::to_stdvec(record).map_err(|e| SaatyError::Serialization(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&PersistenceHeader::new().to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Decode a record.
///
/// Validates minimum size, maximum size and header before touching the
/// payload.
pub fn record_from_bytes(bytes: &[u8]) -> Result<SubmissionRecord, SaatyError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SaatyError::Serialization(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_RECORD_PAYLOAD_SIZE {
        return Err(SaatyError::Serialization(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_RECORD_PAYLOAD_SIZE
        )));
    }

    let header = PersistenceHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
        SaatyError::Serialization(format!("Failed to deserialize record: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordEntry;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            respondent: "ana".into(),
            phenomenon: "Água".into(),
            entries: vec![
                RecordEntry {
                    criterion: "Cost".into(),
                    percent: 45.45454545454545,
                },
                RecordEntry {
                    criterion: "Time".into(),
                    percent: 54.54545454545455,
                },
            ],
        }
    }

    #[test]
    fn header_roundtrip() {
        let bytes = PersistenceHeader::new().to_bytes();
        let restored = PersistenceHeader::from_bytes(&bytes).expect("parse header");
        assert_eq!(restored, PersistenceHeader::new());
    }

    #[test]
    fn encoded_record_decodes_identically() {
        let bytes = record_to_bytes(&record()).expect("encode");
        assert_eq!(&bytes[0..4], b"SATY");
        let restored = record_from_bytes(&bytes).expect("decode");
        assert_eq!(restored, record());
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = record_to_bytes(&record()).expect("encode");
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(matches!(
            record_from_bytes(&bytes),
            Err(SaatyError::Serialization(_))
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = record_to_bytes(&record()).expect("encode");
        bytes[4] = primitives::FORMAT_VERSION + 1;
        assert!(record_from_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_input_rejected() {
        assert!(record_from_bytes(b"SAT").is_err());
        let bytes = record_to_bytes(&record()).expect("encode");
        assert!(record_from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
