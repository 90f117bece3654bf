//! Unified error types for the PRU signaling core.
//!
//! Every failure is scoped to a single record exchange: a malformed write,
//! a read that has nothing to return yet, or a UUID this service does not
//! own.  Variants are `Copy` so they pass through the dispatch path and the
//! GATT bridge without allocation.

use core::fmt;

use crate::records::RecordKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A record was written with the wrong length.  Nothing was decoded.
    MalformedRecord {
        record: RecordKind,
        expected: usize,
        actual: usize,
    },
    /// PRU dynamic telemetry was read before the charger pushed any.
    DataNotReady,
    /// The UUID does not map to a characteristic with the requested access.
    UnknownCharacteristic(u128),
}

impl Error {
    pub(crate) const fn malformed(record: RecordKind, actual: usize) -> Self {
        Self::MalformedRecord {
            record,
            expected: record.wire_len(),
            actual,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord {
                record,
                expected,
                actual,
            } => write!(f, "malformed {record}: expected {expected} bytes, got {actual}"),
            Self::DataNotReady => write!(f, "PRU dynamic parameter not yet available"),
            Self::UnknownCharacteristic(uuid) => {
                write!(f, "unknown characteristic {}", crate::dispatch::UuidDisplay(*uuid))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
