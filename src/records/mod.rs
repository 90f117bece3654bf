//! Fixed-layout A4WP records.
//!
//! Every record is a little-endian byte layout of known length:
//!
//! ```text
//! ┌────────────────┬────────┬───────────┬─────────────┐
//! │ Record         │ Length │ Direction │ Stored?     │
//! ├────────────────┼────────┼───────────┼─────────────┤
//! │ PRU control    │ 4 B    │ PTU → PRU │ no          │
//! │ PTU static     │ 20 B   │ PTU → PRU │ replaced    │
//! │ PRU alert      │ 1 B    │ PRU → PTU │ yes         │
//! │ PRU static     │ 20 B   │ PRU → PTU │ yes         │
//! │ PRU dynamic    │ 20 B   │ PRU → PTU │ opaque blob │
//! └────────────────┴────────┴───────────┴─────────────┘
//! ```
//!
//! Decoders reject a wrong length up front and never partially decode.

use core::fmt;

use crate::error::{Error, Result};

pub mod pru_alert;
pub mod pru_control;
pub mod pru_dynamic;
pub mod pru_static;
pub mod ptu_static;

pub use pru_alert::PruAlert;
pub use pru_control::{PermissionCode, PowerLevel, PruControl};
pub use pru_dynamic::PruDynamicParam;
pub use pru_static::PruStaticParam;
pub use ptu_static::PtuStaticParam;

/// Length of the PRU control record.
pub const PRU_CONTROL_LEN: usize = 4;
/// Length of the PTU static, PRU static and PRU dynamic records.
pub const PARAM_LEN: usize = 20;
/// Length of the PRU alert record.
pub const PRU_ALERT_LEN: usize = 1;

/// Identifies a record layout for length checks and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    PruControl,
    PtuStatic,
    PruAlert,
    PruStatic,
    PruDynamic,
}

impl RecordKind {
    /// Wire length of the record in bytes.
    pub const fn wire_len(self) -> usize {
        match self {
            Self::PruControl => PRU_CONTROL_LEN,
            Self::PruAlert => PRU_ALERT_LEN,
            Self::PtuStatic | Self::PruStatic | Self::PruDynamic => PARAM_LEN,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PruControl => write!(f, "PRU control"),
            Self::PtuStatic => write!(f, "PTU static"),
            Self::PruAlert => write!(f, "PRU alert"),
            Self::PruStatic => write!(f, "PRU static"),
            Self::PruDynamic => write!(f, "PRU dynamic"),
        }
    }
}

/// Borrow `raw` as a fixed-size array, or fail with `MalformedRecord`.
pub(crate) fn fixed<const N: usize>(record: RecordKind, raw: &[u8]) -> Result<&[u8; N]> {
    raw.try_into().map_err(|_| Error::malformed(record, raw.len()))
}
