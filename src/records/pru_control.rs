//! PRU control record (PTU → PRU, 4 bytes).
//!
//! ```text
//!  byte 0 (enable)                    1            2           3
//! ┌────┬────┬─────────┬──────────┐  ┌──────────┐ ┌─────────┐ ┌──────────┐
//! │ 7  │ 6  │  5..4   │  3..0    │  │permission│ │time set │ │ reserved │
//! │out │chg │ reduce  │   -      │  │          │ │ x10 ms  │ │          │
//! └────┴────┴─────────┴──────────┘  └──────────┘ └─────────┘ └──────────┘
//! ```

use core::fmt;

use log::debug;

use super::{PRU_CONTROL_LEN, RecordKind, fixed};
use crate::error::Result;

const ENABLE_OUTPUT_BIT: u8 = 0x80;
const ENABLE_CHARGER_BIT: u8 = 0x40;
const REDUCE_POWER_MASK: u8 = 0x30;
const PERMISSION_DENIED_BIT: u8 = 0x80;

/// Output power level requested of the charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevel {
    Maximum,
    Medium,
    Minimum,
}

/// Permission reason codes defined by the protocol.  Only bit 7 drives
/// the grant/deny decision; the codes are kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionCode {
    Permitted,
    PermittedWithWait,
    DeniedSystemError,
    DeniedLimitedPower,
    DeniedLimitedDevices,
    DeniedLimitedClass,
    Other(u8),
}

impl From<u8> for PermissionCode {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => Self::Permitted,
            0x01 => Self::PermittedWithWait,
            0x80 => Self::DeniedSystemError,
            0x81 => Self::DeniedLimitedPower,
            0x82 => Self::DeniedLimitedDevices,
            0x83 => Self::DeniedLimitedClass,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permitted => write!(f, "permitted"),
            Self::PermittedWithWait => write!(f, "permitted with waiting time"),
            Self::DeniedSystemError => write!(f, "denied: system error"),
            Self::DeniedLimitedPower => write!(f, "denied: limited affordable power"),
            Self::DeniedLimitedDevices => write!(f, "denied: limited PTU number of devices"),
            Self::DeniedLimitedClass => write!(f, "denied: limited PTU class support"),
            Self::Other(raw) => write!(f, "reserved code 0x{raw:02x}"),
        }
    }
}

/// Decoded control command.  Not stored; drives one round of decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruControl {
    enable: u8,
    permission: u8,
    time_set: u8,
    reserved: u8,
}

impl PruControl {
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let b: &[u8; PRU_CONTROL_LEN] = fixed(RecordKind::PruControl, raw)?;
        let control = Self {
            enable: b[0],
            permission: b[1],
            time_set: b[2],
            reserved: b[3],
        };
        debug!(
            "PRU control: enable=0x{:02x} permission=0x{:02x} time_set=0x{:02x} reserved=0x{:02x}",
            control.enable, control.permission, control.time_set, control.reserved
        );
        Ok(control)
    }

    pub fn output_enabled(&self) -> bool {
        self.enable & ENABLE_OUTPUT_BIT == ENABLE_OUTPUT_BIT
    }

    pub fn charger_enabled(&self) -> bool {
        self.enable & ENABLE_CHARGER_BIT == ENABLE_CHARGER_BIT
    }

    /// Power reduction code (bits 5..4).
    pub fn reduce_power_code(&self) -> u8 {
        (self.enable & REDUCE_POWER_MASK) >> 4
    }

    /// Resolved power level.
    ///
    /// Code 0 selects maximum power; every other code resolves to minimum.
    /// Codes 1 and 3 never reach `Medium`: deployed PTUs rely on that.
    pub fn power_level(&self) -> PowerLevel {
        match self.reduce_power_code() {
            0 => PowerLevel::Maximum,
            _ => PowerLevel::Minimum,
        }
    }

    /// `true` unless bit 7 of the permission byte is set.
    pub fn permission(&self) -> bool {
        self.permission & PERMISSION_DENIED_BIT == 0
    }

    pub fn permission_code(&self) -> PermissionCode {
        PermissionCode::from(self.permission)
    }

    /// Time set in milliseconds.
    pub fn time_set_ms(&self) -> u16 {
        u16::from(self.time_set) * 10
    }

    pub fn reserved(&self) -> u8 {
        self.reserved
    }
}
