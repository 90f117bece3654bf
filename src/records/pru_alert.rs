//! PRU alert record (PRU → PTU, 1 byte).

use super::{PRU_ALERT_LEN, RecordKind, fixed};
use crate::error::Result;

/// Outgoing alert byte.  Bit meanings live in [`crate::control::alert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruAlert(u8);

impl PruAlert {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn encode(self) -> [u8; PRU_ALERT_LEN] {
        [self.0]
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        let b: &[u8; PRU_ALERT_LEN] = fixed(RecordKind::PruAlert, raw)?;
        Ok(Self(b[0]))
    }
}
