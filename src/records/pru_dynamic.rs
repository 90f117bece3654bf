//! PRU dynamic parameter (PRU → PTU, 20 bytes, opaque).
//!
//! The charger produces these bytes; the service only stores and relays
//! them.  Nothing is available until the first push.

use super::{PARAM_LEN, RecordKind, fixed};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruDynamicParam {
    value: Option<[u8; PARAM_LEN]>,
}

impl PruDynamicParam {
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Replace the stored telemetry.
    pub fn set(&mut self, value: [u8; PARAM_LEN]) {
        self.value = Some(value);
    }

    /// Replace the stored telemetry from a charger-supplied slice.
    pub fn set_from_slice(&mut self, raw: &[u8]) -> Result<()> {
        let b: &[u8; PARAM_LEN] = fixed(RecordKind::PruDynamic, raw)?;
        self.value = Some(*b);
        Ok(())
    }

    /// Latest telemetry, or `None` before the first push.
    pub fn get(&self) -> Option<[u8; PARAM_LEN]> {
        self.value
    }
}
