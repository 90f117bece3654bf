//! PTU static parameter record (PTU → PRU, 20 bytes).
//!
//! ```text
//!  0        1     2      3      4    5   6     7    8    9       10     11-13  14     15-19
//! ┌────────┬─────┬──────┬──────┬────┬───┬─────┬────┬────┬───────┬──────┬──────┬──────┬─────┐
//! │validity│power│ Rsrc │ Rload│ id │ - │class│ hw │ fw │ maxdev│ rsv1 │  -   │ rsv2 │  -  │
//! └────────┴─────┴──────┴──────┴────┴───┴─────┴────┴────┴───────┴──────┴──────┴──────┴─────┘
//! ```
//!
//! Fields are kept raw; the derived accessors apply the A4WP scaling and
//! clamp to the protocol ceilings.

use log::debug;

use super::{PARAM_LEN, RecordKind, fixed};
use crate::error::Result;

const MAX_POWER_W: f32 = 22.0;
const MAX_SOURCE_IMPEDANCE_OHM: f32 = 375.0;
const MAX_LOAD_RESISTANCE_OHM: f32 = 55.0;
const MAX_DEVICES: u8 = 8;
const MAX_CLASS: u8 = 5;

/// Transmitter capability record.  Replaced wholesale on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtuStaticParam {
    validity: u8,
    power: u8,
    max_source_impedance: u8,
    max_load_resistance: u8,
    id: u16,
    class: u8,
    hw_rev: u8,
    fw_rev: u8,
    protocol_rev: u8,
    max_devices: u8,
    reserved1: u8,
    reserved2: u8,
}

impl PtuStaticParam {
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let b: &[u8; PARAM_LEN] = fixed(RecordKind::PtuStatic, raw)?;
        let param = Self {
            validity: b[0],
            power: b[1],
            max_source_impedance: b[2],
            max_load_resistance: b[3],
            // Single byte, zero-extended.
            id: u16::from(b[4]),
            class: b[6],
            hw_rev: b[7],
            fw_rev: b[8],
            // Not carried by this layout.
            protocol_rev: 0,
            max_devices: b[9],
            reserved1: b[10],
            reserved2: b[14],
        };
        debug!(
            "PTU static: validity=0x{:02x} power=0x{:02x} Rsrc=0x{:02x} Rload=0x{:02x}",
            param.validity, param.power, param.max_source_impedance, param.max_load_resistance
        );
        debug!(
            "PTU static: id=0x{:04x} class=0x{:02x} hw=0x{:02x} fw=0x{:02x} maxdev=0x{:02x}",
            param.id, param.class, param.hw_rev, param.fw_rev, param.max_devices
        );
        Ok(param)
    }

    /// Transmitter output power in watts, ≤ 22.0.
    pub fn power(&self) -> f32 {
        let raw = f32::from((self.power & 0xFC) >> 2);
        (0.5 * (raw + 1.0)).min(MAX_POWER_W)
    }

    /// Maximum source impedance in ohms, ≤ 375.0.
    pub fn max_source_impedance(&self) -> f32 {
        let raw = f32::from((self.max_source_impedance & 0xF8) >> 3);
        (50.0 + raw * 10.0).min(MAX_SOURCE_IMPEDANCE_OHM)
    }

    /// Maximum load resistance in ohms, ≤ 55.0.
    pub fn max_load_resistance(&self) -> f32 {
        let raw = f32::from((self.max_load_resistance & 0xF8) >> 3);
        (5.0 * (raw + 1.0)).min(MAX_LOAD_RESISTANCE_OHM)
    }

    /// Number of PRUs the transmitter can serve, ≤ 8.
    pub fn max_devices_supported(&self) -> u8 {
        self.max_devices.saturating_add(1).min(MAX_DEVICES)
    }

    /// PTU class 1..=5.
    pub fn ptu_class(&self) -> u8 {
        if self.class > 4 { MAX_CLASS } else { self.class + 1 }
    }

    pub fn validity(&self) -> u8 {
        self.validity
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn hw_rev(&self) -> u8 {
        self.hw_rev
    }

    pub fn fw_rev(&self) -> u8 {
        self.fw_rev
    }

    pub fn protocol_rev(&self) -> u8 {
        self.protocol_rev
    }

    pub fn reserved(&self) -> (u8, u8) {
        (self.reserved1, self.reserved2)
    }
}
