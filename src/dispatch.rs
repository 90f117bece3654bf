//! Characteristic dispatch.
//!
//! Maps a GATT characteristic UUID to the record it carries and routes
//! writes to the matching decoder and reads to the matching encoder.
//!
//! | Characteristic | UUID                                   | Write  | Read        |
//! |----------------|----------------------------------------|--------|-------------|
//! | PRU control    | `6455e670-a146-11e2-9e96-0800200c9a67` | decode | `00`        |
//! | PTU static     | `6455e670-a146-11e2-9e96-0800200c9a68` | decode | `00`        |
//! | PRU alert      | `6455e670-a146-11e2-9e96-0800200c9a69` | ignore | alert byte  |
//! | PRU static     | `6455e670-a146-11e2-9e96-0800200c9a70` | ignore | 20 bytes    |
//! | PRU dynamic    | `6455e670-a146-11e2-9e96-0800200c9a71` | ignore | 20 bytes    |

use core::fmt;

use heapless::Vec;

use crate::app::state::PruState;
use crate::error::{Error, Result};
use crate::records::{PARAM_LEN, PruControl, PtuStaticParam};

// ───────────────────────────────────────────────────────────────
// UUIDs
// ───────────────────────────────────────────────────────────────

pub const SERVICE_UUID: u128 = 0x6455e670_a146_11e2_9e96_0800200cfffe;
pub const CHAR_PRU_CONTROL: u128 = 0x6455e670_a146_11e2_9e96_0800200c9a67;
pub const CHAR_PTU_STATIC: u128 = 0x6455e670_a146_11e2_9e96_0800200c9a68;
pub const CHAR_PRU_ALERT: u128 = 0x6455e670_a146_11e2_9e96_0800200c9a69;
pub const CHAR_PRU_STATIC: u128 = 0x6455e670_a146_11e2_9e96_0800200c9a70;
pub const CHAR_PRU_DYNAMIC: u128 = 0x6455e670_a146_11e2_9e96_0800200c9a71;

/// Renders a `u128` UUID in canonical 8-4-4-4-12 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UuidDisplay(pub u128);

impl fmt::Display for UuidDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            (v & 0xFFFF_FFFF_FFFF) as u64
        )
    }
}

// ───────────────────────────────────────────────────────────────
// Characteristic identity
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicId {
    PruControl,
    PtuStatic,
    PruAlert,
    PruStatic,
    PruDynamic,
}

impl CharacteristicId {
    pub const ALL: [Self; 5] = [
        Self::PruControl,
        Self::PtuStatic,
        Self::PruAlert,
        Self::PruStatic,
        Self::PruDynamic,
    ];

    pub const fn from_uuid(uuid: u128) -> Option<Self> {
        match uuid {
            CHAR_PRU_CONTROL => Some(Self::PruControl),
            CHAR_PTU_STATIC => Some(Self::PtuStatic),
            CHAR_PRU_ALERT => Some(Self::PruAlert),
            CHAR_PRU_STATIC => Some(Self::PruStatic),
            CHAR_PRU_DYNAMIC => Some(Self::PruDynamic),
            _ => None,
        }
    }

    pub const fn uuid(self) -> u128 {
        match self {
            Self::PruControl => CHAR_PRU_CONTROL,
            Self::PtuStatic => CHAR_PTU_STATIC,
            Self::PruAlert => CHAR_PRU_ALERT,
            Self::PruStatic => CHAR_PRU_STATIC,
            Self::PruDynamic => CHAR_PRU_DYNAMIC,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Routing
// ───────────────────────────────────────────────────────────────

/// A decoded peer write, ready for the interpreter or the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundRecord {
    Control(PruControl),
    PtuStatic(PtuStaticParam),
}

/// Answer to a read of a PTU-written characteristic.
pub const UNSTORED_READ_VALUE: u8 = 0x00;

/// Payload of a read response.  Sized for the largest record.
pub type ReadPayload = Vec<u8, PARAM_LEN>;

pub struct CharacteristicDispatch;

impl CharacteristicDispatch {
    /// Decode a write addressed to `uuid`.
    ///
    /// Only the two PTU-writable characteristics route anywhere; every
    /// other UUID yields `UnknownCharacteristic`, which callers ignore.
    pub fn route_write(uuid: u128, value: &[u8]) -> Result<InboundRecord> {
        match CharacteristicId::from_uuid(uuid) {
            Some(CharacteristicId::PruControl) => {
                PruControl::decode(value).map(InboundRecord::Control)
            }
            Some(CharacteristicId::PtuStatic) => {
                PtuStaticParam::decode(value).map(InboundRecord::PtuStatic)
            }
            Some(
                CharacteristicId::PruAlert
                | CharacteristicId::PruStatic
                | CharacteristicId::PruDynamic,
            )
            | None => Err(Error::UnknownCharacteristic(uuid)),
        }
    }

    /// Encode the record a read of `uuid` returns.
    ///
    /// Only UUIDs outside the service produce no response.
    pub fn route_read(uuid: u128, state: &PruState) -> Result<ReadPayload> {
        match CharacteristicId::from_uuid(uuid) {
            Some(CharacteristicId::PruAlert) => Ok(payload(&state.alert.encode())),
            Some(CharacteristicId::PruStatic) => Ok(payload(&state.pru_static.encode())),
            Some(CharacteristicId::PruDynamic) => {
                let value = state.dynamic.get().ok_or(Error::DataNotReady)?;
                Ok(payload(&value))
            }
            // Registered readable but never stored: a single zero byte.
            Some(CharacteristicId::PruControl | CharacteristicId::PtuStatic) => {
                Ok(payload(&[UNSTORED_READ_VALUE]))
            }
            None => Err(Error::UnknownCharacteristic(uuid)),
        }
    }
}

fn payload(bytes: &[u8]) -> ReadPayload {
    bytes.iter().copied().take(PARAM_LEN).collect()
}
