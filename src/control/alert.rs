//! Charger alert → PRU alert byte.
//!
//! Each alert kind owns exactly one bit of the outgoing byte.  A mapping
//! never accumulates: two alerts in a row leave only the second bit set.

use core::fmt;

use crate::records::PruAlert;

pub const OVER_VOLTAGE_BIT: u8 = 0x80;
pub const OVER_CURRENT_BIT: u8 = 0x40;
pub const OVER_TEMPERATURE_BIT: u8 = 0x20;
pub const SELF_PROTECTION_BIT: u8 = 0x10;
pub const CHARGE_COMPLETE_BIT: u8 = 0x08;
pub const WIRED_CHARGER_DETECTED_BIT: u8 = 0x04;
pub const CHARGE_PORT_BIT: u8 = 0x02;

/// Alert conditions reported by the charger driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    OverVoltage,
    OverCurrent,
    OverTemperature,
    SelfProtection,
    ChargeComplete,
    WiredChargerDetected,
    ChargePort,
}

impl AlertKind {
    pub const ALL: [Self; 7] = [
        Self::OverVoltage,
        Self::OverCurrent,
        Self::OverTemperature,
        Self::SelfProtection,
        Self::ChargeComplete,
        Self::WiredChargerDetected,
        Self::ChargePort,
    ];
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverVoltage => write!(f, "over voltage"),
            Self::OverCurrent => write!(f, "over current"),
            Self::OverTemperature => write!(f, "over temperature"),
            Self::SelfProtection => write!(f, "PRU self protection"),
            Self::ChargeComplete => write!(f, "charge complete"),
            Self::WiredChargerDetected => write!(f, "wired charger detected"),
            Self::ChargePort => write!(f, "charge port"),
        }
    }
}

pub struct AlertMapper;

impl AlertMapper {
    /// The single-bit alert record for `kind`.
    pub const fn map(kind: AlertKind) -> PruAlert {
        let bit = match kind {
            AlertKind::OverVoltage => OVER_VOLTAGE_BIT,
            AlertKind::OverCurrent => OVER_CURRENT_BIT,
            AlertKind::OverTemperature => OVER_TEMPERATURE_BIT,
            AlertKind::SelfProtection => SELF_PROTECTION_BIT,
            AlertKind::ChargeComplete => CHARGE_COMPLETE_BIT,
            AlertKind::WiredChargerDetected => WIRED_CHARGER_DETECTED_BIT,
            AlertKind::ChargePort => CHARGE_PORT_BIT,
        };
        PruAlert::new(bit)
    }
}
