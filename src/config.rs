//! PRU configuration parameters
//!
//! Factory values for the PRU static record plus the advertising policy.
//! Values can be overridden from persistent storage (see
//! [`ConfigPort`](crate::app::ports::ConfigPort)) or a JSON document.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core PRU configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruConfig {
    // --- Identity ---
    /// PRU numeric id
    pub id: u16,
    /// A4WP device category
    pub category: u8,
    /// Capability flags
    pub capabilities: u8,
    /// Hardware version; only the high byte goes on the wire
    pub hw_version: u16,
    /// Firmware revision
    pub fw_version: u8,

    // --- Power ---
    /// Max power desired, sent divided by 100
    pub max_power_desired: u16,
    /// Minimum rectifier voltage (mV)
    pub vrect_min: u16,
    /// Maximum rectifier voltage (mV)
    pub vrect_max: u16,
    /// Rectifier voltage set point (mV)
    pub vrect_set: u16,
    /// Delta R1
    pub delta_r1: u16,
    /// Rrx invalid count
    pub rrx_invalid: u16,
    /// Rectifier impedance transform
    pub rect_impedance_transform: u8,
    /// Rectifier efficiency
    pub rect_efficiency: u8,

    // --- Advertising ---
    /// Start advertising when the service starts
    pub advertise_on_start: bool,
    /// Restart advertising after the PTU disconnects
    pub advertise_on_disconnect: bool,
}

impl Default for PruConfig {
    fn default() -> Self {
        Self {
            // Identity
            id: 0xFFFF,
            category: 3,
            capabilities: 0x00,
            hw_version: 0x0700,
            fw_version: 0x05,

            // Power
            max_power_desired: 3650, // 36 on the wire
            vrect_min: 9000,
            vrect_max: 18000,
            vrect_set: 11000,
            delta_r1: 1,
            rrx_invalid: 0,
            rect_impedance_transform: 0,
            rect_efficiency: 0,

            // Advertising is left to the host by default.
            advertise_on_start: false,
            advertise_on_disconnect: false,
        }
    }
}

impl PruConfig {
    /// Largest `max_power_desired` that still fits the one-byte field.
    pub const MAX_POWER_DESIRED_LIMIT: u16 = 25_500;

    /// Range-check every field that feeds the PRU static record.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vrect_min > self.vrect_max {
            return Err(ConfigError::ValidationFailed("vrect_min above vrect_max"));
        }
        if self.vrect_set < self.vrect_min || self.vrect_set > self.vrect_max {
            return Err(ConfigError::ValidationFailed("vrect_set outside [vrect_min, vrect_max]"));
        }
        if self.max_power_desired > Self::MAX_POWER_DESIRED_LIMIT {
            return Err(ConfigError::ValidationFailed("max_power_desired exceeds 25500"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override.  Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
