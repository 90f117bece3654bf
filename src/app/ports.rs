//! Port traits: the hexagonal boundary between the PRU core and the outside world.
//!
//! ```text
//!   Transport ──▶ TransportCallbacks ─┐
//!                                      ├──▶ PruService (domain) ──▶ ChargerPort
//!   Charger   ──▶ ChargerCallbacks ───┘                          ──▶ AdvertisingPort
//!                                                                ──▶ EventSink
//! ```
//!
//! Driven adapters (charger driver, advertiser, event sinks, storage)
//! implement the outbound traits.  The inbound callback traits are what
//! the host's transport and charger threads call into; they take `&self`
//! because both threads deliver events independently.

use heapless::Vec;

use crate::app::events::AppEvent;
use crate::app::state::ConnectionState;
use crate::config::PruConfig;
use crate::control::alert::AlertKind;
use crate::records::PowerLevel;

/// Largest attribute value a GATT response can carry.
pub const MAX_ATTR_LEN: usize = 512;

// ───────────────────────────────────────────────────────────────
// Charger port (driven adapter: domain → charging hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the charger.
pub trait ChargerPort {
    fn start_charging(&mut self);

    fn stop_charging(&mut self);

    fn set_power_level(&mut self, level: PowerLevel);

    /// Enable or disable alert callbacks from the charger.
    fn enable_alert_notification(&mut self, enable: bool);

    /// Enable or disable telemetry (dynamic parameter) callbacks.
    fn enable_data_notification(&mut self, enable: bool);
}

// ───────────────────────────────────────────────────────────────
// Advertising port (driven adapter: domain → BLE advertiser)
// ───────────────────────────────────────────────────────────────

pub trait AdvertisingPort {
    /// Advertise limited-connectable with `service_data` as the only payload.
    fn start_advertising(&mut self, service_data: &[u8]);

    fn stop_advertising(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists PRU configuration.
///
/// Implementations MUST call [`PruConfig::validate`] before persisting.
pub trait ConfigPort {
    /// Load configuration from persistent storage.  An empty store yields
    /// the factory defaults.
    fn load(&self) -> Result<PruConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &PruConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Inbound callbacks (transport / charger → domain)
// ───────────────────────────────────────────────────────────────

/// Response the transport sends back to the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GattResponse {
    /// ATT status, 0 on success.
    pub status: u8,
    pub offset: u16,
    pub value: Vec<u8, MAX_ATTR_LEN>,
}

/// Events delivered by the GATT transport, one at a time.
pub trait TransportCallbacks {
    fn on_connection_state_changed(&self, state: ConnectionState);

    /// Returns the response to send, or `None` when the peer did not ask
    /// for one.
    fn on_characteristic_write(
        &self,
        uuid: u128,
        offset: u16,
        value: &[u8],
        response_needed: bool,
    ) -> Option<GattResponse>;

    /// Returns `None` when no response must be sent.
    fn on_characteristic_read(&self, uuid: u128, offset: u16) -> Option<GattResponse>;
}

/// Events delivered asynchronously by the charger driver.
pub trait ChargerCallbacks {
    fn on_alert(&self, kind: AlertKind);

    fn on_telemetry(&self, data: &[u8]);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
