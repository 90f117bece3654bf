//! GATT bridge adapter.
//!
//! Implements the inbound [`TransportCallbacks`] and [`ChargerCallbacks`]
//! on top of a [`PruService`].  The host's BLE stack calls the transport
//! side, the charger driver calls the charger side; both may run on their
//! own threads.
//!
//! ## GATT Service Layout
//!
//! | Characteristic | UUID                     | Properties  | Perms       |
//! |----------------|--------------------------|-------------|-------------|
//! | PRU control    | `6455e670-…-0800200c9a67`| Read+Write  | Read+Write  |
//! | PTU static     | `6455e670-…-0800200c9a68`| Read+Write  | Read+Write  |
//! | PRU alert      | `6455e670-…-0800200c9a69`| Read+Notify | Read        |
//! | PRU static     | `6455e670-…-0800200c9a70`| Read        | Read        |
//! | PRU dynamic    | `6455e670-…-0800200c9a71`| Read        | Read        |
//!
//! The alert characteristic carries one descriptor (Read+Write) that
//! shares the alert UUID.
//!
//! ## Locking
//!
//! The charger has its own lock, held for the duration of one transport
//! callback.  The sink is locked per event.  Neither is a critical
//! section, and the service's state lock is never held while the charger
//! runs.  Charger callbacks skip the charger lock entirely.

use std::sync::{Mutex as StdMutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{
    AdvertisingPort, ChargerCallbacks, ChargerPort, EventSink, GattResponse, MAX_ATTR_LEN,
    TransportCallbacks,
};
use crate::app::service::PruService;
use crate::app::state::ConnectionState;
use crate::control::AlertKind;
use crate::dispatch::{CharacteristicId, SERVICE_UUID, UuidDisplay};
use crate::error::Error;

// ───────────────────────────────────────────────────────────────
// ATT status codes
// ───────────────────────────────────────────────────────────────

pub const ATT_SUCCESS: u8 = 0x00;
pub const ATT_INVALID_ATTRIBUTE_VALUE_LENGTH: u8 = 0x0D;
pub const ATT_UNLIKELY_ERROR: u8 = 0x0E;

// ───────────────────────────────────────────────────────────────
// Registration table
// ───────────────────────────────────────────────────────────────

pub const PROPERTY_READ: u8 = 0x02;
pub const PROPERTY_WRITE: u8 = 0x08;
pub const PROPERTY_NOTIFY: u8 = 0x10;

pub const PERMISSION_READ: u16 = 0x0001;
pub const PERMISSION_WRITE: u16 = 0x0010;

/// Descriptor on the alert characteristic.  Reuses the alert UUID.
pub const ALERT_DESCRIPTOR_UUID: u128 = crate::dispatch::CHAR_PRU_ALERT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorDef {
    pub uuid: u128,
    pub permissions: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicDef {
    pub id: CharacteristicId,
    pub properties: u8,
    pub permissions: u16,
    pub descriptor: Option<DescriptorDef>,
}

impl CharacteristicDef {
    pub const fn uuid(&self) -> u128 {
        self.id.uuid()
    }
}

/// What a host transport registers for the PRU service.
pub struct ServiceDef {
    pub uuid: u128,
    pub characteristics: &'static [CharacteristicDef],
}

pub static SERVICE_TABLE: ServiceDef = ServiceDef {
    uuid: SERVICE_UUID,
    characteristics: &[
        CharacteristicDef {
            id: CharacteristicId::PruControl,
            properties: PROPERTY_READ | PROPERTY_WRITE,
            permissions: PERMISSION_READ | PERMISSION_WRITE,
            descriptor: None,
        },
        CharacteristicDef {
            id: CharacteristicId::PtuStatic,
            properties: PROPERTY_READ | PROPERTY_WRITE,
            permissions: PERMISSION_READ | PERMISSION_WRITE,
            descriptor: None,
        },
        CharacteristicDef {
            id: CharacteristicId::PruAlert,
            properties: PROPERTY_READ | PROPERTY_NOTIFY,
            permissions: PERMISSION_READ,
            descriptor: Some(DescriptorDef {
                uuid: ALERT_DESCRIPTOR_UUID,
                permissions: PERMISSION_READ | PERMISSION_WRITE,
            }),
        },
        CharacteristicDef {
            id: CharacteristicId::PruStatic,
            properties: PROPERTY_READ,
            permissions: PERMISSION_READ,
            descriptor: None,
        },
        CharacteristicDef {
            id: CharacteristicId::PruDynamic,
            properties: PROPERTY_READ,
            permissions: PERMISSION_READ,
            descriptor: None,
        },
    ],
};

// ───────────────────────────────────────────────────────────────
// Bridge
// ───────────────────────────────────────────────────────────────

/// Owns the service plus the charger/advertiser `H` and the event sink `E`.
pub struct GattBridge<H, E> {
    service: PruService,
    hw: StdMutex<H>,
    sink: StdMutex<E>,
}

/// Event sink handed to the service.  Locks the real sink per event only,
/// so a charger callback fired from inside a charger command can still emit.
struct SharedSink<'a, E>(&'a StdMutex<E>);

impl<E: EventSink> EventSink for SharedSink<'_, E> {
    fn emit(&mut self, event: &AppEvent) {
        relock(self.0).emit(event);
    }
}

/// Lock `mutex`, recovering the value if a previous holder panicked.
fn relock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<H, E> GattBridge<H, E>
where
    H: ChargerPort + AdvertisingPort,
    E: EventSink,
{
    pub fn new(service: PruService, hw: H, sink: E) -> Self {
        Self {
            service,
            hw: StdMutex::new(hw),
            sink: StdMutex::new(sink),
        }
    }

    /// Start the service (optional advertising).
    pub fn start(&self) {
        self.with_hw(|hw, sink| self.service.start(hw, sink));
    }

    pub fn service(&self) -> &PruService {
        &self.service
    }

    /// Inspect the charger and sink, e.g. from a test.
    pub fn inspect<R>(&self, f: impl FnOnce(&H, &E) -> R) -> R {
        let hw = relock(&self.hw);
        let sink = relock(&self.sink);
        f(&hw, &sink)
    }

    pub fn into_parts(self) -> (PruService, H, E) {
        let hw = self.hw.into_inner().unwrap_or_else(PoisonError::into_inner);
        let sink = self.sink.into_inner().unwrap_or_else(PoisonError::into_inner);
        (self.service, hw, sink)
    }

    /// Run `f` with exclusive use of the charger.  Events go out through a
    /// per-event sink lock.
    fn with_hw<R>(&self, f: impl FnOnce(&mut H, &mut SharedSink<'_, E>) -> R) -> R {
        let mut hw = relock(&self.hw);
        f(&mut hw, &mut SharedSink(&self.sink))
    }

    fn sink(&self) -> SharedSink<'_, E> {
        SharedSink(&self.sink)
    }
}

impl<H, E> TransportCallbacks for GattBridge<H, E>
where
    H: ChargerPort + AdvertisingPort,
    E: EventSink,
{
    fn on_connection_state_changed(&self, state: ConnectionState) {
        self.with_hw(|hw, sink| self.service.on_connection_state_changed(state, hw, sink));
    }

    fn on_characteristic_write(
        &self,
        uuid: u128,
        offset: u16,
        value: &[u8],
        response_needed: bool,
    ) -> Option<GattResponse> {
        let result =
            self.with_hw(|hw, sink| self.service.on_characteristic_write(uuid, value, hw, sink));
        let status = match result {
            Ok(()) => ATT_SUCCESS,
            Err(Error::MalformedRecord { .. }) => ATT_INVALID_ATTRIBUTE_VALUE_LENGTH,
            Err(_) => ATT_UNLIKELY_ERROR,
        };
        if !response_needed {
            return None;
        }
        debug!("Write response {}: status=0x{:02x}", UuidDisplay(uuid), status);
        Some(GattResponse {
            status,
            offset,
            value: value.iter().copied().take(MAX_ATTR_LEN).collect(),
        })
    }

    fn on_characteristic_read(&self, uuid: u128, offset: u16) -> Option<GattResponse> {
        let payload = self.service.on_characteristic_read(uuid, &mut self.sink()).ok()?;
        Some(GattResponse {
            status: ATT_SUCCESS,
            offset,
            value: payload.iter().copied().collect(),
        })
    }
}

/// Charger callbacks touch only the state and the sink, never the charger
/// lock, so a driver may call them from inside a charger command.
impl<H, E> ChargerCallbacks for GattBridge<H, E>
where
    H: ChargerPort + AdvertisingPort,
    E: EventSink,
{
    fn on_alert(&self, kind: AlertKind) {
        let alert = self.service.on_alert(kind, &mut self.sink());
        info!("Charger alert {} stored as 0x{:02x}", kind, alert.value());
    }

    fn on_telemetry(&self, data: &[u8]) {
        if let Err(e) = self.service.on_telemetry(data, &mut self.sink()) {
            warn!("Charger telemetry dropped ({} bytes): {}", data.len(), e);
        }
    }
}
