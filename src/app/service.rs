//! PRU service, the hexagonal core.
//!
//! [`PruService`] owns the shared [`PruState`] behind one exclusive lock
//! and exposes the transport and charger event handlers.  All I/O flows
//! through port traits injected at call sites, so the whole service is
//! testable with mock adapters.
//!
//! ```text
//!  transport ──▶ ┌─────────────────────────┐ ──▶ ChargerPort
//!                │        PruService        │ ──▶ AdvertisingPort
//!  charger  ───▶ │ dispatch · control · lock│ ──▶ EventSink
//!                └─────────────────────────┘
//! ```
//!
//! The lock is held only while state is read or written.  Charger and
//! advertiser commands are issued after it is released.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{debug, error, info, warn};

use crate::advertising::SERVICE_DATA;
use crate::config::PruConfig;
use crate::control::{AlertKind, AlertMapper, ControlInterpreter};
use crate::dispatch::{CharacteristicDispatch, InboundRecord, ReadPayload, UuidDisplay};
use crate::error::{Error, Result};
use crate::records::{PARAM_LEN, PruAlert, PruStaticParam, PtuStaticParam};

use super::events::AppEvent;
use super::ports::{AdvertisingPort, ChargerPort, EventSink};
use super::state::{ConnectionState, PruState};

// ───────────────────────────────────────────────────────────────
// PruService
// ───────────────────────────────────────────────────────────────

pub struct PruService {
    config: PruConfig,
    state: Mutex<CriticalSectionRawMutex, RefCell<PruState>>,
}

impl PruService {
    /// Construct the service with the PRU static record built from `config`.
    ///
    /// Does **not** advertise. Call [`start`](Self::start) next.
    pub fn new(config: PruConfig) -> Self {
        let pru_static = PruStaticParam::from_config(&config);
        info!("PruService: PRU static initialised ({:?})", pru_static);
        Self {
            config,
            state: Mutex::new(RefCell::new(PruState::new(pru_static))),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin advertising if the configuration asks for it.
    pub fn start(&self, adv: &mut impl AdvertisingPort, sink: &mut impl EventSink) {
        let advertising = self.config.advertise_on_start;
        if advertising {
            adv.start_advertising(&SERVICE_DATA);
        }
        sink.emit(&AppEvent::Started { advertising });
        info!("PruService started (advertising={})", advertising);
    }

    // ── Transport events ──────────────────────────────────────

    /// Record the new link state.  Losing the link forces the safe state:
    /// telemetry off and charging stopped, every time.
    pub fn on_connection_state_changed(
        &self,
        new_state: ConnectionState,
        hw: &mut (impl ChargerPort + AdvertisingPort),
        sink: &mut impl EventSink,
    ) {
        let prev = self.with_state(|s| core::mem::replace(&mut s.connection, new_state));
        info!("Connection {:?} -> {:?}", prev, new_state);
        sink.emit(&AppEvent::ConnectionChanged(new_state));

        if new_state == ConnectionState::Disconnected {
            hw.enable_data_notification(false);
            hw.stop_charging();
            sink.emit(&AppEvent::SafeStateEntered);
            if self.config.advertise_on_disconnect {
                hw.start_advertising(&SERVICE_DATA);
            }
        }
    }

    /// Handle a peer write.
    ///
    /// Writes to UUIDs this service does not accept are ignored and
    /// reported as success.  A malformed record leaves all state untouched.
    pub fn on_characteristic_write(
        &self,
        uuid: u128,
        value: &[u8],
        hw: &mut (impl ChargerPort + AdvertisingPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        debug!("Write {} ({} bytes)", UuidDisplay(uuid), value.len());
        match CharacteristicDispatch::route_write(uuid, value) {
            Ok(InboundRecord::Control(control)) => {
                ControlInterpreter::apply(&control, hw, sink);
                Ok(())
            }
            Ok(InboundRecord::PtuStatic(param)) => {
                self.store_ptu_static(param, sink);
                Ok(())
            }
            Err(Error::UnknownCharacteristic(_)) => {
                debug!("Write to {} ignored", UuidDisplay(uuid));
                Ok(())
            }
            Err(e) => {
                warn!("Write to {} rejected: {}", UuidDisplay(uuid), e);
                sink.emit(&AppEvent::RecordRejected(e));
                Err(e)
            }
        }
    }

    /// Handle a peer read.  An `Err` means no response must be sent.
    pub fn on_characteristic_read(
        &self,
        uuid: u128,
        sink: &mut impl EventSink,
    ) -> Result<ReadPayload> {
        let result = self.with_state(|s| CharacteristicDispatch::route_read(uuid, s));
        match &result {
            Ok(value) => debug!("Read {} -> {:02x?}", UuidDisplay(uuid), value.as_slice()),
            Err(Error::DataNotReady) => {
                error!("Read {}: PRU dynamic parameter not available", UuidDisplay(uuid));
                sink.emit(&AppEvent::ReadUnanswered(Error::DataNotReady));
            }
            Err(e) => {
                debug!("Read {} unanswered: {}", UuidDisplay(uuid), e);
                sink.emit(&AppEvent::ReadUnanswered(*e));
            }
        }
        result
    }

    // ── Charger events ────────────────────────────────────────

    /// Map a charger alert and store it as the current alert byte.
    pub fn on_alert(&self, kind: AlertKind, sink: &mut impl EventSink) -> PruAlert {
        let alert = AlertMapper::map(kind);
        self.with_state(|s| s.alert = alert);
        info!("Alert: {} (0x{:02x})", kind, alert.value());
        sink.emit(&AppEvent::AlertRaised { kind, alert });
        alert
    }

    /// Store telemetry pushed by the charger.
    pub fn on_telemetry(&self, data: &[u8], sink: &mut impl EventSink) -> Result<()> {
        let result = self.with_state(|s| s.dynamic.set_from_slice(data));
        match result {
            Ok(()) => {
                debug!("Telemetry updated");
                sink.emit(&AppEvent::TelemetryUpdated);
            }
            Err(e) => {
                warn!("Telemetry rejected: {}", e);
                sink.emit(&AppEvent::RecordRejected(e));
            }
        }
        result
    }

    // ── Host-side updates ─────────────────────────────────────

    /// Replace the PRU static record from its wire form (e.g. a value the
    /// charger reports after a firmware change).
    pub fn load_pru_static(&self, raw: &[u8], sink: &mut impl EventSink) -> Result<()> {
        match PruStaticParam::decode(raw) {
            Ok(param) => {
                self.with_state(|s| s.pru_static = param);
                sink.emit(&AppEvent::PruStaticStored);
                Ok(())
            }
            Err(e) => {
                warn!("PRU static rejected: {}", e);
                sink.emit(&AppEvent::RecordRejected(e));
                Err(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &PruConfig {
        &self.config
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.with_state(|s| s.connection)
    }

    pub fn alert(&self) -> PruAlert {
        self.with_state(|s| s.alert)
    }

    pub fn pru_static(&self) -> PruStaticParam {
        self.with_state(|s| s.pru_static)
    }

    pub fn ptu_static(&self) -> Option<PtuStaticParam> {
        self.with_state(|s| s.ptu_static)
    }

    pub fn dynamic_param(&self) -> Option<[u8; PARAM_LEN]> {
        self.with_state(|s| s.dynamic.get())
    }

    // ── Internal ──────────────────────────────────────────────

    fn store_ptu_static(&self, param: PtuStaticParam, sink: &mut impl EventSink) {
        self.with_state(|s| s.ptu_static = Some(param));
        info!(
            "PTU static stored: class={} power={:.1}W Rsrc={:.0} Rload={:.0} maxdev={}",
            param.ptu_class(),
            param.power(),
            param.max_source_impedance(),
            param.max_load_resistance(),
            param.max_devices_supported()
        );
        sink.emit(&AppEvent::PtuStaticStored(param));
    }

    /// Run `f` with exclusive access to the shared state.
    fn with_state<R>(&self, f: impl FnOnce(&mut PruState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl Default for PruService {
    fn default() -> Self {
        Self::new(PruConfig::default())
    }
}
