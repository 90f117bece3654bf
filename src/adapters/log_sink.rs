//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The host picks the logger backend.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { advertising } => {
                info!("START | advertising={}", advertising);
            }
            AppEvent::ConnectionChanged(state) => {
                info!("LINK  | {:?}", state);
            }
            AppEvent::SafeStateEntered => {
                info!("SAFE  | charging stopped, telemetry off");
            }
            AppEvent::ControlApplied(d) => {
                info!(
                    "CTRL  | output={} charger={} power={:?} permitted={} ({}) time_set={}ms",
                    d.output_enabled,
                    d.charger_enabled,
                    d.power_level,
                    d.permitted,
                    d.permission_code,
                    d.time_set_ms,
                );
            }
            AppEvent::ChargerEnableRequested(enable) => {
                info!("CTRL  | charger enable requested={}", enable);
            }
            AppEvent::PtuStaticStored(p) => {
                info!(
                    "PTU   | class={} power={:.1}W Rsrc={:.0} Rload={:.0} maxdev={} id=0x{:04x}",
                    p.ptu_class(),
                    p.power(),
                    p.max_source_impedance(),
                    p.max_load_resistance(),
                    p.max_devices_supported(),
                    p.id(),
                );
            }
            AppEvent::PruStaticStored => {
                info!("PRU   | static record replaced");
            }
            AppEvent::AlertRaised { kind, alert } => {
                info!("ALERT | {} -> 0x{:02x}", kind, alert.value());
            }
            AppEvent::TelemetryUpdated => {
                info!("TELEM | dynamic parameter updated");
            }
            AppEvent::RecordRejected(e) => {
                warn!("REJ   | {}", e);
            }
            AppEvent::ReadUnanswered(e) => {
                warn!("READ  | no response: {}", e);
            }
        }
    }
}
