//! PRU control interpretation.
//!
//! Turns one decoded [`PruControl`] into charger and advertiser commands.
//! Decoding has already happened, so nothing here can fail.
//!
//! | Control bit        | Charger / advertiser calls                              |
//! |--------------------|---------------------------------------------------------|
//! | output enable = 1  | start, alerts off, telemetry on, stop advertising        |
//! | output enable = 0  | telemetry off, stop                                      |
//! | charger enable     | none (reported as an event)                              |
//! | power reduction    | `set_power_level`, always, last                          |

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{AdvertisingPort, ChargerPort, EventSink};
use crate::records::{PermissionCode, PowerLevel, PruControl};

/// What a control record resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDecision {
    pub output_enabled: bool,
    pub charger_enabled: bool,
    pub power_level: PowerLevel,
    pub permitted: bool,
    pub permission_code: PermissionCode,
    pub time_set_ms: u16,
}

impl ControlDecision {
    pub fn from_control(control: &PruControl) -> Self {
        Self {
            output_enabled: control.output_enabled(),
            charger_enabled: control.charger_enabled(),
            power_level: control.power_level(),
            permitted: control.permission(),
            permission_code: control.permission_code(),
            time_set_ms: control.time_set_ms(),
        }
    }
}

pub struct ControlInterpreter;

impl ControlInterpreter {
    /// Apply `control` to the charger and advertiser.
    pub fn apply(
        control: &PruControl,
        hw: &mut (impl ChargerPort + AdvertisingPort),
        sink: &mut impl EventSink,
    ) -> ControlDecision {
        let decision = ControlDecision::from_control(control);

        if decision.output_enabled {
            info!("Control: enable PRU output");
            hw.start_charging();
            hw.enable_alert_notification(false);
            hw.enable_data_notification(true);
            hw.stop_advertising();
        } else {
            info!("Control: disable PRU output");
            hw.enable_data_notification(false);
            hw.stop_charging();
        }

        if decision.charger_enabled {
            info!("Control: charger enable requested");
        } else {
            info!("Control: charger disable requested");
        }
        sink.emit(&AppEvent::ChargerEnableRequested(decision.charger_enabled));

        info!(
            "Control: power={:?} permission={} ({}) time_set={}ms",
            decision.power_level,
            decision.permitted,
            decision.permission_code,
            decision.time_set_ms
        );
        hw.set_power_level(decision.power_level);

        sink.emit(&AppEvent::ControlApplied(decision));
        decision
    }
}
