//! Mock charger and advertiser for integration tests.
//!
//! Records every outbound call so tests can assert on the full command
//! history without a radio or a charger driver.

use a4wp_pru::app::events::AppEvent;
use a4wp_pru::app::ports::{AdvertisingPort, ChargerPort, EventSink};
use a4wp_pru::records::PowerLevel;

// ── Outbound call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwCall {
    StartCharging,
    StopCharging,
    SetPowerLevel(PowerLevel),
    AlertNotify(bool),
    DataNotify(bool),
    StartAdvertising(Vec<u8>),
    StopAdvertising,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn last_call(&self) -> Option<&HwCall> {
        self.calls.last()
    }

    pub fn charging(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::StartCharging => Some(true),
                HwCall::StopCharging => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn data_notify(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::DataNotify(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn advertising(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::StartAdvertising(_) => Some(true),
                HwCall::StopAdvertising => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargerPort for MockHardware {
    fn start_charging(&mut self) {
        self.calls.push(HwCall::StartCharging);
    }

    fn stop_charging(&mut self) {
        self.calls.push(HwCall::StopCharging);
    }

    fn set_power_level(&mut self, level: PowerLevel) {
        self.calls.push(HwCall::SetPowerLevel(level));
    }

    fn enable_alert_notification(&mut self, enable: bool) {
        self.calls.push(HwCall::AlertNotify(enable));
    }

    fn enable_data_notification(&mut self, enable: bool) {
        self.calls.push(HwCall::DataNotify(enable));
    }
}

impl AdvertisingPort for MockHardware {
    fn start_advertising(&mut self, service_data: &[u8]) {
        self.calls.push(HwCall::StartAdvertising(service_data.to_vec()));
    }

    fn stop_advertising(&mut self) {
        self.calls.push(HwCall::StopAdvertising);
    }
}

// ── Event recorder ────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
