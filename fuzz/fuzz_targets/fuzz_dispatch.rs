//! Fuzz target: service write/read path
//!
//! The first byte picks a characteristic, the rest is the written value.
//! A rejected write must leave the stored PTU static record untouched, and
//! a later read of any characteristic must not panic.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use a4wp_pru::adapters::gatt::GattBridge;
use a4wp_pru::app::events::AppEvent;
use a4wp_pru::app::ports::{AdvertisingPort, ChargerPort, EventSink, TransportCallbacks};
use a4wp_pru::app::service::PruService;
use a4wp_pru::dispatch::CharacteristicId;
use a4wp_pru::records::PowerLevel;
use libfuzzer_sys::fuzz_target;

struct NullHw;

impl ChargerPort for NullHw {
    fn start_charging(&mut self) {}
    fn stop_charging(&mut self) {}
    fn set_power_level(&mut self, _level: PowerLevel) {}
    fn enable_alert_notification(&mut self, _enable: bool) {}
    fn enable_data_notification(&mut self, _enable: bool) {}
}

impl AdvertisingPort for NullHw {
    fn start_advertising(&mut self, _service_data: &[u8]) {}
    fn stop_advertising(&mut self) {}
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, value)) = data.split_first() else {
        return;
    };
    let ids = CharacteristicId::ALL;
    let uuid = ids[usize::from(selector) % ids.len()].uuid();

    let bridge = GattBridge::new(PruService::default(), NullHw, NullSink);
    let before = bridge.service().ptu_static();
    if let Some(resp) = bridge.on_characteristic_write(uuid, 0, value, true) {
        if resp.status != 0 {
            assert_eq!(bridge.service().ptu_static(), before);
        }
        assert!(value.starts_with(resp.value.as_slice()));
    }

    for id in ids {
        let _ = bridge.on_characteristic_read(id.uuid(), 0);
    }
});
