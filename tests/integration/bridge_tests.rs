//! Integration tests for the GATT bridge.
//!
//! Exercises the inbound callback traits the way a host BLE stack and a
//! charger driver would, including from two threads at once.

use std::sync::{Arc, OnceLock, Weak};
use std::thread;

use super::mock_hw::{HwCall, MockHardware, RecordingSink};

use a4wp_pru::adapters::gatt::{
    ATT_INVALID_ATTRIBUTE_VALUE_LENGTH, ATT_SUCCESS, GattBridge, PROPERTY_READ, SERVICE_TABLE,
};
use a4wp_pru::app::events::AppEvent;
use a4wp_pru::app::ports::{AdvertisingPort, ChargerCallbacks, ChargerPort, TransportCallbacks};
use a4wp_pru::app::service::PruService;
use a4wp_pru::app::state::ConnectionState;
use a4wp_pru::control::AlertKind;
use a4wp_pru::dispatch::{
    CHAR_PRU_ALERT, CHAR_PRU_CONTROL, CHAR_PRU_DYNAMIC, CHAR_PRU_STATIC, CHAR_PTU_STATIC,
    SERVICE_UUID, UNSTORED_READ_VALUE,
};
use a4wp_pru::records::PowerLevel;

fn make_bridge() -> GattBridge<MockHardware, RecordingSink> {
    let bridge = GattBridge::new(PruService::default(), MockHardware::new(), RecordingSink::new());
    bridge.start();
    bridge
}

#[test]
fn write_response_echoes_value_and_offset() {
    let bridge = make_bridge();
    let value = [0x80, 0x00, 0x00, 0x00];
    let resp = bridge
        .on_characteristic_write(CHAR_PRU_CONTROL, 0, &value, true)
        .expect("response requested");
    assert_eq!(resp.status, ATT_SUCCESS);
    assert_eq!(resp.offset, 0);
    assert_eq!(resp.value.as_slice(), &value);
    assert!(bridge.inspect(|hw, _| hw.charging()));
}

#[test]
fn no_response_unless_requested() {
    let bridge = make_bridge();
    assert!(
        bridge
            .on_characteristic_write(CHAR_PTU_STATIC, 0, &[0u8; 20], false)
            .is_none()
    );
    assert!(bridge.service().ptu_static().is_some());
}

#[test]
fn malformed_write_reports_invalid_length() {
    let bridge = make_bridge();
    let resp = bridge
        .on_characteristic_write(CHAR_PTU_STATIC, 3, &[1, 2, 3], true)
        .expect("response requested");
    assert_eq!(resp.status, ATT_INVALID_ATTRIBUTE_VALUE_LENGTH);
    assert_eq!(resp.offset, 3);
    assert_eq!(resp.value.as_slice(), &[1, 2, 3]);
    assert!(bridge.service().ptu_static().is_none());
}

#[test]
fn write_to_unknown_uuid_succeeds_silently() {
    let bridge = make_bridge();
    let resp = bridge
        .on_characteristic_write(0x1234, 0, &[9, 9], true)
        .expect("response requested");
    assert_eq!(resp.status, ATT_SUCCESS);
    assert!(bridge.inspect(|hw, _| hw.calls.is_empty()));
}

#[test]
fn reads_answer_with_status_zero() {
    let bridge = make_bridge();
    let resp = bridge.on_characteristic_read(CHAR_PRU_STATIC, 0).unwrap();
    assert_eq!(resp.status, ATT_SUCCESS);
    assert_eq!(resp.value.len(), 20);

    bridge.on_alert(AlertKind::OverTemperature);
    let resp = bridge.on_characteristic_read(CHAR_PRU_ALERT, 0).unwrap();
    assert_eq!(resp.value.as_slice(), &[0x20]);
}

#[test]
fn unanswerable_reads_return_none() {
    let bridge = make_bridge();
    assert!(bridge.on_characteristic_read(CHAR_PRU_DYNAMIC, 0).is_none());
    assert!(bridge.on_characteristic_read(SERVICE_UUID, 0).is_none());
    assert!(bridge.on_characteristic_read(0xBEEF, 0).is_none());

    bridge.on_telemetry(&[7; 20]);
    let resp = bridge.on_characteristic_read(CHAR_PRU_DYNAMIC, 0).unwrap();
    assert_eq!(resp.value.as_slice(), &[7; 20]);
}

#[test]
fn every_readable_table_entry_is_answered() {
    let bridge = make_bridge();
    bridge.on_telemetry(&[1; 20]);
    for c in SERVICE_TABLE.characteristics {
        if c.properties & PROPERTY_READ == 0 {
            continue;
        }
        let resp = bridge.on_characteristic_read(c.uuid(), 0);
        assert!(resp.is_some(), "{:?} is readable but unanswered", c.id);
    }
}

#[test]
fn reads_of_ptu_written_characteristics_return_zero() {
    let bridge = make_bridge();
    bridge.on_characteristic_write(CHAR_PRU_CONTROL, 0, &[0x80, 0, 0, 0], false);
    for uuid in [CHAR_PRU_CONTROL, CHAR_PTU_STATIC] {
        let resp = bridge.on_characteristic_read(uuid, 0).unwrap();
        assert_eq!(resp.status, ATT_SUCCESS);
        assert_eq!(resp.value.as_slice(), &[UNSTORED_READ_VALUE]);
    }
}

#[test]
fn short_telemetry_is_dropped() {
    let bridge = make_bridge();
    bridge.on_telemetry(&[7; 8]);
    assert!(bridge.on_characteristic_read(CHAR_PRU_DYNAMIC, 0).is_none());
    assert!(bridge.inspect(|_, sink| {
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::RecordRejected(_)))
    }));
}

#[test]
fn disconnect_through_bridge_stops_charger() {
    let bridge = make_bridge();
    bridge.on_characteristic_write(CHAR_PRU_CONTROL, 0, &[0x80, 0, 0, 0], false);
    bridge.on_connection_state_changed(ConnectionState::Disconnected);
    let (svc, hw, _sink) = bridge.into_parts();
    assert_eq!(svc.connection_state(), ConnectionState::Disconnected);
    assert_eq!(
        &hw.calls[hw.calls.len() - 2..],
        &[HwCall::DataNotify(false), HwCall::StopCharging]
    );
}

#[test]
fn transport_and_charger_threads_share_state() {
    let bridge = Arc::new(make_bridge());

    let charger = {
        let bridge = Arc::clone(&bridge);
        thread::spawn(move || {
            for i in 0..200u32 {
                bridge.on_telemetry(&[(i % 256) as u8; 20]);
                bridge.on_alert(AlertKind::ALL[(i as usize) % AlertKind::ALL.len()]);
            }
        })
    };
    let transport = {
        let bridge = Arc::clone(&bridge);
        thread::spawn(move || {
            for _ in 0..200 {
                if let Some(resp) = bridge.on_characteristic_read(CHAR_PRU_DYNAMIC, 0) {
                    let first = resp.value[0];
                    assert!(resp.value.iter().all(|b| *b == first), "torn telemetry read");
                }
                let alert = bridge.on_characteristic_read(CHAR_PRU_ALERT, 0).unwrap();
                assert!(alert.value[0] == 0 || alert.value[0].count_ones() == 1);
                bridge.on_characteristic_write(CHAR_PRU_CONTROL, 0, &[0x80, 0, 0, 0], false);
            }
        })
    };

    charger.join().unwrap();
    transport.join().unwrap();

    assert_eq!(bridge.service().dynamic_param(), Some([199; 20]));
}

// ── Charger calling back from inside a command ────────────────

type ReentrantBridge = GattBridge<ReentrantCharger, RecordingSink>;

/// Charger whose start and stop commands immediately report an alert and
/// telemetry back through the bridge, on the same thread.
struct ReentrantCharger {
    bridge: Arc<OnceLock<Weak<ReentrantBridge>>>,
    calls: Vec<HwCall>,
}

impl ReentrantCharger {
    fn call_back(&self) {
        if let Some(bridge) = self.bridge.get().and_then(Weak::upgrade) {
            bridge.on_alert(AlertKind::ChargePort);
            bridge.on_telemetry(&[0x5A; 20]);
            bridge.on_telemetry(&[0x5A; 3]);
        }
    }
}

impl ChargerPort for ReentrantCharger {
    fn start_charging(&mut self) {
        self.calls.push(HwCall::StartCharging);
        self.call_back();
    }

    fn stop_charging(&mut self) {
        self.calls.push(HwCall::StopCharging);
        self.call_back();
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

impl AdvertisingPort for ReentrantCharger {
    fn start_advertising(&mut self, service_data: &[u8]) {
        self.calls.push(HwCall::StartAdvertising(service_data.to_vec()));
    }

    fn stop_advertising(&mut self) {
        self.calls.push(HwCall::StopAdvertising);
    }
}

fn make_reentrant_bridge() -> Arc<ReentrantBridge> {
    let slot = Arc::new(OnceLock::new());
    let charger = ReentrantCharger {
        bridge: Arc::clone(&slot),
        calls: Vec::new(),
    };
    let bridge = Arc::new(GattBridge::new(
        PruService::default(),
        charger,
        RecordingSink::new(),
    ));
    assert!(slot.set(Arc::downgrade(&bridge)).is_ok());
    bridge
}

#[test]
fn charger_callbacks_from_inside_a_command_complete() {
    let bridge = make_reentrant_bridge();

    let resp = bridge
        .on_characteristic_write(CHAR_PRU_CONTROL, 0, &[0x80, 0, 0, 0], true)
        .expect("response requested");
    assert_eq!(resp.status, ATT_SUCCESS);

    assert_eq!(bridge.service().alert().value(), 0x02);
    assert_eq!(bridge.service().dynamic_param(), Some([0x5A; 20]));
    bridge.inspect(|hw, sink| {
        assert_eq!(hw.calls.first(), Some(&HwCall::StartCharging));
        assert!(sink.events.iter().any(|e| matches!(e, AppEvent::AlertRaised { .. })));
        assert!(sink.events.iter().any(|e| matches!(e, AppEvent::RecordRejected(_))));
        assert!(sink.events.iter().any(|e| matches!(e, AppEvent::ControlApplied(_))));
    });
}

#[test]
fn charger_callbacks_from_inside_disconnect_complete() {
    let bridge = make_reentrant_bridge();
    bridge.on_connection_state_changed(ConnectionState::Disconnected);

    assert_eq!(bridge.service().connection_state(), ConnectionState::Disconnected);
    assert_eq!(bridge.service().alert().value(), 0x02);
    bridge.inspect(|hw, _| {
        assert_eq!(hw.calls, vec![HwCall::DataNotify(false), HwCall::StopCharging]);
    });
}
