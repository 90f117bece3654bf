//! Fuzz target: record decoders
//!
//! Feeds arbitrary bytes to every record decoder and asserts that each
//! either rejects the length or produces a record whose derived values
//! stay within the protocol ceilings.
//!
//! cargo fuzz run fuzz_record_decoders

#![no_main]

use a4wp_pru::records::{PruAlert, PruControl, PruStaticParam, PtuStaticParam};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(control) = PruControl::decode(data) {
        assert_eq!(data.len(), 4);
        let _ = control.power_level();
        let _ = control.permission_code();
    }

    if let Ok(ptu) = PtuStaticParam::decode(data) {
        assert!(ptu.power() <= 22.0);
        assert!(ptu.max_source_impedance() <= 375.0);
        assert!(ptu.max_load_resistance() <= 55.0);
        assert!((1..=8).contains(&ptu.max_devices_supported()));
        assert!((1..=5).contains(&ptu.ptu_class()));
    }

    if let Ok(pru) = PruStaticParam::decode(data) {
        let encoded = pru.encode();
        assert_eq!(encoded[0], data[0]);
        assert_eq!(encoded[7], data[7]);
    }

    if let Ok(alert) = PruAlert::decode(data) {
        assert_eq!(alert.encode(), [data[0]]);
    }
});
