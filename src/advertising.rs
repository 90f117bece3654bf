//! Wipower PRU advertisement payload.
//!
//! ```text
//! ┌───────────────┬──────────────────────┬───────────┬───────────┐
//! │ UUID 0xFFFE   │ primary svc handle   │ RSSI par. │ ADV flags │
//! │ FE FF         │ 28 00                │ FF        │ 60        │
//! └───────────────┴──────────────────────┴───────────┴───────────┘
//! ```
//!
//! The advertiser sends this as its only service data in
//! limited-connectable mode.  The service stops advertising once the PTU
//! enables PRU output.

/// A4WP 16-bit service UUID.
pub const A4WP_SERVICE_UUID16: u16 = 0xFFFE;

/// Service data of the PRU advertisement.
pub const SERVICE_DATA: [u8; 6] = [0xFE, 0xFF, 0x28, 0x00, 0xFF, 0x60];

/// GATT primary service handle carried in [`SERVICE_DATA`].
pub const fn primary_service_handle() -> u16 {
    u16::from_le_bytes([SERVICE_DATA[2], SERVICE_DATA[3]])
}
