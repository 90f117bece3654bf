//! A4WP / Wipower PRU signaling core.
//!
//! Decodes the records a PTU writes over GATT, encodes the records it
//! reads back, turns PRU control commands into charger actions and maps
//! charger alerts to the alert byte.  The BLE stack and the charger driver
//! stay outside; they plug in through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod advertising;
pub mod app;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod records;

pub use error::{Error, Result};
