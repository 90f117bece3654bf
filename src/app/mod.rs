//! Application core: pure domain logic, zero I/O.
//!
//! This module holds the PRU service: shared state, the event handlers the
//! transport and charger call, and the events it emits.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a radio or a charger.

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
