//! Control decisions: PTU command interpretation and charger alert mapping.

pub mod alert;
pub mod interpreter;

pub use alert::{AlertKind, AlertMapper};
pub use interpreter::{ControlDecision, ControlInterpreter};
