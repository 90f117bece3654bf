//! Outbound application events.
//!
//! The [`PruService`](super::service::PruService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, count them, mirror
//! them to a debug characteristic.

use crate::app::state::ConnectionState;
use crate::control::alert::AlertKind;
use crate::control::interpreter::ControlDecision;
use crate::error::Error;
use crate::records::{PruAlert, PtuStaticParam};

/// Structured events emitted by the PRU core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started.
    Started { advertising: bool },

    /// The transport reported a new link state.
    ConnectionChanged(ConnectionState),

    /// Charging stopped and telemetry disabled after the link dropped.
    SafeStateEntered,

    /// A PRU control record was applied.
    ControlApplied(ControlDecision),

    /// The charger-enable bit of a control record.  No charger command
    /// follows from it.
    ChargerEnableRequested(bool),

    /// A new PTU static record replaced the stored one.
    PtuStaticStored(PtuStaticParam),

    /// The PRU static record was replaced.
    PruStaticStored,

    /// The charger raised an alert and the stored alert byte changed.
    AlertRaised { kind: AlertKind, alert: PruAlert },

    /// The charger pushed fresh dynamic telemetry.
    TelemetryUpdated,

    /// A write or charger push was rejected.
    RecordRejected(Error),

    /// A read produced no response.
    ReadUnanswered(Error),
}
