//! Shared service state.
//!
//! Everything the transport reads and the charger updates lives in one
//! [`PruState`], which [`PruService`](super::service::PruService) keeps
//! behind a single lock.

use crate::records::{PruAlert, PruDynamicParam, PruStaticParam, PtuStaticParam};

/// GATT link state, as reported by the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

#[derive(Debug, Clone, Default)]
pub struct PruState {
    pub pru_static: PruStaticParam,
    /// Last record the PTU wrote; kept across reconnects.
    pub ptu_static: Option<PtuStaticParam>,
    pub alert: PruAlert,
    pub dynamic: PruDynamicParam,
    pub connection: ConnectionState,
}

impl PruState {
    pub fn new(pru_static: PruStaticParam) -> Self {
        Self {
            pru_static,
            ..Self::default()
        }
    }
}
