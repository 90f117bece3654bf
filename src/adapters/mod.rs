//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements           | Connects to               |
//! |----------------|----------------------|---------------------------|
//! | `gatt`         | TransportCallbacks   | Host GATT server          |
//! |                | ChargerCallbacks     | Charger driver callbacks  |
//! | `log_sink`     | EventSink            | `log` facade              |
//! | `config_store` | ConfigPort           | postcard blob in memory   |

pub mod config_store;
pub mod gatt;
pub mod log_sink;
