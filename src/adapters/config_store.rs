//! In-memory configuration store.
//!
//! Implements [`ConfigPort`] over a postcard blob, the same encoding a
//! flash-backed store would write.  Validation runs before every save, so
//! the blob never holds a config the service would reject.

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PruConfig;

/// Largest serialized config accepted from or written to the store.
const MAX_BLOB_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct ConfigStore {
    blob: Option<Vec<u8>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw blob, e.g. one read back from flash.
    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self { blob: Some(blob) }
    }

    pub fn blob(&self) -> Option<&[u8]> {
        self.blob.as_deref()
    }
}

impl ConfigPort for ConfigStore {
    fn load(&self) -> Result<PruConfig, ConfigError> {
        let Some(bytes) = self.blob.as_deref() else {
            info!("ConfigStore: no stored config, using defaults");
            return Ok(PruConfig::default());
        };
        if bytes.len() > MAX_BLOB_SIZE {
            warn!("ConfigStore: blob of {} bytes exceeds {}", bytes.len(), MAX_BLOB_SIZE);
            return Err(ConfigError::Corrupted);
        }
        let config: PruConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        info!("ConfigStore: loaded config ({} bytes)", bytes.len());
        Ok(config)
    }

    fn save(&mut self, config: &PruConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        if bytes.len() > MAX_BLOB_SIZE {
            return Err(ConfigError::IoError);
        }
        info!("ConfigStore: config saved ({} bytes)", bytes.len());
        self.blob = Some(bytes);
        Ok(())
    }
}
