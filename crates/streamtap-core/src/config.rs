use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Runtime switches for the tap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Log intercepted reads with a hex dump and data hints.
    pub log_reads: bool,

    /// Log intercepted writes as well. Off by default: the write path fires
    /// for every outgoing field and drowns the log.
    pub log_writes: bool,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            log_reads: true,
            log_writes: false,
        }
    }
}

impl TapConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
