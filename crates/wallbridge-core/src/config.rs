// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::types::{DEFAULT_CHANNEL, ResizeFilter, ResizePolicy};

/// Runtime settings for the command bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Method channel name the application layer sends commands on.
    pub channel: String,
    /// How `resizeImage` maps the source onto the requested dimensions.
    pub resize_policy: ResizePolicy,
    /// Resampling filter for `resizeImage`.
    pub resize_filter: ResizeFilter,
    /// Upper bound on a requested width or height, in pixels.
    pub max_dimension: u32,
    /// Override for the private storage root (desktop/CI bridge only).
    pub storage_root: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_owned(),
            resize_policy: ResizePolicy::Fit,
            resize_filter: ResizeFilter::Bilinear,
            max_dimension: 8192,
            storage_root: None,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON document. Missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, falling back to defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => Self::from_json_str(&data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Persist as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel.trim().is_empty() {
            return Err(BridgeError::Config("channel name must not be empty".into()));
        }
        if self.max_dimension == 0 {
            return Err(BridgeError::Config("max_dimension must be positive".into()));
        }
        Ok(())
    }
}
