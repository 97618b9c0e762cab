// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Storage is backed by a real directory so path resolution behaves as on a
// device. Wallpaper, media scan, and share return `PlatformUnavailable`; the
// real implementations live in the `android` module.

use std::path::{Path, PathBuf};

use wallbridge_core::BridgeConfig;
use wallbridge_core::error::{BridgeError, Result};

use crate::traits::*;

/// Bridge returned on non-mobile platforms.
pub struct StubBridge {
    root: PathBuf,
}

impl StubBridge {
    /// Use `root` as the private storage directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the configured storage root, or the conventional data directory.
    pub fn from_config(config: &BridgeConfig) -> Self {
        match &config.storage_root {
            Some(root) => Self::new(root),
            None => Self::new(data_dir()),
        }
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl AppStorage for StubBridge {
    fn is_readable(&self) -> bool {
        self.root.is_dir()
    }

    fn root(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }
}

impl WallpaperSetter for StubBridge {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        tracing::warn!(path = %path.display(), "WallpaperSetter::set_wallpaper called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl MediaScanner for StubBridge {
    fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
        tracing::warn!(path = %path.display(), "MediaScanner::scan_file called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl SocialShare for StubBridge {
    fn share_image_url(&self, url: &str) -> Result<()> {
        tracing::warn!(url, "SocialShare::share_image_url called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

/// Return the application data directory, creating it if needed.
fn data_dir() -> PathBuf {
    let dir = dirs_fallback().join("wallbridge");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_follows_directory_existence() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = StubBridge::new(dir.path());
        assert!(bridge.is_readable());
        assert_eq!(bridge.root().unwrap(), dir.path());

        let missing = StubBridge::new(dir.path().join("not-mounted"));
        assert!(!missing.is_readable());
    }

    #[test]
    fn config_root_overrides_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig {
            storage_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let bridge = StubBridge::from_config(&config);
        assert_eq!(bridge.root().unwrap(), dir.path());
    }

    #[test]
    fn device_capabilities_are_unavailable() {
        let bridge = StubBridge::new(std::env::temp_dir());
        assert!(matches!(
            bridge.set_wallpaper(Path::new("a.png")),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.scan_file(Path::new("a.png")),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.share_image_url("https://example.com/a.png"),
            Err(BridgeError::PlatformUnavailable)
        ));
    }
}
