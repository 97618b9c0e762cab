// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::path::{Path, PathBuf};

use wallbridge_core::error::Result;

/// Unified bridge that groups all native capabilities the handlers need.
///
/// Implementations are shared across the blocking worker pool, hence the
/// `Send + Sync` bounds.
pub trait PlatformBridge: AppStorage + WallpaperSetter + MediaScanner + SocialShare + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// The application's private storage area.
pub trait AppStorage {
    /// Whether storage is mounted and at least readable.
    fn is_readable(&self) -> bool;

    /// Absolute path of the application's private storage root.
    fn root(&self) -> Result<PathBuf>;
}

/// Home-screen wallpaper.
pub trait WallpaperSetter {
    /// Decode the image at `path` and install it as the wallpaper.
    fn set_wallpaper(&self, path: &Path) -> Result<()>;
}

/// OS media indexer.
pub trait MediaScanner {
    /// Ask the indexer to (re)scan a single file.
    fn scan_file(&self, path: &Path) -> Result<ScanOutcome>;
}

/// Native share sheet.
pub trait SocialShare {
    /// Present the share sheet for a remote image. Returns once the sheet is
    /// shown; the user may still cancel.
    fn share_image_url(&self, url: &str) -> Result<()>;
}

/// The scan request as it was submitted to the indexer.
///
/// Indexing may finish after `scan_file` returns, so this records what was
/// asked for rather than what the indexer later stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Absolute path handed to the indexer.
    pub path: Option<String>,
    /// URI submitted alongside the path, when the platform takes one.
    pub uri: Option<String>,
}
