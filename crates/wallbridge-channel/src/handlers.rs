// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command handlers. Each one takes already-validated arguments, calls exactly
// one platform capability (or the image pipeline), and maps the outcome to a
// `SuccessValue`. All of them block and are run on tokio's blocking pool.

use tracing::{debug, info, instrument};
use wallbridge_bridge::traits::PlatformBridge;
use wallbridge_core::error::Result;
use wallbridge_core::types::{MSG_SCAN_COMPLETED, MSG_SHARE_SHOWN, MSG_WALLPAPER_SET};
use wallbridge_core::{BridgeConfig, SuccessValue};

use crate::args::{CommandArgs, ImageUrl, PathSegments, ResizeArgs};
use crate::paths::resolve_path;

/// Run the handler matching `args`.
pub fn handle(bridge: &dyn PlatformBridge, config: &BridgeConfig, args: CommandArgs) -> Result<SuccessValue> {
    match args {
        CommandArgs::SetWallpaper(segments) => set_wallpaper(bridge, &segments),
        CommandArgs::ScanFile(segments) => scan_file(bridge, &segments),
        CommandArgs::ShareImage(url) => share_image(bridge, &url),
        CommandArgs::Resize(resize) => resize_image(config, resize),
    }
}

/// Install the image at `<storage root>/<segments>` as the wallpaper.
///
/// Decoding is left to the platform setter, which sniffs the file content
/// and reports a missing or undecodable file as a platform error.
#[instrument(skip(bridge), fields(platform = bridge.platform_name()))]
pub fn set_wallpaper(bridge: &dyn PlatformBridge, segments: &PathSegments) -> Result<SuccessValue> {
    let path = resolve_path(bridge, segments)?;
    bridge.set_wallpaper(&path)?;
    info!(path = %path.display(), "Wallpaper set");
    Ok(SuccessValue::message(MSG_WALLPAPER_SET))
}

/// Ask the media indexer to rescan `<storage root>/<segments>`.
#[instrument(skip(bridge), fields(platform = bridge.platform_name()))]
pub fn scan_file(bridge: &dyn PlatformBridge, segments: &PathSegments) -> Result<SuccessValue> {
    let path = resolve_path(bridge, segments)?;
    info!(path = %path.display(), "Start scan");

    let outcome = bridge.scan_file(&path)?;
    info!(path = ?outcome.path, uri = ?outcome.uri, "Scan result");
    Ok(SuccessValue::message(MSG_SCAN_COMPLETED))
}

/// Present the native share sheet for a remote image.
#[instrument(skip(bridge), fields(platform = bridge.platform_name()))]
pub fn share_image(bridge: &dyn PlatformBridge, url: &ImageUrl) -> Result<SuccessValue> {
    bridge.share_image_url(url.as_str())?;
    info!(url = url.as_str(), "Share dialog shown");
    Ok(SuccessValue::message(MSG_SHARE_SHOWN))
}

/// Resize the supplied image under the configured policy and return PNG bytes.
#[instrument(skip_all, fields(
    data_len = args.bytes.len(),
    width = args.width,
    height = args.height,
    policy = ?config.resize_policy,
))]
pub fn resize_image(config: &BridgeConfig, args: ResizeArgs) -> Result<SuccessValue> {
    let png = wallbridge_image::resize_png(
        &args.bytes,
        args.width,
        args.height,
        config.resize_policy,
        config.resize_filter,
    )?;
    debug!(out_len = png.len(), "Resize complete");
    Ok(SuccessValue::Bytes(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use image::{DynamicImage, RgbaImage};
    use wallbridge_bridge::traits::*;
    use wallbridge_core::{BridgeError, ResizePolicy};

    /// Records every platform call; optionally fails them.
    struct RecordingBridge {
        root: PathBuf,
        readable: bool,
        fail_with: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingBridge {
        fn new(root: &Path) -> Self {
            Self {
                root: root.to_path_buf(),
                readable: true,
                fail_with: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(message) => Err(BridgeError::Platform(message.clone())),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PlatformBridge for RecordingBridge {
        fn platform_name(&self) -> &str {
            "Recording"
        }
    }

    impl AppStorage for RecordingBridge {
        fn is_readable(&self) -> bool {
            self.readable
        }

        fn root(&self) -> Result<PathBuf> {
            Ok(self.root.clone())
        }
    }

    impl WallpaperSetter for RecordingBridge {
        fn set_wallpaper(&self, path: &Path) -> Result<()> {
            self.record(format!("wallpaper:{}", path.display()))
        }
    }

    impl MediaScanner for RecordingBridge {
        fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
            self.record(format!("scan:{}", path.display()))?;
            Ok(ScanOutcome {
                path: Some(path.display().to_string()),
                uri: None,
            })
        }
    }

    impl SocialShare for RecordingBridge {
        fn share_image_url(&self, url: &str) -> Result<()> {
            self.record(format!("share:{url}"))
        }
    }

    fn segments(parts: &[&str]) -> PathSegments {
        PathSegments::new(parts.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .save(path)
            .unwrap();
    }

    #[test]
    fn wallpaper_calls_platform_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pics")).unwrap();
        write_png(&dir.path().join("pics").join("a.png"), 4, 4);
        let bridge = RecordingBridge::new(dir.path());

        let value = set_wallpaper(&bridge, &segments(&["pics", "a.png"])).unwrap();
        assert_eq!(value, SuccessValue::message("Set wallpaper successfully"));
        let expected = format!("wallpaper:{}", dir.path().join("pics").join("a.png").display());
        assert_eq!(bridge.calls(), vec![expected]);
    }

    #[test]
    fn wallpaper_file_without_extension_reaches_platform() {
        let dir = tempfile::tempdir().unwrap();
        let named = dir.path().join("wall.png");
        write_png(&named, 4, 4);
        std::fs::rename(&named, dir.path().join("wall")).unwrap();
        std::fs::copy(dir.path().join("wall"), dir.path().join("wall.jpg")).unwrap();
        let bridge = RecordingBridge::new(dir.path());

        for name in ["wall", "wall.jpg"] {
            let value = set_wallpaper(&bridge, &segments(&[name])).unwrap();
            assert_eq!(value, SuccessValue::message("Set wallpaper successfully"));
        }
        assert_eq!(
            bridge.calls(),
            vec![
                format!("wallpaper:{}", dir.path().join("wall").display()),
                format!("wallpaper:{}", dir.path().join("wall.jpg").display()),
            ]
        );
    }

    #[test]
    fn wallpaper_decode_failure_comes_from_platform() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = RecordingBridge::new(dir.path());
        bridge.fail_with = Some("Unable to decode image".into());

        let err = set_wallpaper(&bridge, &segments(&["pics", "a.png"])).unwrap_err();
        assert!(matches!(err, BridgeError::Platform(ref m) if m == "Unable to decode image"));
        assert_eq!(bridge.calls().len(), 1);
    }

    #[test]
    fn unreadable_storage_blocks_platform_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = RecordingBridge::new(dir.path());
        bridge.readable = false;

        assert!(matches!(
            scan_file(&bridge, &segments(&["a.png"])),
            Err(BridgeError::StorageUnavailable)
        ));
        assert!(matches!(
            set_wallpaper(&bridge, &segments(&["a.png"])),
            Err(BridgeError::StorageUnavailable)
        ));
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn scan_reports_completion() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = RecordingBridge::new(dir.path());
        let value = scan_file(&bridge, &segments(&["a.png"])).unwrap();
        assert_eq!(value, SuccessValue::message("Scan completed"));
        assert_eq!(bridge.calls().len(), 1);
    }

    #[test]
    fn platform_failure_message_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut bridge = RecordingBridge::new(dir.path());
        bridge.fail_with = Some("Cannot show share dialog".into());

        let url = ImageUrl::parse("https://example.com/a.png").unwrap();
        let err = share_image(&bridge, &url).unwrap_err();
        assert_eq!(err.to_string(), "Cannot show share dialog");
    }

    #[test]
    fn resize_returns_png_bytes() {
        let mut encoded = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(200, 100))
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .unwrap();
        let config = BridgeConfig {
            resize_policy: ResizePolicy::Stretch,
            ..Default::default()
        };
        let value = resize_image(
            &config,
            ResizeArgs {
                bytes: encoded,
                width: 100,
                height: 100,
            },
        )
        .unwrap();
        let SuccessValue::Bytes(png) = value else {
            panic!("expected bytes");
        };
        let out = image::load_from_memory(&png).unwrap();
        assert_eq!((out.width(), out.height()), (100, 100));
    }
}
