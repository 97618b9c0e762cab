// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, policy-driven resize, PNG encode. Operates on
// in-memory images using the `image` crate.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};
use wallbridge_core::error::BridgeError;
use wallbridge_core::types::{ResizeFilter, ResizePolicy};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`
/// wrapping the result, so calls chain:
///
/// ```ignore
/// let png = ImageProcessor::from_bytes(&bytes)?
///     .resize(ResizePolicy::Fit, 100, 100, ResizeFilter::Bilinear)
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (PNG, JPEG, WebP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BridgeError> {
        if data.is_empty() {
            return Err(BridgeError::Decode("input is empty".into()));
        }
        let img = image::load_from_memory(data).map_err(|err| BridgeError::Decode(err.to_string()))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Output dimensions `resize` would produce for this image.
    ///
    /// Under [`ResizePolicy::Fit`] both axes are scaled by
    /// `min(width / src_w, height / src_h)` and rounded to the nearest pixel,
    /// never below 1. Under [`ResizePolicy::Stretch`] the request is returned
    /// as is.
    pub fn target_dimensions(&self, policy: ResizePolicy, width: u32, height: u32) -> (u32, u32) {
        match policy {
            ResizePolicy::Stretch => (width, height),
            ResizePolicy::Fit => fit_within(self.width(), self.height(), width, height),
        }
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize under `policy`. When the computed size equals the current size
    /// the pixels are returned untouched.
    #[instrument(skip(self), fields(from_w = self.width(), from_h = self.height()))]
    pub fn resize(self, policy: ResizePolicy, width: u32, height: u32, filter: ResizeFilter) -> Self {
        let (new_w, new_h) = self.target_dimensions(policy, width, height);
        if (new_w, new_h) == (self.width(), self.height()) {
            debug!("Target matches source, skipping resample");
            return self;
        }
        info!(new_w, new_h, ?filter, "Resizing image");
        let resized = self.image.resize_exact(new_w, new_h, filter_type(filter));
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, BridgeError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| BridgeError::Encode(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}

/// Decode `data`, resize it under `policy`, and return PNG bytes.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn resize_png(
    data: &[u8],
    width: u32,
    height: u32,
    policy: ResizePolicy,
    filter: ResizeFilter,
) -> Result<Vec<u8>, BridgeError> {
    ImageProcessor::from_bytes(data)?
        .resize(policy, width, height, filter)
        .to_png_bytes()
}

/// Map the configured filter onto the `image` crate's resampling filter.
pub fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Bilinear => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let ratio_w = f64::from(max_w) / f64::from(src_w.max(1));
    let ratio_h = f64::from(max_h) / f64::from(src_h.max(1));
    let ratio = ratio_w.min(ratio_h);
    let scale = |side: u32| (f64::from(side) * ratio).round().max(1.0) as u32;
    (scale(src_w), scale(src_h))
}
