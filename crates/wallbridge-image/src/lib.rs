// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wallbridge-image — Image handling for the Wallbridge command bridge.
//
// Decodes encoded image bytes, rescales them under a `ResizePolicy`, and
// re-encodes the result as lossless PNG. Nothing here touches the filesystem.

pub mod image;

pub use self::image::processor::{ImageProcessor, filter_type, resize_png};
