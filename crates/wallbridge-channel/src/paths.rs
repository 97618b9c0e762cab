// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resolution of path segments against the application's private storage.

use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use tracing::debug;
use wallbridge_bridge::traits::AppStorage;
use wallbridge_core::error::{BridgeError, Result};

use crate::args::PathSegments;

/// Join `segments` with the platform separator under the storage root.
///
/// Fails with `StorageUnavailable` before touching the filesystem if storage
/// is not readable. Empty segments contribute nothing, so `["", "a.png"]`
/// names `<root>/a.png`. The result must stay below the root; `..` and
/// absolute components are rejected. Existence of the final path is not checked.
pub fn resolve_path<S: AppStorage + ?Sized>(storage: &S, segments: &PathSegments) -> Result<PathBuf> {
    if !storage.is_readable() {
        return Err(BridgeError::StorageUnavailable);
    }
    let root = storage.root()?;

    let relative = segments
        .as_slice()
        .iter()
        .filter(|segment| !segment.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR);
    let escapes = Path::new(&relative).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(BridgeError::invalid(
            "Path must stay inside application storage",
        ));
    }

    let path = root.join(relative);
    debug!(path = %path.display(), "Resolved storage path");
    Ok(path)
}
