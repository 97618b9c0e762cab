// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wallbridge — Native platform capability abstractions.
//
// The command handlers never reach for platform singletons (wallpaper manager,
// media scanner, share sheet, storage state) directly. They receive a
// `PlatformBridge` and call through its traits, so tests can substitute fakes.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use std::sync::Arc;

use wallbridge_core::BridgeConfig;

/// Build the bridge implementation for the target operating system.
///
/// RETURNS: a shared trait object that the router hands to every handler.
pub fn platform_bridge(config: &BridgeConfig) -> Arc<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: `jni-rs` calls into the ART runtime.
        let _ = config;
        Arc::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: storage is real, device capabilities are unavailable.
        Arc::new(stub::StubBridge::from_config(config))
    }
}
