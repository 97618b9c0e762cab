// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// Handlers run on tokio's blocking pool. Each trait method holds a scoped
// `AttachGuard` for its whole body; when the guard detaches the thread, every
// local reference the method created is released with it.

#![cfg(target_os = "android")]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jni::objects::{JObject, JString, JValue};
use jni::{AttachGuard, JNIEnv, JavaVM};

use wallbridge_core::error::{BridgeError, Result};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Environment.MEDIA_MOUNTED` / `Environment.MEDIA_MOUNTED_READ_ONLY`.
const MEDIA_MOUNTED: &str = "mounted";
const MEDIA_MOUNTED_READ_ONLY: &str = "mounted_ro";

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, taken from the NDK context on first use.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::Platform(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Attach the current thread for the lifetime of the returned guard.
///
/// The guard derefs to [`JNIEnv`]. If the thread was already attached by the
/// host, dropping the guard leaves it attached.
fn jni_env() -> Result<AttachGuard<'static>> {
    java_vm()?
        .attach_current_thread()
        .map_err(|e| BridgeError::Platform(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(BridgeError::Platform(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a JNI failure into `BridgeError::Platform`.
///
/// A pending Java exception is cleared and its `getMessage()` becomes the
/// error message, so the application layer sees what the platform said.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BridgeError {
    if let jni::errors::Error::JavaException = e {
        if let Some(message) = take_exception_message(env) {
            tracing::warn!(context, message, "Android: Java exception");
            return BridgeError::Platform(message);
        }
    }
    BridgeError::Platform(format!("{context}: {e}"))
}

fn take_exception_message(env: &mut JNIEnv<'_>) -> Option<String> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    if throwable.is_null() {
        return None;
    }
    let message = env
        .call_method(&throwable, "getMessage", "()Ljava/lang/String;", &[])
        .ok()?
        .l()
        .ok()?;
    if message.is_null() {
        return env
            .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()
            .and_then(|s| java_string(env, s).ok());
    }
    java_string(env, message).ok()
}

fn java_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> Result<String> {
    env.get_string(&JString::from(obj))
        .map(Into::into)
        .map_err(|e| BridgeError::Platform(format!("get_string: {e}")))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Wallbridge platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// AppStorage — Environment / Context.getExternalFilesDir
// ---------------------------------------------------------------------------

impl AppStorage for AndroidBridge {
    fn is_readable(&self) -> bool {
        match external_storage_state() {
            Ok(state) => state == MEDIA_MOUNTED || state == MEDIA_MOUNTED_READ_ONLY,
            Err(err) => {
                tracing::warn!(error = %err, "Android: storage state query failed");
                false
            }
        }
    }

    /// `activity.getExternalFilesDir(null).getAbsolutePath()`
    fn root(&self) -> Result<PathBuf> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let null_type = JObject::null();
        let dir = match env.call_method(
            &activity,
            "getExternalFilesDir",
            "(Ljava/lang/String;)Ljava/io/File;",
            &[JValue::Object(&null_type)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getExternalFilesDir->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getExternalFilesDir", e)),
        };
        if dir.is_null() {
            return Err(BridgeError::StorageUnavailable);
        }

        let abs = match env.call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[]) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getAbsolutePath->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getAbsolutePath", e)),
        };
        Ok(PathBuf::from(java_string(&mut env, abs)?))
    }
}

fn external_storage_state() -> Result<String> {
    let mut env = jni_env()?;
    let state = match env.call_static_method(
        "android/os/Environment",
        "getExternalStorageState",
        "()Ljava/lang/String;",
        &[],
    ) {
        Ok(value) => value
            .l()
            .map_err(|e| jni_err(&mut env, "getExternalStorageState->l", e))?,
        Err(e) => return Err(jni_err(&mut env, "getExternalStorageState", e)),
    };
    java_string(&mut env, state)
}

// ---------------------------------------------------------------------------
// WallpaperSetter — android.app.WallpaperManager
// ---------------------------------------------------------------------------

impl WallpaperSetter for AndroidBridge {
    /// `WallpaperManager.getInstance(activity).setBitmap(BitmapFactory.decodeFile(path))`
    ///
    /// `decodeFile` returns null for missing or undecodable files; that is
    /// reported as a platform error rather than handed to `setBitmap`.
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let path_str = path.to_string_lossy();

        tracing::info!(path = %path_str, "Android: setting wallpaper");

        let j_path: JString = env
            .new_string(path_str.as_ref())
            .map_err(|e| jni_err(&mut env, "new_string(path)", e))?;

        let bitmap = match env.call_static_method(
            "android/graphics/BitmapFactory",
            "decodeFile",
            "(Ljava/lang/String;)Landroid/graphics/Bitmap;",
            &[JValue::Object(&j_path)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "decodeFile->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "BitmapFactory.decodeFile", e)),
        };
        if bitmap.is_null() {
            return Err(BridgeError::Platform(format!(
                "Unable to decode image at {path_str}"
            )));
        }

        let manager = match env.call_static_method(
            "android/app/WallpaperManager",
            "getInstance",
            "(Landroid/content/Context;)Landroid/app/WallpaperManager;",
            &[JValue::Object(&activity)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getInstance->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "WallpaperManager.getInstance", e)),
        };

        if let Err(e) = env.call_method(
            &manager,
            "setBitmap",
            "(Landroid/graphics/Bitmap;)V",
            &[JValue::Object(&bitmap)],
        ) {
            return Err(jni_err(&mut env, "WallpaperManager.setBitmap", e));
        }

        tracing::info!(path = %path_str, "Android: wallpaper set");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MediaScanner — android.media.MediaScannerConnection
// ---------------------------------------------------------------------------

impl MediaScanner for AndroidBridge {
    /// `MediaScannerConnection.scanFile(activity, new String[] { path }, null, null)`
    ///
    /// The scan completes asynchronously on the platform side; the outcome
    /// records the path that was submitted.
    fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let path_str = path.to_string_lossy().into_owned();

        tracing::info!(path = %path_str, "Android: requesting media scan");

        let j_path: JString = env
            .new_string(&path_str)
            .map_err(|e| jni_err(&mut env, "new_string(path)", e))?;

        let string_class = env
            .find_class("java/lang/String")
            .map_err(|e| jni_err(&mut env, "find_class(String)", e))?;
        let paths = env
            .new_object_array(1, &string_class, &j_path)
            .map_err(|e| jni_err(&mut env, "new_object_array(paths)", e))?;

        let null_mimes = JObject::null();
        let null_listener = JObject::null();
        if let Err(e) = env.call_static_method(
            "android/media/MediaScannerConnection",
            "scanFile",
            "(Landroid/content/Context;[Ljava/lang/String;[Ljava/lang/String;\
             Landroid/media/MediaScannerConnection$OnScanCompletedListener;)V",
            &[
                JValue::Object(&activity),
                JValue::Object(&paths),
                JValue::Object(&null_mimes),
                JValue::Object(&null_listener),
            ],
        ) {
            return Err(jni_err(&mut env, "MediaScannerConnection.scanFile", e));
        }

        tracing::info!(path = %path_str, "Android: media scan submitted");
        Ok(ScanOutcome {
            path: Some(path_str),
            uri: None,
        })
    }
}

// ---------------------------------------------------------------------------
// SocialShare — Intent.ACTION_SEND chooser
// ---------------------------------------------------------------------------

impl SocialShare for AndroidBridge {
    /// Launch a chooser for an `ACTION_SEND` intent carrying the image URL as
    /// `EXTRA_TEXT`, so any installed social app can pick it up.
    fn share_image_url(&self, url: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(url, "Android: launching share intent");

        let j_action: JString = env
            .new_string("android.intent.action.SEND")
            .map_err(|e| jni_err(&mut env, "new_string(ACTION_SEND)", e))?;

        let intent: JObject = env
            .new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&j_action)],
            )
            .map_err(|e| jni_err(&mut env, "new Intent(SEND)", e))?;

        let j_mime: JString = env
            .new_string("text/plain")
            .map_err(|e| jni_err(&mut env, "new_string(mime)", e))?;

        if let Err(e) = env.call_method(
            &intent,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_mime)],
        ) {
            return Err(jni_err(&mut env, "setType(share)", e));
        }

        let j_extra_text: JString = env
            .new_string("android.intent.extra.TEXT")
            .map_err(|e| jni_err(&mut env, "new_string(EXTRA_TEXT)", e))?;
        let j_url: JString = env
            .new_string(url)
            .map_err(|e| jni_err(&mut env, "new_string(url)", e))?;

        if let Err(e) = env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_extra_text), JValue::Object(&j_url)],
        ) {
            return Err(jni_err(&mut env, "putExtra(EXTRA_TEXT)", e));
        }

        let j_title: JString = env
            .new_string("Share image")
            .map_err(|e| jni_err(&mut env, "new_string(chooser_title)", e))?;

        let chooser = match env.call_static_method(
            "android/content/Intent",
            "createChooser",
            "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
            &[JValue::Object(&intent), JValue::Object(&j_title)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "createChooser->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "Intent.createChooser", e)),
        };

        if let Err(e) = env.call_method(
            &activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&chooser)],
        ) {
            return Err(jni_err(&mut env, "startActivity(share)", e));
        }

        tracing::info!(url, "Android: share intent dispatched");
        Ok(())
    }
}
