// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Wallbridge command bridge.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Name of the method channel the application layer talks to.
pub const DEFAULT_CHANNEL: &str = "my_flutter_wallpaper";

/// Error code carried by every error reply.
pub const ERROR_CODE: &str = "error";

/// Success messages returned by the side-effecting commands.
pub const MSG_WALLPAPER_SET: &str = "Set wallpaper successfully";
pub const MSG_SCAN_COMPLETED: &str = "Scan completed";
pub const MSG_SHARE_SHOWN: &str = "Show share dialog";

/// The closed set of commands the bridge understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Set the device wallpaper from an image in private storage.
    #[serde(rename = "setWallpaper")]
    SetWallpaper,
    /// Ask the OS media indexer to rescan a file in private storage.
    #[serde(rename = "scanFile")]
    ScanFile,
    /// Open the native share sheet for a remote image URL.
    #[serde(rename = "shareImageToFacebook")]
    ShareImageToFacebook,
    /// Resize encoded image bytes and return them as PNG.
    #[serde(rename = "resizeImage")]
    ResizeImage,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::SetWallpaper,
        Command::ScanFile,
        Command::ShareImageToFacebook,
        Command::ResizeImage,
    ];

    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetWallpaper => "setWallpaper",
            Self::ScanFile => "scanFile",
            Self::ShareImageToFacebook => "shareImageToFacebook",
            Self::ResizeImage => "resizeImage",
        }
    }

    /// Look up a command by its wire name.
    pub fn parse(name: &str) -> Result<Self, BridgeError> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == name)
            .ok_or_else(|| BridgeError::NotImplemented(name.to_owned()))
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How `resizeImage` maps source dimensions onto the requested ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Scale both axes by the smaller of the two ratios so the result fits
    /// inside the target box. Output may be smaller than requested on one axis.
    #[default]
    Fit,
    /// Scale each axis independently to exactly the requested size.
    Stretch,
}

/// Resampling filter used when an image is actually rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

/// Successful outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SuccessValue {
    Message(String),
    Bytes(Vec<u8>),
}

impl SuccessValue {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}

/// Error outcome of a command as seen by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReply {
    pub code: String,
    pub message: String,
}

impl ErrorReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_CODE.to_owned(),
            message: message.into(),
        }
    }
}

impl From<&BridgeError> for ErrorReply {
    fn from(err: &BridgeError) -> Self {
        Self::new(err.to_string())
    }
}

/// The single result produced for every command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Success { value: SuccessValue },
    Error(ErrorReply),
    /// No handler is registered for the method name. Distinct from an error.
    NotImplemented,
}

impl Reply {
    pub fn success(value: SuccessValue) -> Self {
        Self::Success { value }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorReply::new(message))
    }

    /// Convert a handler outcome into the reply sent back over the channel.
    pub fn from_result(result: Result<SuccessValue, BridgeError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(BridgeError::NotImplemented(_)) => Self::NotImplemented,
            Err(err) => Self::Error(ErrorReply::from(&err)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error message, if this is an error reply.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(reply) => Some(&reply.message),
            _ => None,
        }
    }

    /// The success payload, if any.
    pub fn value(&self) -> Option<&SuccessValue> {
        match self {
            Self::Success { value } => Some(value),
            _ => None,
        }
    }
}
