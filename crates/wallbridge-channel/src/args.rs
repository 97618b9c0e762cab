// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Argument decoding: loosely-typed `Value` payloads into per-command structs.
//
// Decoding is total. Every shape the application layer can send either yields
// a `CommandArgs` or an `InvalidArgument` naming the offending field; nothing
// invalid reaches a handler.

use wallbridge_core::error::{BridgeError, Result};
use wallbridge_core::{BridgeConfig, Command, Value};

const LIST_REQUIRED: &str = "Arguments must be a list and not null";
const MAP_REQUIRED: &str = "Arguments must be a map and not null";
const URL_REQUIRED: &str = "Image URL cannot be null";

/// Relative path under private storage, as a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    pub fn new(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            return Err(BridgeError::invalid("Path segments must not be empty"));
        }
        Ok(Self(segments))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn decode(value: Value) -> Result<Self> {
        let Value::List(items) = value else {
            return Err(BridgeError::invalid(LIST_REQUIRED));
        };
        let segments = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(BridgeError::invalid("Path segments must be strings")),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }
}

/// Absolute http(s) URL of a remote image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(BridgeError::invalid(URL_REQUIRED));
        }
        let valid = url.split_once("://").is_some_and(|(scheme, rest)| {
            (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
                && !rest.is_empty()
                && !rest.starts_with('/')
                && !rest.chars().any(char::is_whitespace)
        });
        if !valid {
            return Err(BridgeError::invalid(
                "Image URL must be an absolute http(s) URL",
            ));
        }
        Ok(Self(url.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::String(raw) => Self::parse(&raw),
            _ => Err(BridgeError::invalid(URL_REQUIRED)),
        }
    }
}

/// Validated `resizeImage` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeArgs {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ResizeArgs {
    /// Fields are checked in the order width, height, bytes.
    fn decode(value: Value, max_dimension: u32) -> Result<Self> {
        let Value::Map(mut map) = value else {
            return Err(BridgeError::invalid(MAP_REQUIRED));
        };
        let width = dimension(map.get("width"), "width", max_dimension)?;
        let height = dimension(map.get("height"), "height", max_dimension)?;
        let bytes = match map.remove("bytes") {
            None | Some(Value::Null) => return Err(BridgeError::invalid("bytes cannot be null")),
            Some(Value::Bytes(bytes)) => bytes,
            Some(_) => return Err(BridgeError::invalid("bytes must be binary data")),
        };
        Ok(Self {
            bytes,
            width,
            height,
        })
    }
}

fn dimension(value: Option<&Value>, field: &str, max: u32) -> Result<u32> {
    let n = match value {
        None | Some(Value::Null) => {
            return Err(BridgeError::invalid(format!("{field} cannot be null")));
        }
        Some(Value::Int(n)) => *n,
        Some(_) => return Err(BridgeError::invalid(format!("{field} must be an integer"))),
    };
    if n <= 0 {
        return Err(BridgeError::invalid(format!(
            "{field} must be a positive integer"
        )));
    }
    match u32::try_from(n) {
        Ok(n) if n <= max => Ok(n),
        _ => Err(BridgeError::invalid(format!("{field} must not exceed {max}"))),
    }
}

/// Strongly-typed arguments for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgs {
    SetWallpaper(PathSegments),
    ScanFile(PathSegments),
    ShareImage(ImageUrl),
    Resize(ResizeArgs),
}

impl CommandArgs {
    /// Decode `arguments` for `command`.
    pub fn decode(command: Command, arguments: Value, config: &BridgeConfig) -> Result<Self> {
        match command {
            Command::SetWallpaper => PathSegments::decode(arguments).map(Self::SetWallpaper),
            Command::ScanFile => PathSegments::decode(arguments).map(Self::ScanFile),
            Command::ShareImageToFacebook => ImageUrl::decode(arguments).map(Self::ShareImage),
            Command::ResizeImage => {
                ResizeArgs::decode(arguments, config.max_dimension).map(Self::Resize)
            }
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Self::SetWallpaper(_) => Command::SetWallpaper,
            Self::ScanFile(_) => Command::ScanFile,
            Self::ShareImage(_) => Command::ShareImageToFacebook,
            Self::Resize(_) => Command::ResizeImage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(command: Command, arguments: Value) -> Result<CommandArgs> {
        CommandArgs::decode(command, arguments, &BridgeConfig::default())
    }

    fn message(result: Result<CommandArgs>) -> String {
        match result {
            Err(BridgeError::InvalidArgument(msg)) => msg,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    fn resize_map(entries: Vec<(&str, Value)>) -> Value {
        entries.into_iter().collect()
    }

    #[test]
    fn path_commands_require_a_list() {
        for command in [Command::SetWallpaper, Command::ScanFile] {
            assert_eq!(message(decode(command, Value::Null)), LIST_REQUIRED);
            assert_eq!(message(decode(command, Value::from("a.png"))), LIST_REQUIRED);
        }
    }

    #[test]
    fn path_segments_decode() {
        let args = decode(
            Command::ScanFile,
            Value::from(vec![Value::from("pics"), Value::from("a.png")]),
        )
        .unwrap();
        match args {
            CommandArgs::ScanFile(segments) => {
                assert_eq!(segments.as_slice(), &["pics", "a.png"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn path_segments_must_be_strings_and_non_empty() {
        let mixed = Value::from(vec![Value::from("pics"), Value::Int(3)]);
        assert_eq!(
            message(decode(Command::SetWallpaper, mixed)),
            "Path segments must be strings"
        );
        assert_eq!(
            message(decode(Command::SetWallpaper, Value::List(vec![]))),
            "Path segments must not be empty"
        );
    }

    #[test]
    fn share_requires_url() {
        assert_eq!(
            message(decode(Command::ShareImageToFacebook, Value::Null)),
            URL_REQUIRED
        );
        assert_eq!(
            message(decode(Command::ShareImageToFacebook, Value::from("   "))),
            URL_REQUIRED
        );
        assert_eq!(
            message(decode(Command::ShareImageToFacebook, Value::from("not a url"))),
            "Image URL must be an absolute http(s) URL"
        );
        assert!(decode(Command::ShareImageToFacebook, Value::from("ftp://host/a.png")).is_err());
    }

    #[test]
    fn share_accepts_http_urls() {
        let args = decode(
            Command::ShareImageToFacebook,
            Value::from(" https://images.example.com/a.jpg "),
        )
        .unwrap();
        assert_eq!(
            args,
            CommandArgs::ShareImage(ImageUrl("https://images.example.com/a.jpg".into()))
        );
    }

    #[test]
    fn resize_requires_a_map() {
        assert_eq!(message(decode(Command::ResizeImage, Value::Null)), MAP_REQUIRED);
    }

    #[test]
    fn resize_field_order_is_width_height_bytes() {
        let nothing = resize_map(vec![]);
        assert_eq!(message(decode(Command::ResizeImage, nothing)), "width cannot be null");

        let no_height = resize_map(vec![("width", Value::Int(10))]);
        assert_eq!(
            message(decode(Command::ResizeImage, no_height)),
            "height cannot be null"
        );

        let no_bytes = resize_map(vec![("width", Value::Int(10)), ("height", Value::Int(10))]);
        assert_eq!(message(decode(Command::ResizeImage, no_bytes)), "bytes cannot be null");
    }

    #[test]
    fn each_missing_field_is_reported_alone() {
        let full = || {
            vec![
                ("width", Value::Int(10)),
                ("height", Value::Int(20)),
                ("bytes", Value::Bytes(vec![1, 2, 3])),
            ]
        };
        for field in ["width", "height", "bytes"] {
            let entries = full().into_iter().filter(|(k, _)| *k != field).collect();
            assert_eq!(
                message(decode(Command::ResizeImage, resize_map(entries))),
                format!("{field} cannot be null")
            );
        }
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let value = resize_map(vec![("width", Value::Null), ("height", Value::Int(1))]);
        assert_eq!(message(decode(Command::ResizeImage, value)), "width cannot be null");
    }

    #[test]
    fn resize_rejects_bad_dimensions() {
        let wrong_type = resize_map(vec![("width", Value::from("100"))]);
        assert_eq!(
            message(decode(Command::ResizeImage, wrong_type)),
            "width must be an integer"
        );

        let zero = resize_map(vec![("width", Value::Int(10)), ("height", Value::Int(0))]);
        assert_eq!(
            message(decode(Command::ResizeImage, zero)),
            "height must be a positive integer"
        );

        let huge = resize_map(vec![("width", Value::Int(1 << 40))]);
        assert_eq!(
            message(decode(Command::ResizeImage, huge)),
            "width must not exceed 8192"
        );
    }

    #[test]
    fn resize_rejects_non_binary_bytes() {
        let value = resize_map(vec![
            ("width", Value::Int(10)),
            ("height", Value::Int(10)),
            ("bytes", Value::from("iVBORw0KGgo=")),
        ]);
        assert_eq!(
            message(decode(Command::ResizeImage, value)),
            "bytes must be binary data"
        );
    }

    #[test]
    fn resize_decodes() {
        let value = resize_map(vec![
            ("width", Value::Int(64)),
            ("height", Value::Int(32)),
            ("bytes", Value::Bytes(vec![9, 9])),
        ]);
        let args = decode(Command::ResizeImage, value).unwrap();
        assert_eq!(args.command(), Command::ResizeImage);
        assert_eq!(
            args,
            CommandArgs::Resize(ResizeArgs {
                bytes: vec![9, 9],
                width: 64,
                height: 32,
            })
        );
    }
}
