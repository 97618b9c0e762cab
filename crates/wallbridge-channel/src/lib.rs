// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wallbridge-channel — The command side of the bridge.
//
// A named method channel receives `(method, arguments)` pairs from the
// application layer. The router decodes the loosely-typed arguments into a
// typed `CommandArgs`, runs the matching handler on the blocking pool, and
// answers through a single-use `ReplySender`.

pub mod args;
pub mod channel;
pub mod handlers;
pub mod logging;
pub mod paths;
pub mod reply;
pub mod router;

pub use args::{CommandArgs, ImageUrl, PathSegments, ResizeArgs};
pub use channel::{ChannelHandle, MethodCall, MethodChannel};
pub use reply::{ReplyReceiver, ReplySender};
pub use router::CommandRouter;
