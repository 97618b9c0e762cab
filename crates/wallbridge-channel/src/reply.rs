// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-use reply delivery.

use tokio::sync::oneshot;
use tracing::{debug, warn};
use wallbridge_core::Reply;

/// Receiving half for a reply produced by [`ReplySender::channel`].
pub type ReplyReceiver = oneshot::Receiver<Reply>;

type Callback = Box<dyn FnOnce(Reply) + Send + 'static>;

enum Target {
    Oneshot(oneshot::Sender<Reply>),
    Callback(Callback),
}

/// Delivers the result of one command invocation.
///
/// `send` consumes the sender, so a second reply cannot be written. If a
/// sender is dropped without replying, an error reply is delivered in its
/// place, so the caller always gets exactly one result.
pub struct ReplySender {
    target: Option<Target>,
}

impl ReplySender {
    /// Reply through a oneshot channel.
    pub fn channel() -> (Self, ReplyReceiver) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                target: Some(Target::Oneshot(tx)),
            },
            rx,
        )
    }

    /// Reply by invoking `callback` once, on whichever thread finishes the work.
    pub fn from_fn(callback: impl FnOnce(Reply) + Send + 'static) -> Self {
        Self {
            target: Some(Target::Callback(Box::new(callback))),
        }
    }

    /// Deliver `reply`. A caller that stopped listening is not an error.
    pub fn send(mut self, reply: Reply) {
        if let Some(target) = self.target.take() {
            deliver(target, reply);
        }
    }
}

impl Drop for ReplySender {
    fn drop(&mut self) {
        if let Some(target) = self.target.take() {
            warn!("reply sender dropped without a result");
            deliver(target, Reply::error("Command finished without a result"));
        }
    }
}

impl std::fmt::Debug for ReplySender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.target {
            Some(Target::Oneshot(_)) => "oneshot",
            Some(Target::Callback(_)) => "callback",
            None => "sent",
        };
        f.debug_struct("ReplySender").field("target", &kind).finish()
    }
}

fn deliver(target: Target, reply: Reply) {
    match target {
        Target::Oneshot(tx) => {
            if tx.send(reply).is_err() {
                debug!("reply receiver dropped before the result arrived");
            }
        }
        Target::Callback(callback) => callback(reply),
    }
}
