// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process method channel between the application layer and the router.
//
// The application layer holds a `ChannelHandle` and posts `MethodCall`s; a
// serving task drains the queue and dispatches each call to the router. The
// channel imposes no ordering between the results of different calls.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use wallbridge_core::{Reply, Value};

use crate::reply::ReplySender;
use crate::router::CommandRouter;

const CHANNEL_CLOSED: &str = "Method channel is closed";

/// One invocation travelling over the channel.
#[derive(Debug)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
    pub reply: ReplySender,
}

/// A named channel bound to a router.
pub struct MethodChannel {
    name: Arc<str>,
    router: CommandRouter,
}

impl MethodChannel {
    /// Bind a channel named after the router's configured channel.
    pub fn new(router: CommandRouter) -> Self {
        let name = Arc::from(router.config().channel.as_str());
        Self { name, router }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start serving on the router's runtime.
    ///
    /// `capacity` bounds the number of calls queued but not yet dispatched.
    /// The serving task ends once every handle has been dropped.
    pub fn serve(self, capacity: usize) -> (ChannelHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<MethodCall>(capacity.max(1));
        let name = Arc::clone(&self.name);
        let router = self.router;
        let runtime = router.runtime().clone();

        info!(channel = %name, capacity, "Method channel serving");
        let task = runtime.spawn(async move {
            while let Some(call) = rx.recv().await {
                debug!(method = %call.method, "Method call received");
                router.dispatch(&call.method, call.arguments, call.reply);
            }
            info!("Method channel closed");
        });

        (ChannelHandle { name, tx }, task)
    }
}

/// Sending side held by the application layer. Clone freely.
#[derive(Clone, Debug)]
pub struct ChannelHandle {
    name: Arc<str>,
    tx: mpsc::Sender<MethodCall>,
}

impl ChannelHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Post a call whose result is delivered to `reply`.
    ///
    /// If the channel has shut down, `reply` is answered with an error
    /// immediately.
    pub async fn post(&self, method: impl Into<String>, arguments: impl Into<Value>, reply: ReplySender) {
        let call = MethodCall {
            method: method.into(),
            arguments: arguments.into(),
            reply,
        };
        if let Err(mpsc::error::SendError(call)) = self.tx.send(call).await {
            call.reply.send(Reply::error(CHANNEL_CLOSED));
        }
    }

    /// Post a call and wait for its reply.
    pub async fn invoke(&self, method: impl Into<String>, arguments: impl Into<Value>) -> Reply {
        let (reply, rx) = ReplySender::channel();
        self.post(method, arguments, reply).await;
        rx.await.unwrap_or_else(|_| Reply::error(CHANNEL_CLOSED))
    }
}
