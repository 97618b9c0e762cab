// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command router: method name + loosely-typed arguments in, exactly one reply out.
//
// Decoding happens synchronously on the caller's thread. Validation failures
// and unknown methods are answered before `dispatch` returns; everything else
// is handed to tokio's blocking pool and answered when the handler finishes.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, info, warn};
use wallbridge_bridge::traits::PlatformBridge;
use wallbridge_core::error::BridgeError;
use wallbridge_core::{BridgeConfig, Command, Reply, Value};

use crate::args::CommandArgs;
use crate::handlers;
use crate::reply::ReplySender;

/// Routes commands to handlers. Cheap to clone; clones share the bridge.
#[derive(Clone)]
pub struct CommandRouter {
    bridge: Arc<dyn PlatformBridge>,
    config: Arc<BridgeConfig>,
    runtime: Handle,
}

impl CommandRouter {
    pub fn new(bridge: Arc<dyn PlatformBridge>, config: BridgeConfig, runtime: Handle) -> Self {
        info!(
            platform = bridge.platform_name(),
            channel = %config.channel,
            policy = ?config.resize_policy,
            "Command router ready"
        );
        Self {
            bridge,
            config: Arc::new(config),
            runtime,
        }
    }

    /// Router over the platform bridge for the current target OS.
    pub fn for_platform(config: BridgeConfig, runtime: Handle) -> Self {
        let bridge = wallbridge_bridge::platform_bridge(&config);
        Self::new(bridge, config, runtime)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Decode and dispatch one invocation. `reply` receives exactly one result.
    ///
    /// Never blocks: platform and image work runs on the blocking pool.
    pub fn dispatch(&self, method: &str, arguments: Value, reply: ReplySender) {
        let command = match Command::parse(method) {
            Ok(command) => command,
            Err(err) => {
                debug!(method, "No handler registered");
                reply.send(Reply::from_result(Err(err)));
                return;
            }
        };

        let args = match CommandArgs::decode(command, arguments, &self.config) {
            Ok(args) => args,
            Err(err) => {
                warn!(%command, error = %err, "Rejected arguments");
                reply.send(Reply::from_result(Err(err)));
                return;
            }
        };

        debug!(%command, "Dispatching");
        let bridge = Arc::clone(&self.bridge);
        let config = Arc::clone(&self.config);
        let task = self
            .runtime
            .spawn_blocking(move || handlers::handle(bridge.as_ref(), &config, args));

        self.runtime.spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(join_err) => {
                    warn!(%command, error = %join_err, "Handler did not complete");
                    Err(BridgeError::Platform(format!(
                        "{command} handler did not complete"
                    )))
                }
            };
            if let Err(err) = &result {
                warn!(%command, error = %err, "Command failed");
            }
            reply.send(Reply::from_result(result));
        });
    }

    /// Dispatch and wait for the reply.
    pub async fn call(&self, method: &str, arguments: impl Into<Value>) -> Reply {
        let (reply, rx) = ReplySender::channel();
        self.dispatch(method, arguments.into(), reply);
        rx.await
            .unwrap_or_else(|_| Reply::error("Command finished without a result"))
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter")
            .field("platform", &self.bridge.platform_name())
            .field("config", &self.config)
            .finish()
    }
}
