// Game-server container control via bollard

mod inspect;

pub use inspect::{container_info_from_inspect, parse_env};

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bollard::Docker;
use bollard::exec::{CreateExecOptions, StartExecOptions};
use bollard::query_parameters::{ListContainersOptions, LogsOptions};
use futures_util::StreamExt;
use tracing::warn;

use crate::models::{ActionResult, HealthState, ServerStatus};

/// Process-boundary failure; only foundational queries surface it.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("container runtime unavailable: {0}")]
    Runtime(#[from] bollard::errors::Error),
    /// Boundary implementations other than Docker (fakes, future managers)
    /// report failures as plain text.
    #[error("{0}")]
    Unavailable(String),
}

/// The external process-management boundary for the one managed server.
///
/// The controller only observes and signals through this trait; it never
/// manipulates the process directly. Implemented by [`DockerServerRepo`] in
/// production and by scripted fakes in tests.
#[async_trait]
pub trait ServerBoundary: Send + Sync {
    /// Liveness + health snapshot. A failed liveness query is a hard error;
    /// a failed secondary inspect only omits `container_info`.
    async fn status(&self) -> Result<ServerStatus, BoundaryError>;

    /// Last `limit` log lines, oldest first; `0` means the entire retained
    /// history. Boundary errors degrade to an empty window (logs are
    /// diagnostic, not critical path).
    async fn logs(&self, limit: u64) -> Vec<String>;

    async fn start(&self) -> ActionResult;
    async fn stop(&self) -> ActionResult;
    async fn restart(&self) -> ActionResult;

    /// Best-effort save nudge. There is no command channel into the game, so
    /// this carries no confirmation that durable state was written and its
    /// message must say so.
    async fn save_signal(&self) -> ActionResult;

    /// The container's environment as key/value pairs; entries without `=`
    /// map to `None`. Degrades to an empty map on boundary error.
    async fn environment(&self) -> BTreeMap<String, Option<String>>;
}

pub struct DockerServerRepo {
    docker: Docker,
    container_name: String,
}

impl DockerServerRepo {
    pub fn connect(container_name: impl Into<String>) -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self {
            docker,
            container_name: container_name.into(),
        })
    }

    /// Secondary inspect call; never blocks or fails the status result.
    async fn inspect_info(&self) -> Option<crate::models::ContainerInfo> {
        match self
            .docker
            .inspect_container(&self.container_name, None)
            .await
        {
            Ok(details) => Some(container_info_from_inspect(details)),
            Err(e) => {
                warn!("Container inspect for {} failed: {}", self.container_name, e);
                None
            }
        }
    }

    async fn lifecycle(
        &self,
        verb: &str,
        done: &str,
        call: impl std::future::Future<Output = Result<(), bollard::errors::Error>> + Send,
    ) -> ActionResult {
        match call.await {
            Ok(()) => ActionResult::ok(format!("Server {done} successfully")),
            Err(e) => {
                warn!("Server {} failed: {}", verb, e);
                ActionResult::failure(e.to_string())
            }
        }
    }
}

#[async_trait]
impl ServerBoundary for DockerServerRepo {
    async fn status(&self) -> Result<ServerStatus, BoundaryError> {
        // Running-only listing, like `docker ps`: no match means stopped.
        let mut filters = HashMap::new();
        filters.insert("name".to_string(), vec![self.container_name.clone()]);
        let options = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;

        // The name filter is a substring match; pin it down to an exact one.
        let matched = containers.iter().find(|c| {
            c.names.as_ref().is_some_and(|names| {
                names
                    .iter()
                    .any(|n| n.trim_start_matches('/') == self.container_name)
            })
        });

        let (running, state, uptime) = match matched {
            Some(c) => {
                let status_text = c.status.clone().unwrap_or_default();
                (
                    true,
                    HealthState::from_status_text(&status_text),
                    status_text,
                )
            }
            None => (false, HealthState::Stopped, "N/A".to_string()),
        };

        Ok(ServerStatus {
            running,
            state,
            uptime,
            container_info: self.inspect_info().await,
        })
    }

    async fn logs(&self, limit: u64) -> Vec<String> {
        let options = LogsOptions {
            stdout: true,
            stderr: true,
            tail: if limit == 0 {
                "all".to_string()
            } else {
                limit.to_string()
            },
            ..Default::default()
        };
        let mut stream = self.docker.logs(&self.container_name, Some(options));

        let mut raw = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(output) => {
                    raw.push_str(&String::from_utf8_lossy(&output.into_bytes()));
                }
                Err(e) => {
                    warn!("Log fetch for {} failed: {}", self.container_name, e);
                    return Vec::new();
                }
            }
        }

        raw.lines()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    async fn start(&self) -> ActionResult {
        self.lifecycle(
            "start",
            "started",
            self.docker.start_container(&self.container_name, None),
        )
        .await
    }

    async fn stop(&self) -> ActionResult {
        self.lifecycle(
            "stop",
            "stopped",
            self.docker.stop_container(&self.container_name, None),
        )
        .await
    }

    async fn restart(&self) -> ActionResult {
        self.lifecycle(
            "restart",
            "restarted",
            self.docker.restart_container(&self.container_name, None),
        )
        .await
    }

    async fn save_signal(&self) -> ActionResult {
        // No RCON channel exists; exec an inert command so the attempt at
        // least proves the container accepts commands.
        let exec = CreateExecOptions {
            cmd: Some(vec!["echo".to_string(), "Saving game...".to_string()]),
            ..Default::default()
        };
        let started = match self
            .docker
            .create_exec(&self.container_name, exec)
            .await
        {
            Ok(created) => {
                self.docker
                    .start_exec(
                        &created.id,
                        Some(StartExecOptions {
                            detach: true,
                            ..Default::default()
                        }),
                    )
                    .await
            }
            Err(e) => Err(e),
        };

        match started {
            Ok(_) => ActionResult::ok(
                "Save command sent to server. Note: without a game command channel \
                 there is no confirmation that a save was written.",
            ),
            Err(e) => {
                warn!("Save signal to {} failed: {}", self.container_name, e);
                ActionResult::failure(format!(
                    "Failed to send save command: {e}. Game saving requires a command channel."
                ))
            }
        }
    }

    async fn environment(&self) -> BTreeMap<String, Option<String>> {
        match self
            .docker
            .inspect_container(&self.container_name, None)
            .await
        {
            Ok(details) => {
                let env = details
                    .config
                    .and_then(|c| c.env)
                    .unwrap_or_default();
                parse_env(&env)
            }
            Err(e) => {
                warn!(
                    "Environment inspect for {} failed: {}",
                    self.container_name, e
                );
                BTreeMap::new()
            }
        }
    }
}
