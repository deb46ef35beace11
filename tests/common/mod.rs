// Shared test helpers: a scripted process boundary

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ficsit_control::models::{ActionResult, HealthState, ServerStatus};
use ficsit_control::server_repo::{BoundaryError, ServerBoundary};

/// Scripted stand-in for the Docker boundary. Records every lifecycle call
/// and requested log window so tests can assert on them.
pub struct FakeBoundary {
    status: ServerStatus,
    fail_status: bool,
    logs: Vec<String>,
    env: BTreeMap<String, Option<String>>,
    pub actions: Mutex<Vec<String>>,
    pub log_requests: Mutex<Vec<u64>>,
}

impl FakeBoundary {
    pub fn running() -> Self {
        Self {
            status: ServerStatus {
                running: true,
                state: HealthState::Running,
                uptime: "Up 2 hours (healthy)".into(),
                container_info: None,
            },
            fail_status: false,
            logs: Vec::new(),
            env: BTreeMap::new(),
            actions: Mutex::new(Vec::new()),
            log_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn stopped() -> Self {
        Self {
            status: ServerStatus::stopped(),
            ..Self::running()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_status: true,
            ..Self::running()
        }
    }

    pub fn with_logs<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.logs = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, Option<String>>) -> Self {
        self.env = env;
        self
    }

    fn record(&self, action: &str) {
        self.actions.lock().unwrap().push(action.to_string());
    }
}

#[async_trait]
impl ServerBoundary for FakeBoundary {
    async fn status(&self) -> Result<ServerStatus, BoundaryError> {
        if self.fail_status {
            Err(BoundaryError::Unavailable(
                "docker daemon unreachable".into(),
            ))
        } else {
            Ok(self.status.clone())
        }
    }

    async fn logs(&self, limit: u64) -> Vec<String> {
        self.log_requests.lock().unwrap().push(limit);
        if limit == 0 || limit as usize >= self.logs.len() {
            self.logs.clone()
        } else {
            self.logs[self.logs.len() - limit as usize..].to_vec()
        }
    }

    async fn start(&self) -> ActionResult {
        self.record("start");
        ActionResult::ok("Server started successfully")
    }

    async fn stop(&self) -> ActionResult {
        self.record("stop");
        ActionResult::ok("Server stopped successfully")
    }

    async fn restart(&self) -> ActionResult {
        self.record("restart");
        ActionResult::ok("Server restarted successfully")
    }

    async fn save_signal(&self) -> ActionResult {
        self.record("save");
        ActionResult::ok(
            "Save command sent to server. Note: without a game command channel \
             there is no confirmation that a save was written.",
        )
    }

    async fn environment(&self) -> BTreeMap<String, Option<String>> {
        self.env.clone()
    }
}
