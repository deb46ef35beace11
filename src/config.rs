use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub docker: DockerConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub logs: LogWindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    /// Name of the game-server container this panel manages.
    pub container_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory the game writes .sav files into (shared volume).
    pub saved_dir: String,
    /// Root directory backup snapshots are created under.
    pub backups_dir: String,
}

/// Trailing-window sizes for log queries. Player tracking is inferred from a
/// log window, so `player_scan_window` bounds how far back connect events are
/// visible; too small a window under-reports online players.
#[derive(Debug, Clone, Deserialize)]
pub struct LogWindowConfig {
    #[serde(default = "default_log_tail")]
    pub default_tail: u64,
    #[serde(default = "default_snapshot_tail")]
    pub snapshot_tail: u64,
    #[serde(default = "default_player_scan_window")]
    pub player_scan_window: u64,
    #[serde(default = "default_download_tail")]
    pub download_default_tail: u64,
    #[serde(default = "default_download_max_tail")]
    pub download_max_tail: u64,
}

fn default_log_tail() -> u64 {
    100
}

fn default_snapshot_tail() -> u64 {
    20
}

fn default_player_scan_window() -> u64 {
    500
}

fn default_download_tail() -> u64 {
    1000
}

fn default_download_max_tail() -> u64 {
    10000
}

impl Default for LogWindowConfig {
    fn default() -> Self {
        Self {
            default_tail: default_log_tail(),
            snapshot_tail: default_snapshot_tail(),
            player_scan_window: default_player_scan_window(),
            download_default_tail: default_download_tail(),
            download_max_tail: default_download_max_tail(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.docker.container_name.is_empty(),
            "docker.container_name must be non-empty"
        );
        anyhow::ensure!(
            !self.data.saved_dir.is_empty(),
            "data.saved_dir must be non-empty"
        );
        anyhow::ensure!(
            !self.data.backups_dir.is_empty(),
            "data.backups_dir must be non-empty"
        );
        anyhow::ensure!(
            self.logs.default_tail > 0,
            "logs.default_tail must be > 0, got {}",
            self.logs.default_tail
        );
        anyhow::ensure!(
            self.logs.snapshot_tail > 0,
            "logs.snapshot_tail must be > 0, got {}",
            self.logs.snapshot_tail
        );
        anyhow::ensure!(
            self.logs.player_scan_window > 0,
            "logs.player_scan_window must be > 0, got {}",
            self.logs.player_scan_window
        );
        anyhow::ensure!(
            self.logs.download_default_tail > 0,
            "logs.download_default_tail must be > 0, got {}",
            self.logs.download_default_tail
        );
        anyhow::ensure!(
            self.logs.download_max_tail >= self.logs.download_default_tail,
            "logs.download_max_tail must be >= logs.download_default_tail, got {}",
            self.logs.download_max_tail
        );
        Ok(())
    }
}
