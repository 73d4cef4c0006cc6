use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use anyhow::Result;

use crate::domains::navigation::{GoalPoseBuilder, Quaternion};

/// Prefix for environment overrides, e.g. `GOAL_SENDER__EXECUTOR__MAX_READY_ATTEMPTS=3`.
pub const ENV_PREFIX: &str = "GOAL_SENDER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub executor: ExecutorConfig,
    pub dispatch: DispatchConfig,
    pub destinations: DestinationsConfig,
    pub logging: LoggingConfig,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub name: String,
    pub ready_timeout_secs: u64,
    pub max_ready_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub frame_id: String,
    pub orientation: Quaternion,
    pub command_capacity: usize,
    pub event_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationsConfig {
    pub landmarks_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub buffer_capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub drive_time_ms: u64,
    pub failure_rate: f64,
    pub ready_after_polls: u32,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Layer an optional config file with `GOAL_SENDER__*` environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl ExecutorConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }
}

impl DispatchConfig {
    pub fn pose_builder(&self) -> GoalPoseBuilder {
        GoalPoseBuilder::new(self.frame_id.clone(), self.orientation)
    }
}

impl SimulatorConfig {
    pub fn drive_time(&self) -> Duration {
        Duration::from_millis(self.drive_time_ms)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            name: "move_base".to_string(),
            ready_timeout_secs: 5,
            max_ready_attempts: 12,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            frame_id: "map".to_string(),
            orientation: Quaternion::default(),
            command_capacity: 1000,
            event_capacity: 100,
        }
    }
}

impl Default for DestinationsConfig {
    fn default() -> Self {
        Self {
            landmarks_path: "landmarks.txt".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            buffer_capacity: None,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            drive_time_ms: 1500,
            failure_rate: 0.0,
            ready_after_polls: 0,
        }
    }
}
