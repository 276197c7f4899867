use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,

    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Upper bound on publish/verify rounds per episode.
    #[serde(default = "default_max_episode_retries")]
    pub max_episode_retries: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            max_ticks: default_max_ticks(),
            health_timeout_secs: default_health_timeout_secs(),
            max_episode_retries: default_max_episode_retries(),
        }
    }
}

fn default_tick_secs() -> u64 {
    5
}

fn default_max_ticks() -> u32 {
    120
}

fn default_health_timeout_secs() -> u64 {
    30
}

fn default_max_episode_retries() -> u32 {
    10
}
