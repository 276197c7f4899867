use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Source metadata applied when the feed is a single plain-text list.
    #[serde(default = "default_tls")]
    pub default_tls: bool,

    #[serde(default = "default_port")]
    pub default_port: u16,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            default_tls: default_tls(),
            default_port: default_port(),
        }
    }
}

fn default_url() -> String {
    "https://zip.baipiao.eu.org".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_tls() -> bool {
    true
}

fn default_port() -> u16 {
    443
}
