use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub method: ProbeMethod,

    /// Samples per candidate address while ranking.
    #[serde(default = "default_samples")]
    pub samples: u16,

    /// Samples when measuring a target's current address.
    #[serde(default = "default_host_samples")]
    pub host_samples: u16,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,

    /// Port used by the `tcp` method.
    #[serde(default = "default_tcp_port")]
    pub tcp_port: u16,

    /// Targets at or below this latency are left alone.
    #[serde(default = "default_latency_threshold_ms")]
    pub latency_threshold_ms: u32,

    /// Upper bound on concurrent probe tasks; unbounded when absent.
    #[serde(default)]
    pub max_parallel: Option<usize>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    #[default]
    Icmp,

    Tcp,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Icmp => "icmp",
            Self::Tcp => "tcp",
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            method: ProbeMethod::default(),
            samples: default_samples(),
            host_samples: default_host_samples(),
            timeout_ms: default_timeout_ms(),
            sample_interval_ms: default_sample_interval_ms(),
            tcp_port: default_tcp_port(),
            latency_threshold_ms: default_latency_threshold_ms(),
            max_parallel: None,
        }
    }
}

fn default_samples() -> u16 {
    4
}

fn default_host_samples() -> u16 {
    10
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_sample_interval_ms() -> u64 {
    100
}

fn default_tcp_port() -> u16 {
    443
}

fn default_latency_threshold_ms() -> u32 {
    200
}
