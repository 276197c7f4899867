pub mod icmp;
pub mod tcp;

pub use icmp::IcmpProber;
pub use tcp::TcpConnectProber;

use std::time::Duration;

/// Timing shared by every prober.
#[derive(Debug, Clone, Copy)]
pub struct ProbeTiming {
    /// Budget for one sample.
    pub timeout: Duration,
    /// Pause between consecutive samples of the same address.
    pub interval: Duration,
}

impl ProbeTiming {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for ProbeTiming {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            interval: Duration::from_millis(100),
        }
    }
}
