use std::net::IpAddr;
use std::time::Duration;

/// Latency recorded for an unreachable or unreliable address.
pub const SENTINEL_LATENCY_MS: u32 = 9999;

/// Candidates slower than this never enter a ranked pool.
pub const MAX_RANKABLE_LATENCY_MS: u32 = 999;

/// Loss rate at which a measurement is discarded, and above which the
/// selector refuses a candidate.
pub const LOSS_CUTOFF: f64 = 0.35;

/// A probed address with its latency and loss measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub address: IpAddr,
    pub latency_ms: u32,
    pub loss_rate: f64,
}

impl Candidate {
    /// A fully-failed measurement.
    pub fn unreachable(address: IpAddr) -> Self {
        Self {
            address,
            latency_ms: SENTINEL_LATENCY_MS,
            loss_rate: 1.0,
        }
    }

    /// Builds a candidate from raw probe results.
    ///
    /// `rtts` holds the round-trip time of every answered sample, `sent` is
    /// the number of samples attempted. High loss collapses to the sentinel
    /// because the remaining RTTs are not representative.
    pub fn from_samples(address: IpAddr, rtts: &[Duration], sent: usize) -> Self {
        if sent == 0 || rtts.is_empty() {
            return Self::unreachable(address);
        }

        let lost = sent.saturating_sub(rtts.len());
        let loss_rate = lost as f64 / sent as f64;
        if loss_rate >= LOSS_CUTOFF {
            return Self::unreachable(address);
        }

        let total_ms: f64 = rtts.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
        let mean_ms = (total_ms / rtts.len() as f64).round();

        Self {
            address,
            latency_ms: (mean_ms as u32).min(SENTINEL_LATENCY_MS),
            loss_rate: round_loss(loss_rate),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.latency_ms >= SENTINEL_LATENCY_MS
    }

    pub fn is_rankable(&self) -> bool {
        self.latency_ms <= MAX_RANKABLE_LATENCY_MS
    }

    pub fn is_selectable(&self) -> bool {
        self.loss_rate <= LOSS_CUTOFF
    }
}

impl AsRef<Candidate> for Candidate {
    fn as_ref(&self) -> &Candidate {
        self
    }
}

fn round_loss(loss: f64) -> f64 {
    (loss * 100.0).round() / 100.0
}
