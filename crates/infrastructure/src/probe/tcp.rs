use async_trait::async_trait;
use ferrous_failover_application::ports::Prober;
use ferrous_failover_domain::Candidate;
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;
use tokio::net::TcpStream;
use tracing::debug;

use super::ProbeTiming;

/// Measures TCP handshake time against a fixed port. Works without raw
/// socket privileges.
pub struct TcpConnectProber {
    port: u16,
    timing: ProbeTiming,
}

impl TcpConnectProber {
    pub fn new(port: u16, timing: ProbeTiming) -> Self {
        Self { port, timing }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, address: IpAddr, samples: u16) -> Candidate {
        let target = SocketAddr::new(address, self.port);
        let mut rtts = Vec::with_capacity(samples as usize);

        for seq in 0..samples {
            if seq > 0 && !self.timing.interval.is_zero() {
                tokio::time::sleep(self.timing.interval).await;
            }

            let start = Instant::now();
            match tokio::time::timeout(self.timing.timeout, TcpStream::connect(target)).await {
                Ok(Ok(stream)) => {
                    rtts.push(start.elapsed());
                    drop(stream);
                }
                Ok(Err(e)) => debug!(address = %target, seq, error = %e, "Connect failed"),
                Err(_) => debug!(address = %target, seq, "Connect timed out"),
            }
        }

        Candidate::from_samples(address, &rtts, samples as usize)
    }
}
