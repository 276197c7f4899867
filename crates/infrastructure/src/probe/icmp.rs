//! ICMP echo prober.
//!
//! One raw (or unprivileged datagram) socket per address family is opened
//! when the prober is built and shared by every probe task. Opening a
//! socket usually needs `CAP_NET_RAW`; when that fails the prober still
//! works but reports every address of that family as unreachable.

use async_trait::async_trait;
use ferrous_failover_application::ports::Prober;
use ferrous_failover_domain::Candidate;
use std::net::IpAddr;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, ICMP};
use tracing::{debug, warn};

use super::ProbeTiming;

const PAYLOAD: [u8; 56] = [0; 56];

pub struct IcmpProber {
    v4: Option<Client>,
    v6: Option<Client>,
    timing: ProbeTiming,
}

impl IcmpProber {
    /// Must be called from within a Tokio runtime.
    pub fn new(timing: ProbeTiming) -> Self {
        let v4 = match Client::new(&Config::default()) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Cannot open ICMPv4 socket, IPv4 candidates will be unreachable");
                None
            }
        };

        let v6 = match Client::new(&Config::builder().kind(ICMP::V6).build()) {
            Ok(client) => Some(client),
            Err(e) => {
                debug!(error = %e, "Cannot open ICMPv6 socket");
                None
            }
        };

        Self { v4, v6, timing }
    }

    fn client_for(&self, address: &IpAddr) -> Option<&Client> {
        match address {
            IpAddr::V4(_) => self.v4.as_ref(),
            IpAddr::V6(_) => self.v6.as_ref(),
        }
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, address: IpAddr, samples: u16) -> Candidate {
        let Some(client) = self.client_for(&address) else {
            return Candidate::unreachable(address);
        };

        let mut pinger = client.pinger(address, PingIdentifier(fastrand::u16(..))).await;
        pinger.timeout(self.timing.timeout);

        let mut rtts = Vec::with_capacity(samples as usize);
        for seq in 0..samples {
            if seq > 0 && !self.timing.interval.is_zero() {
                tokio::time::sleep(self.timing.interval).await;
            }

            match pinger.ping(PingSequence(seq), &PAYLOAD).await {
                Ok((_packet, rtt)) => rtts.push(rtt),
                Err(e) => debug!(address = %address, seq, error = %e, "Echo lost"),
            }
        }

        Candidate::from_samples(address, &rtts, samples as usize)
    }
}
