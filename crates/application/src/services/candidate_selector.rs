use ferrous_failover_domain::{Blocklist, Candidate};
use tracing::{debug, info};

/// Returns the first ranked candidate that is neither blocklisted nor
/// above the loss cutoff.
pub fn select<'a, C: AsRef<Candidate>>(ranked: &'a [C], blocklist: &Blocklist) -> Option<&'a C> {
    for item in ranked {
        let candidate = item.as_ref();
        if blocklist.contains(&candidate.address) {
            debug!(address = %candidate.address, "Skipping blocklisted candidate");
            continue;
        }
        if !candidate.is_selectable() {
            debug!(
                address = %candidate.address,
                loss_rate = candidate.loss_rate,
                "Skipping lossy candidate"
            );
            continue;
        }

        info!(
            address = %candidate.address,
            latency_ms = candidate.latency_ms,
            loss_rate = candidate.loss_rate,
            "Candidate selected"
        );
        return Some(item);
    }

    None
}
