use std::sync::Arc;

use crate::candidate::Candidate;
use crate::candidate_source::CandidateSource;

/// A ranked candidate together with the feed entry it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub candidate: Candidate,
    pub source: Arc<CandidateSource>,
}

impl PoolEntry {
    pub fn new(candidate: Candidate, source: Arc<CandidateSource>) -> Self {
        Self { candidate, source }
    }
}

impl AsRef<Candidate> for PoolEntry {
    fn as_ref(&self) -> &Candidate {
        &self.candidate
    }
}

/// Candidates ordered best-first: ascending latency, ties in feed order.
#[derive(Debug, Clone, Default)]
pub struct RankedPool {
    entries: Vec<PoolEntry>,
}

impl RankedPool {
    /// Merges per-source rankings. Sources keep their feed order and
    /// candidates keep their rank order, so the stable sort only moves
    /// entries with strictly different latency.
    pub fn from_ranked(ranked: Vec<(Arc<CandidateSource>, Vec<Candidate>)>) -> Self {
        let mut entries: Vec<PoolEntry> = ranked
            .into_iter()
            .flat_map(|(source, candidates)| {
                candidates
                    .into_iter()
                    .map(move |candidate| PoolEntry::new(candidate, Arc::clone(&source)))
            })
            .collect();

        entries.sort_by_key(|entry| entry.candidate.latency_ms);
        Self { entries }
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
