use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use crate::blocklist::Blocklist;
use crate::candidate_source::{FeedEntry, SourceFilter};
use crate::pool::{PoolEntry, RankedPool};
use crate::target::DomainTarget;

/// Identifies a ranked pool: targets sharing a filter and exclusion tag
/// share the same ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub source_filter: Option<SourceFilter>,
    pub exclude_tag: Option<String>,
}

impl PoolKey {
    pub fn for_target(target: &DomainTarget) -> Self {
        Self {
            source_filter: target.source_filter.clone(),
            exclude_tag: target.exclusion_tag().map(str::to_string),
        }
    }
}

/// State shared by every episode of one run: the downloaded feed, ranked
/// pools, the blocklist and the per-domain selection slots.
#[derive(Debug, Default)]
pub struct FailoverSession {
    feed: Option<Arc<Vec<FeedEntry>>>,
    pools: HashMap<PoolKey, Arc<RankedPool>>,
    blocklist: Blocklist,
    selections: HashMap<String, PoolEntry>,
}

impl FailoverSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocklist(blocklist: Blocklist) -> Self {
        Self {
            blocklist,
            ..Self::default()
        }
    }

    pub fn feed(&self) -> Option<Arc<Vec<FeedEntry>>> {
        self.feed.clone()
    }

    pub fn set_feed(&mut self, entries: Vec<FeedEntry>) -> Arc<Vec<FeedEntry>> {
        let feed = Arc::new(entries);
        self.feed = Some(Arc::clone(&feed));
        feed
    }

    pub fn pool(&self, key: &PoolKey) -> Option<Arc<RankedPool>> {
        self.pools.get(key).cloned()
    }

    pub fn store_pool(&mut self, key: PoolKey, pool: RankedPool) -> Arc<RankedPool> {
        let pool = Arc::new(pool);
        self.pools.insert(key, Arc::clone(&pool));
        pool
    }

    /// Drops the downloaded feed and every ranked pool.
    pub fn invalidate_pools(&mut self) {
        self.feed = None;
        self.pools.clear();
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn is_blocked(&self, address: &IpAddr) -> bool {
        self.blocklist.contains(address)
    }

    pub fn selection(&self, fqdn: &str) -> Option<&PoolEntry> {
        self.selections.get(fqdn)
    }

    pub fn set_selection(&mut self, fqdn: &str, entry: PoolEntry) {
        self.selections.insert(fqdn.to_string(), entry);
    }

    /// Records a verification failure: blocks the address and empties the
    /// domain's selection slot. Returns `true` if the address was newly
    /// blocked.
    pub fn reject(&mut self, fqdn: &str, address: IpAddr) -> bool {
        self.selections.remove(fqdn);
        self.blocklist.insert(address)
    }
}
