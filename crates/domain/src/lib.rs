//! Ferrous Failover Domain Layer
pub mod blocklist;
pub mod candidate;
pub mod candidate_source;
pub mod config;
pub mod errors;
pub mod pool;
pub mod session;
pub mod target;

pub use blocklist::Blocklist;
pub use candidate::{Candidate, LOSS_CUTOFF, MAX_RANKABLE_LATENCY_MS, SENTINEL_LATENCY_MS};
pub use candidate_source::{CandidateSource, FeedEntry, SourceFilter};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use pool::{PoolEntry, RankedPool};
pub use session::{FailoverSession, PoolKey};
pub use target::DomainTarget;
