mod run_failover;

pub use run_failover::{EpisodeOutcome, EpisodeReport, RunFailoverUseCase};
