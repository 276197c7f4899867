pub mod convergence;
pub mod failover;
pub mod probing;
pub mod publishing;
pub mod ranking;

// Re-export use cases
pub use convergence::{ConvergenceOutcome, MonitorConvergenceUseCase};
pub use failover::{EpisodeOutcome, EpisodeReport, RunFailoverUseCase};
pub use probing::MeasureHostLatencyUseCase;
pub use publishing::PublishRecordUseCase;
pub use ranking::{parse_candidate_line, RankCandidatesUseCase};
