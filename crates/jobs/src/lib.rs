pub mod failover;

pub use failover::FailoverJob;
