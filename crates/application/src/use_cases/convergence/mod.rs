mod monitor_convergence;

pub use monitor_convergence::{ConvergenceOutcome, MonitorConvergenceUseCase};
