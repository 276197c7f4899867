pub mod account;
pub mod errors;
pub mod feed;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod provider;
pub mod root;
pub mod schedule;

pub use account::AccountConfig;
pub use errors::ConfigError;
pub use feed::FeedConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use monitor::MonitorConfig;
pub use probe::{ProbeConfig, ProbeMethod};
pub use provider::ProviderConfig;
pub use root::{CliOverrides, Config};
pub use schedule::ScheduleConfig;
