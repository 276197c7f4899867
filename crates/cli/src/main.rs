use clap::Parser;
use ferrous_failover_domain::{CliOverrides, FailoverSession};
use ferrous_failover_jobs::FailoverJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-failover")]
#[command(version)]
#[command(about = "Ferrous Failover - keeps DNS A records pointed at a fast, healthy address")]
struct Cli {
    /// Configuration file path (.toml, or legacy .json)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Keep running and repeat the check on an interval
    #[arg(short = 'w', long)]
    watch: bool,

    /// Seconds between checks in watch mode
    #[arg(short = 'i', long, value_name = "SECS")]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        watch: cli.watch,
        interval_secs: cli.interval,
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), cli_overrides) {
        Ok(config) => config,
        Err(e) => {
            bootstrap::init_default_logging();
            error!(error = %e, "Invalid configuration, nothing processed");
            return Err(e);
        }
    };

    bootstrap::init_logging(&config.logging);

    info!(
        targets = config.targets.len(),
        probe_method = config.probe.method.as_str(),
        "Starting Ferrous Failover v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Dependency Injection
    let adapters = di::Adapters::new(&config)?;
    let use_cases = di::UseCases::new(&config, &adapters);

    if !config.schedule.watch {
        let mut session = FailoverSession::new();
        use_cases
            .failover
            .run_all(&mut session, &config.targets)
            .await;
        info!("Run complete");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let job = Arc::new(
        FailoverJob::new(use_cases.failover.clone(), config.targets.clone())
            .with_interval(config.schedule.interval_secs)
            .with_cancellation(shutdown.clone()),
    );
    let handle = job.start();

    tokio::signal::ctrl_c().await?;
    warn!("Interrupt received, stopping after the current cycle");
    shutdown.cancel();
    handle.await?;

    info!("Shutdown complete");
    Ok(())
}
