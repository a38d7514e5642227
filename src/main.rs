// Unitstat - systemd unit state collector
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tokio::time::MissedTickBehavior;
use unitstat::config::Config;
use unitstat::output::LineProtocolSink;
use unitstat::systemd::{SystemctlRunner, UnitType, UnitsCollector};
use unitstat::version::build_info;

#[derive(Parser, Debug)]
#[command(name = "unitstat")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single collection pass and exit
    #[arg(long)]
    once: bool,

    /// Unit type to collect (overrides config)
    #[arg(short = 't', long, value_enum)]
    unit_type: Option<UnitType>,

    /// Timeout for each systemctl call in milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Seconds between passes (overrides config)
    #[arg(short, long)]
    interval_secs: Option<u64>,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,

    /// Show detailed build information
    #[arg(long)]
    build_info: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(unit_type) = self.unit_type {
            config.unit_type = unit_type;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(interval_secs) = self.interval_secs {
            config.interval_secs = interval_secs;
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", build_info().format_display());
        return Ok(());
    }

    if cli.build_info {
        println!("{}", build_info().format_display());
        println!("\n{}", build_info().format_build_info());
        return Ok(());
    }

    // Metrics go to stdout, logs to stderr
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.apply(Config::load(cli.config.clone())?);
    config.validate()?;

    tracing::info!(
        "Unitstat starting: unit type {}, timeout {:?}, interval {:?}",
        config.unit_type,
        config.timeout(),
        config.interval()
    );

    run(config, cli.once).await
}

async fn run(config: Config, once: bool) -> Result<()> {
    let runner = SystemctlRunner::new(config.systemctl_path.clone(), config.user_scope);
    let collector = UnitsCollector::new(runner, config.unit_type, config.timeout());
    let mut sink = LineProtocolSink::new(io::stdout().lock());

    if once {
        collector.gather(&mut sink).await?;
        return Ok(());
    }

    let mut interval = tokio::time::interval(config.interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = collector.gather(&mut sink).await {
                    tracing::error!("Collection pass failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    tracing::info!(
        "Unitstat exiting: {} metrics written, {} line errors",
        sink.metrics_written(),
        sink.errors_seen()
    );

    Ok(())
}
