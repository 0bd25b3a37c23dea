//! CLI entry point for the vigil monitor daemon.

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use vigil_monitor::acquire::ArpCommandSource;
use vigil_monitor::config::MonitorConfig;
use vigil_monitor::notify::WebhookNotifier;
use vigil_monitor::persist::JsonSnapshotStore;
use vigil_monitor::scheduler::Monitor;

#[derive(Parser)]
#[command(name = "vigil-monitor")]
#[command(about = "ARP neighbor-table monitor with spoof detection")]
struct Cli {
    /// Subnet prefix to watch (e.g., 192.168.1.).
    #[arg(short, long)]
    subnet: Option<String>,

    /// Webhook endpoint for alerts.
    #[arg(short, long)]
    webhook: Option<String>,

    /// Run a single scan cycle and exit.
    #[arg(long)]
    once: bool,

    /// Run as daemon with scheduled cycles.
    #[arg(long)]
    daemon: bool,

    /// Config file prefix (default: vigil).
    #[arg(short, long, default_value = "vigil")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut config = load_monitor_config(&cli.config)?;

    if let Some(subnet) = &cli.subnet {
        config.subnet_prefix = subnet.clone();
    }
    if let Some(webhook) = &cli.webhook {
        config.webhook_url = webhook.clone();
    }

    if config.subnet_prefix.is_empty() {
        anyhow::bail!("Subnet prefix required: set --subnet or monitor.subnet_prefix in config");
    }
    if config.webhook_url.is_empty() {
        anyhow::bail!("Webhook URL required: set --webhook or monitor.webhook_url in config");
    }

    let source = ArpCommandSource::new(&config.arp_path);
    let notifier = WebhookNotifier::new(&config.webhook_url)?;
    let store = JsonSnapshotStore::new(&config.snapshot_path);
    let monitor = Monitor::new(config, source, notifier, store);

    if cli.once {
        monitor.run_cycle().await?;
    } else if cli.daemon {
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl-C received, shutting down");
                let _ = stop_tx.send(true);
            }
        });
        monitor.run(stop_rx).await?;
    } else {
        anyhow::bail!("Specify --once (single cycle) or --daemon (scheduled monitoring)");
    }

    Ok(())
}

fn load_monitor_config(file_prefix: &str) -> anyhow::Result<MonitorConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("VIGIL_MONITOR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<MonitorConfig>("monitor") {
        Ok(c) => Ok(c),
        Err(_) => Ok(MonitorConfig::default()),
    }
}
