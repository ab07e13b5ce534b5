use clap::Parser;
use ferrous_lookup::{bootstrap, di};
use ferrous_lookup_domain::CliOverrides;
use ferrous_lookup_infrastructure::server::serve_udp;
use ferrous_lookup_infrastructure::transport::UdpDatagramTransport;
use ferrous_lookup_jobs::EndpointEvictionJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "ferrous-lookup-server")]
#[command(version)]
#[command(about = "Ferrous Lookup - name lookup server over UDP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Records file (JSON array of {name, type, value})
    #[arg(short = 'r', long, value_name = "FILE")]
    records: Option<String>,

    /// Server bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server_address: cli.bind.clone(),
        server_port: cli.port,
        records_file: cli.records.clone(),
        log_level: cli.log_level.clone(),
        ..CliOverrides::default()
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Lookup server v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    bootstrap::spawn_shutdown_listener(shutdown.clone());

    let services = di::ServerServices::new(&config)?;

    let eviction_job = Arc::new(
        EndpointEvictionJob::new(
            services.tracker.clone(),
            config.server.endpoint_idle_timeout(),
        )
        .with_interval(config.server.eviction_interval())
        .with_cancellation(shutdown.clone()),
    )
    .start();

    let transport = UdpDatagramTransport::bind(config.settings.server_endpoint()?).await?;
    serve_udp(Arc::new(transport), services.handler, shutdown.clone()).await?;

    shutdown.cancel();
    let _ = eviction_job.await;

    info!("Server shutdown complete");
    Ok(())
}
