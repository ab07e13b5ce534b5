use clap::Parser;
use ferrous_lookup::{bootstrap, di};
use ferrous_lookup_application::use_cases::{LookupResult, SessionReport};
use ferrous_lookup_domain::{CliOverrides, DomainError, LookupTarget};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ferrous-lookup-client")]
#[command(version)]
#[command(about = "Ferrous Lookup - runs one lookup session against the server")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Server address
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Local port (0 = ephemeral)
    #[arg(long)]
    client_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Domains to look up, overriding the configured list ("example.com" or "example.com:AAAA")
    domains: Vec<String>,
}

fn parse_targets(domains: &[String]) -> anyhow::Result<Vec<LookupTarget>> {
    domains
        .iter()
        .map(|d| {
            d.replacen(':', " ", 1)
                .parse::<LookupTarget>()
                .map_err(|e| anyhow::anyhow!("Invalid domain argument '{}': {}", d, e))
        })
        .collect()
}

fn log_report(report: &SessionReport) {
    for outcome in &report.outcomes {
        match &outcome.result {
            LookupResult::Resolved { record, .. } => info!(
                domain = %outcome.target,
                record_type = %record.record_type,
                value = %record.value,
                "Resolved"
            ),
            LookupResult::NotFound { reason, .. } => {
                info!(domain = %outcome.target, reason = %reason, "Not resolved")
            }
            LookupResult::Unexpected { detail } => {
                warn!(domain = %outcome.target, detail = %detail, "No usable reply")
            }
        }
    }

    info!(
        welcomed = report.welcomed,
        lookups = report.outcomes.len(),
        acks_sent = report.acks_sent,
        ended = report.ended,
        "Session finished"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server_address: cli.server.clone(),
        server_port: cli.port,
        client_port: cli.client_port,
        log_level: cli.log_level.clone(),
        ..CliOverrides::default()
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    let targets = if cli.domains.is_empty() {
        config.lookup_targets()?
    } else {
        parse_targets(&cli.domains)?
    };

    info!(
        "Starting Ferrous Lookup client v{} ({} lookups)",
        env!("CARGO_PKG_VERSION"),
        targets.len()
    );

    let shutdown = CancellationToken::new();
    bootstrap::spawn_shutdown_listener(shutdown.clone());

    let services = di::ClientServices::new(&config, shutdown).await?;

    match services.session.run(&targets).await {
        Ok(report) => {
            log_report(&report);
            Ok(())
        }
        Err(DomainError::TransportClosed) => {
            info!("Session cancelled");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Session failed");
            Err(e.into())
        }
    }
}
