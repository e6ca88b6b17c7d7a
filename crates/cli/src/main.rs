use clap::Parser;
use revdns_domain::{CliOverrides, LookupBackend};
use revdns_infrastructure::load_lines;
use std::num::NonZeroUsize;
use std::process::ExitCode;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod output;

/// Exit status for a run interrupted with Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "revdns")]
#[command(version)]
#[command(about = "Bulk reverse DNS: resolve a list of IPs to hostnames with a pool of workers")]
struct Cli {
    /// File containing the list of IPs to resolve, one per line
    #[arg(short = 'i', long, value_name = "FILE")]
    ip_file: Option<String>,

    /// File containing the list of DNS resolvers, one per line
    #[arg(short = 'r', long, value_name = "FILE")]
    resolver_file: Option<String>,

    /// Number of concurrent workers [default: 10]
    #[arg(short = 't', long)]
    threads: Option<NonZeroUsize>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Lookup backend: `resolvers` (PTR queries to the resolver list) or `system`
    #[arg(short = 'b', long)]
    backend: Option<LookupBackend>,

    /// Per-lookup timeout in milliseconds
    #[arg(long, value_name = "MS")]
    lookup_timeout: Option<u64>,

    /// How long an idle worker waits for work, in milliseconds
    #[arg(long, value_name = "MS")]
    idle_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

async fn load_list(path: &str, what: &str) -> Vec<String> {
    match load_lines(path).await {
        Ok(lines) => lines,
        Err(e) => {
            error!(path = %path, error = %e, "Failed to load {} list", what);
            println!("Error: {}", e);
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let started = Instant::now();

    let cli_overrides = CliOverrides {
        ip_file: cli.ip_file.clone(),
        resolver_file: cli.resolver_file.clone(),
        threads: cli.threads.map(NonZeroUsize::get),
        backend: cli.backend,
        idle_timeout_ms: cli.idle_timeout,
        lookup_timeout_ms: cli.lookup_timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.resolution.backend,
        threads = config.resolution.threads,
        "Starting IP to DNS resolution"
    );

    let ip_file = &config.resolution.ip_file;
    let resolver_file = &config.resolution.resolver_file;

    let ip_list = load_list(ip_file, "IP").await;
    let resolver_list = load_list(resolver_file, "resolver").await;

    if ip_list.is_empty() {
        println!("No IPs to resolve in '{}'.", ip_file);
        return Ok(ExitCode::FAILURE);
    }
    if resolver_list.is_empty() {
        println!("No valid resolvers in '{}'.", resolver_file);
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "Processing {} IPs using {} resolvers...",
        ip_list.len(),
        resolver_list.len()
    );

    let use_case = di::build_resolve_use_case(&config);

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling outstanding lookups");
                cancel.cancel();
            }
        })
    };

    let report = use_case
        .execute_with_cancellation(
            &ip_list,
            &resolver_list,
            config.resolution.threads,
            cancel,
        )
        .await;
    interrupt.abort();

    let cancelled = report.cancelled;
    let outcomes = report.into_outcomes();

    print!("{}", output::format_results(&outcomes));
    println!("{}", output::format_elapsed(started.elapsed()));

    if cancelled {
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }
    Ok(ExitCode::SUCCESS)
}
