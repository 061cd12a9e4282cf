use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use serp_audit::audit::UrlAuditor;
use serp_audit::cli::Cli;
use serp_audit::config::{self, AuditConfig};
use serp_audit::search::{ResultFetcher, StopReason};
use serp_audit::{preflight, AuditError, AuditRun, Orchestrator};

// Everything is awaited in sequence; one thread is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    serp_audit::utils::init_logger();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_fatal(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let lookup = config::load_env_file(cli.env_file.as_deref());
    match &lookup.loaded {
        Some(path) => debug!(path = %path.display(), "Using .env file"),
        None => debug!("No .env file found, relying on the process environment"),
    }

    let config = AuditConfig::from_cli(&cli, config::api_key_from_env(), &lookup.searched)?;
    debug!(?config, "Configuration loaded");

    // Fail on a locked output file before spending any API quota
    preflight::assert_writable(&config.output)?;
    let capabilities = preflight::check_capabilities(&config)?;

    print_banner(&config);

    let orchestrator = Orchestrator::new(
        ResultFetcher::new(capabilities.backend),
        UrlAuditor::new(capabilities.prober),
    );
    let audit = orchestrator
        .run_to_csv(&config.search.request, &config.output)
        .await?;
    println!("Saved {} URLs to {}", audit.rows.len(), config.output.display());

    print_summary(&audit);
    Ok(())
}

fn print_banner(config: &AuditConfig) {
    let request = &config.search.request;
    println!("\n--- Starting Search ---");
    println!("Query:    {}", request.query);
    println!("Location: {}", request.location);
    println!("Pages:    {}", request.pages);
    println!("Output:   {}", config.output.display());
    if request.disable_dedup {
        println!("Dedup:    off (filter=0)");
    }
    println!("{}\n", "-".repeat(23));
}

fn print_summary(audit: &AuditRun) {
    match &audit.stop_reason {
        StopReason::Exhausted | StopReason::EmptyPage { .. } => {
            info!(pages = audit.pages_requested, "Search finished")
        }
        StopReason::ApiError(message) | StopReason::TransportError(message) => {
            warn!(pages = audit.pages_requested, error = %message, "Search stopped early; report contains partial results")
        }
    }

    let summary = &audit.summary;
    println!("\nHealthy:       {}", summary.healthy);
    println!("Redirected:    {}", summary.redirected);
    println!("Client errors: {}", summary.client_errors);
    println!("Server errors: {}", summary.server_errors);
    println!("Unreachable:   {}", summary.unreachable);
    if summary.other > 0 {
        println!("Other:         {}", summary.other);
    }
    if summary.skipped > 0 {
        println!("Skipped (no link): {}", summary.skipped);
    }
    println!("Needing attention: {} of {}", summary.problems(), summary.audited);
}

fn print_fatal(err: &anyhow::Error) {
    let rule = "=".repeat(60);
    eprintln!("\n{rule}");
    eprintln!("ERROR: {err:#}");
    eprintln!("{rule}");
    if let Some(text) = err.downcast_ref::<AuditError>().and_then(AuditError::remediation) {
        eprintln!("{text}");
        eprintln!("{rule}");
    }
}
