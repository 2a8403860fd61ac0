//! `zone-purge`: delete Cloudflare zones in bulk.
//!
//! Domains come from positional arguments, a file, or stdin (one per line).
//! Credentials come from the environment, optionally seeded from `.env`.

mod input;
mod output;

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zone_purge_core::{
    BatchDeleteService, BatchRequest, BatchRunner, CoreError, CredentialConfig,
    config::{ENV_API_KEY, ENV_API_TOKEN, ENV_EMAIL},
};
use zone_purge_provider::{
    DEFAULT_REQUEST_TIMEOUT, ProviderConfig, RateLimitPolicy, create_provider,
};

use output::Printer;

/// Exit code for a batch that ran without failures (or had nothing to fail).
const EXIT_OK: u8 = 0;
/// Exit code for bad input or a batch with failed items.
const EXIT_FAILURE: u8 = 1;
/// Exit code for missing or invalid credentials.
const EXIT_CONFIG: u8 = 2;
/// Exit code after a second Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

/// Delete Cloudflare zones in bulk, one domain at a time
#[derive(Parser, Debug)]
#[command(name = "zone-purge")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    CLOUDFLARE_API_TOKEN       Scoped API token (preferred)\n    \
    CLOUDFLARE_EMAIL           Account email, with CLOUDFLARE_API_KEY\n    \
    CLOUDFLARE_API_KEY         Global API key, with CLOUDFLARE_EMAIL\n    \
    CLOUDFLARE_API_BASE_URL    Override the API endpoint\n    \
    RUST_LOG                   Log filter for stderr diagnostics")]
pub struct Cli {
    /// Domains to delete; `-` or nothing reads stdin
    pub domains: Vec<String>,

    /// Read domains from a file, one per line
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Retries on HTTP 429 before giving up
    #[arg(long, value_name = "N", default_value_t = RateLimitPolicy::default().max_retries)]
    pub max_retries: u32,

    /// Override the API base URL (takes precedence over the environment)
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Enable debug diagnostics on stderr
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    fn provider_config(&self, credentials: &CredentialConfig) -> ProviderConfig {
        let mut config = credentials.apply(ProviderConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            rate_limit: RateLimitPolicy {
                max_retries: self.max_retries,
                ..RateLimitPolicy::default()
            },
            ..ProviderConfig::default()
        });
        if let Some(url) = &self.api_base_url {
            config = config.with_base_url(url.as_str());
        }
        config
    }
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries the progress log and the JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// What a Ctrl-C does, by how many have arrived so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    /// Stop after the current domain
    Cancel,
    /// The current domain may be stuck in backoff; leave now
    ForceExit,
}

impl Interrupt {
    fn nth(count: u32) -> Self {
        if count <= 1 { Self::Cancel } else { Self::ForceExit }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded .env from: {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Could not load .env file: {}", e),
    }

    match run(&cli, |key| std::env::var(key).ok(), std::io::stdin().lock()).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run<R: BufRead>(
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
    mut stdin: R,
) -> anyhow::Result<u8> {
    let printer = Printer::new(cli.json);

    let credentials = match CredentialConfig::from_lookup(env) {
        Ok(credentials) => credentials,
        Err(CoreError::Configuration(detail)) => {
            tracing::warn!("{detail}");
            printer.error(&format!(
                "Set {ENV_API_TOKEN}, or both {ENV_EMAIL} and {ENV_API_KEY} (a .env file works too)"
            ));
            return Ok(EXIT_CONFIG);
        }
        Err(e) => return Err(e.into()),
    };

    let reads_stdin = input::reads_stdin(&cli.domains, cli.file.as_deref());
    let domains = input::collect_domains(&cli.domains, cli.file.as_deref(), &mut stdin)
        .context("failed to read domains")?;
    printer.note(&format!("{} domains queued", domains.len()));

    let request = match BatchRequest::new(&domains) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Batch rejected: {e}");
            printer.error(&e.to_string());
            return Ok(EXIT_FAILURE);
        }
    };

    if !cli.yes {
        if reads_stdin {
            printer.error("Domains were read from stdin, so confirmation is impossible. Re-run with --yes.");
            return Ok(EXIT_FAILURE);
        }
        let confirmed = input::confirm(request.domains(), &mut stdin, &mut std::io::stderr())
            .context("failed to read confirmation")?;
        if !confirmed {
            printer.note("Aborted. Nothing was deleted.");
            return Ok(EXIT_OK);
        }
    }

    let config = cli.provider_config(&credentials);
    let provider = match create_provider(credentials.credentials, config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!("{e}");
            printer.error(&e.to_string());
            return Ok(EXIT_CONFIG);
        }
    };

    let runner = BatchRunner::new(BatchDeleteService::new(provider));
    let mut handle = runner.start(request)?;

    let token = handle.cancellation_token();
    tokio::spawn(async move {
        let mut count = 0;
        while tokio::signal::ctrl_c().await.is_ok() {
            count += 1;
            match Interrupt::nth(count) {
                Interrupt::Cancel => {
                    tracing::warn!(
                        "Interrupt received, stopping after the current domain (Ctrl-C again to quit now)"
                    );
                    token.cancel();
                }
                Interrupt::ForceExit => {
                    eprintln!("Interrupted again, exiting without waiting for the current domain");
                    std::process::exit(EXIT_INTERRUPTED);
                }
            }
        }
    });

    while let Some(event) = handle.next_event().await {
        printer.event(&event);
    }
    let report = handle.wait().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(if report.is_clean() { EXIT_OK } else { EXIT_FAILURE })
}
