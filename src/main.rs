mod app;
mod config;
mod harvest;
mod report;
mod resolve;
mod translate;
mod wiki;

pub const USER_AGENT: &str = concat!("wikimatch/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Client;
use tracing::info;

use app::WikiMatch;
use config::{ConfigError, Contact, Settings};
use resolve::{SearchTerm, TermError};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

/// Resolve a keyword in any language to its best-matching Wikipedia article
#[derive(Parser, Debug)]
#[command(name = "wikimatch", version, about)]
struct Cli {
    /// Keyword to resolve (any language)
    keyword: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Resolve only; skip image harvesting
    #[arg(long)]
    no_images: bool,

    /// Overall deadline in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Score added when the snippet contains the keyword
    #[arg(long)]
    snippet_bonus: Option<f64>,

    /// Contact name sent in Api-User-Agent (overrides WIKIMATCH_CONTACT_NAME)
    #[arg(long)]
    contact_name: Option<String>,

    /// Contact email sent in Api-User-Agent (overrides WIKIMATCH_CONTACT_EMAIL)
    #[arg(long, requires = "contact_name")]
    contact_email: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Markdown,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Term(#[from] TermError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lookup timed out after {0}s")]
    Timeout(u64),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

fn settings_for(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = Settings::from_env();
    if let Some(bonus) = cli.snippet_bonus {
        settings.snippet_bonus = bonus;
    }
    if let Some(name) = &cli.contact_name {
        settings.contact = Some(Contact {
            name: name.clone(),
            email: cli.contact_email.clone(),
        });
    }
    settings.validate()?;
    Ok(settings)
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let term = SearchTerm::parse(&cli.keyword)?;
    let settings = settings_for(&cli)?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    let app = WikiMatch::new(http, &settings);

    info!(keyword = %term, "resolving");
    let report = tokio::time::timeout(
        Duration::from_secs(cli.timeout),
        app.lookup(&term, !cli.no_images),
    )
    .await
    .map_err(|_| AppError::Timeout(cli.timeout))?;

    Ok(match cli.format {
        Format::Json => report.to_json()?,
        Format::Markdown => report.to_markdown(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wikimatch=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let output = run(cli)
        .await
        .inspect_err(|e| tracing::error!("{e}"))?;
    println!("{output}");
    Ok(())
}
