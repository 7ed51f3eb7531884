//! CLI for stargazer.
//!
//! Extracts a repository's stargazers and fork owners, then either prints a
//! summary or writes the full report as JSON.

use clap::{Args, Parser, Subcommand};
use stargazer::{
    wait_for_retry_after, ClientConfig, ConfigError, ExtractError, ExtractOptions,
    ExtractionReport, Extractor, GitHubError, RateLimitStatus, UserRecord,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Stargazer - Extract the stargazers and forkers of a GitHub repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract repository metadata, stargazers and forkers.
    Extract(ExtractArgs),
    /// Show the remaining API budget.
    RateLimit(ClientArgs),
}

#[derive(Args, Debug)]
struct ClientArgs {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Repository as `owner/repo` or a github.com URL.
    repo: String,

    #[command(flatten)]
    client: ClientArgs,

    /// Maximum number of stargazers to fetch.
    #[arg(long)]
    max_stargazers: Option<usize>,

    /// Maximum number of forkers to fetch.
    #[arg(long)]
    max_forkers: Option<usize>,

    /// Skip stargazers.
    #[arg(long)]
    no_stargazers: bool,

    /// Skip forkers.
    #[arg(long)]
    no_forkers: bool,

    /// Fetch each user's profile.
    #[arg(long)]
    detailed: bool,

    /// Only use public profile emails.
    #[arg(long)]
    no_aggressive_email: bool,

    /// Items per page (clamped to the configured maximum).
    #[arg(long)]
    page_size: Option<u32>,

    /// Write the full report as JSON to this path instead of printing a summary.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Wait out a rate limit once and retry instead of failing.
    #[arg(long)]
    wait_on_rate_limit: bool,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            include_stargazers: !self.no_stargazers,
            include_forkers: !self.no_forkers,
            max_stargazers: self.max_stargazers,
            max_forkers: self.max_forkers,
            detailed_user_info: self.detailed,
            aggressive_email_extraction: !self.no_aggressive_email,
            page_size: self.page_size,
        }
    }
}

/// Errors that end the process with a failure code.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Failed to write report to {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract(args) => extract(args).await,
        Command::RateLimit(args) => rate_limit(args).await.map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Sets up the global subscriber: compact single-line output, filtered by
/// `RUST_LOG` (default `info`).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_config(args: &ClientArgs) -> Result<ClientConfig, ConfigError> {
    let config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::from_env()?,
    };
    Ok(match &args.token {
        Some(token) => config.with_token(token.clone()),
        None => config,
    })
}

/// Runs an extraction; returns false when the report is degraded.
async fn extract(args: ExtractArgs) -> Result<bool, CliError> {
    let extractor = Extractor::new(load_config(&args.client)?)?;
    let options = args.options();

    let report = match extractor.extract(&args.repo, &options).await {
        Ok(report) => report,
        Err(e) => match e.rate_limit_wait() {
            Some(wait) if args.wait_on_rate_limit => {
                wait_for_retry_after(wait).await;
                extractor.extract(&args.repo, &options).await?
            }
            _ => return Err(e.into()),
        },
    };

    match &args.output {
        Some(path) => {
            export(&report, path)?;
            info!(
                path = %path.display(),
                stargazers = report.stargazers.len(),
                forkers = report.forkers.len(),
                "Report written"
            );
        }
        None => print_report(&report),
    }

    Ok(!report.has_failures())
}

async fn rate_limit(args: ClientArgs) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let authenticated = config.has_token();
    let status = Extractor::new(config)?.rate_limit_status().await?;
    print_rate_limit(&status, authenticated);
    Ok(())
}

fn export(report: &ExtractionReport, path: &Path) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| CliError::Export {
        path: path.display().to_string(),
        source,
    })
}

/// Prints the repository and the collected users.
fn print_report(report: &ExtractionReport) {
    let repo = &report.repository;
    println!("\nRepository: {}", repo.full_name);
    if let Some(description) = &repo.description {
        println!("  Description: {description}");
    }
    if let Some(language) = &repo.language {
        println!("  Language: {language}");
    }
    println!("  Stars: {}", repo.stargazers_count);
    println!("  Forks: {}", repo.forks_count);
    println!("  URL: {}", repo.html_url);

    print_users("Stargazers", &report.stargazers, report.total_stargazers);
    print_users("Forkers", &report.forkers, report.total_forkers);

    if report.has_failures() {
        println!("\nDegraded sections:");
        for failure in &report.section_errors {
            println!("  {}: {}", failure.section, failure.error);
        }
    }
}

fn print_users(title: &str, users: &[UserRecord], total: u64) {
    let with_email = users.iter().filter(|u| u.email().is_some()).count();
    println!(
        "\n{title} (showing {} of {total}, {with_email} with email):",
        users.len()
    );
    for (i, user) in users.iter().enumerate() {
        println!("  {}. {}", i + 1, user.login);
        if let Some(details) = &user.details {
            if let Some(name) = &details.name {
                println!("     Name: {name}");
            }
            if let Some(company) = &details.company {
                println!("     Company: {company}");
            }
            if let Some(email) = &details.email {
                println!("     Email: {email}");
            }
        }
    }
}

fn print_rate_limit(status: &RateLimitStatus, authenticated: bool) {
    println!("\nRate limit ({}):", if authenticated { "token" } else { "anonymous" });
    println!(
        "  Core: {}/{} remaining, resets at {}",
        status.core.remaining, status.core.limit, status.core.reset
    );
}
