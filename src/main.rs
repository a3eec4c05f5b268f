use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use langdist::server::{self, AppState};
use langdist::{distribution, render_options, PipelineError};
use langdist_core::config::Config;
use langdist_core::{LanguageShare, NormalizeError};
use langdist_render::{patch, Format};
use langdist_sources::{GitHubSource, JsonFileSource, LanguageSource};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "langdist", about = "Language distribution for a GitHub account", version)]
struct Cli {
    /// Config file (defaults to ~/.config/langdist/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the distribution once, to stdout, a file, or between README markers.
    Render(RenderArgs),
    /// Serve rendered distributions over HTTP.
    Serve(ServeArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// GitHub username.
    #[arg(short, long)]
    username: Option<String>,

    /// Output format: text, html, svg or json.
    #[arg(short, long)]
    format: Option<Format>,

    /// Read language sizes from a JSON file instead of the GitHub API.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the rendered output to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Splice the rendered output between the configured markers in this file.
    #[arg(long)]
    patch: Option<PathBuf>,

    /// Collapse languages past this many rows into "Other" (0 = all).
    #[arg(long)]
    max_languages: Option<usize>,

    /// Exponent applied to byte counts when ranking (default 1).
    #[arg(long, value_parser = parse_exponent)]
    size_exponent: Option<f64>,

    /// Exponent applied to repository counts when ranking (default 0).
    #[arg(long, value_parser = parse_exponent)]
    count_exponent: Option<f64>,
}

fn parse_exponent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    langdist_core::weighting::check_exponent(value)
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on, e.g. 0.0.0.0:8080.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "info" })
            }),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Command::Render(args) => run_render(config, args).await,
        Command::Serve(args) => run_serve(config, args).await,
    }
}

async fn run_render(mut config: Config, args: RenderArgs) -> anyhow::Result<()> {
    if let Some(username) = args.username {
        config.source.username = username;
    }
    if let Some(max) = args.max_languages {
        config.output.max_languages = max;
    }
    if let Some(exp) = args.size_exponent {
        config.weights.size_exponent = exp;
    }
    if let Some(exp) = args.count_exponent {
        config.weights.count_exponent = exp;
    }
    if let Some(path) = args.patch {
        config.patch.file = Some(path);
    }
    let format = match args.format {
        Some(format) => format,
        None => config.output.format.parse().map_err(anyhow::Error::msg)?,
    };

    let shares = match &args.input {
        Some(path) => collect(&JsonFileSource::new(path), &config).await?,
        None => collect(&GitHubSource::new(&config.source)?, &config).await?,
    };

    let body = langdist_render::render(format, &shares, &render_options(&config.output));

    let mut written = false;
    if let Some(path) = &config.patch.file {
        patch::patch_file(path, &config.patch.start_marker, &config.patch.end_marker, &body)?;
        written = true;
    }
    if let Some(path) = &args.output {
        write_output(path, &body)?;
        written = true;
    }
    if !written {
        println!("{body}");
    }
    Ok(())
}

async fn collect<S: LanguageSource>(source: &S, config: &Config) -> anyhow::Result<Vec<LanguageShare>> {
    let username = config.source.username.as_str();
    match distribution(source, username, config.weights).await {
        Ok(shares) => Ok(shares),
        Err(PipelineError::Normalize(NormalizeError::EmptyDistribution)) => {
            bail!("no language data found for {username:?}")
        }
        Err(err) => Err(err).context("failed to collect language data"),
    }
}

fn write_output(path: &Path, body: &str) -> anyhow::Result<()> {
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = body.len(), "wrote output");
    Ok(())
}

async fn run_serve(config: Config, args: ServeArgs) -> anyhow::Result<()> {
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let state = AppState {
        source: GitHubSource::new(&config.source)?,
        weights: config.weights,
        output: config.output,
    };
    server::serve(state, &bind).await
}
