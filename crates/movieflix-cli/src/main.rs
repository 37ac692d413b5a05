//! movieflix - terminal movie browser for TMDB.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use movieflix_api::tmdb::{Movie, MovieCategory, MovieRequest, TmdbApi, TmdbClient};
use movieflix_tui::browser::BrowserSettings;
use movieflix_tui::format::{format_rating, release_year};
use movieflix_tui::run_browser;

/// Environment variable holding the TMDB v3 API key.
const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "movieflix", about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies in the terminal UI.
    Browse(BrowseArgs),
    /// Print one page of a catalog category.
    List(ListArgs),
    /// Print one page of title search results.
    Search(SearchArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Search debounce in milliseconds (overrides the config file).
    #[arg(long)]
    debounce_ms: Option<u64>,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Category: popular, top-rated, now-playing or upcoming.
    category: MovieCategory,

    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for.
    #[arg(long, short)]
    query: String,

    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Initializes the tracing subscriber.
///
/// Logs go to stdout, or are appended to `log_file` when one is given (the
/// terminal UI owns the screen).
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stdout), true),
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Builds the TMDB client from the environment and config file.
///
/// A missing API key is not fatal: requests go out with an empty key and
/// the gateway reports the resulting errors as empty lists.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = config
        .api_key(std::env::var(TMDB_API_KEY_ENV).ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "{TMDB_API_KEY_ENV} is not set and no api_key in config; requests will fail"
            );
            String::new()
        });

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(base_url) = &config.tmdb.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Logs one line per record.
fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        tracing::info!("No movies found");
        return;
    }

    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            release_year(movie),
            format_rating(movie).unwrap_or_else(|| String::from("-")),
            movie.title,
        );
    }
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the terminal UI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let debounce = args
        .debounce_ms
        .map_or_else(|| config.browser.debounce(), Duration::from_millis);
    tracing::info!(debounce = ?debounce, "Starting browser");

    run_browser(client, BrowserSettings { debounce }).await
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let request = MovieRequest::category_page(args.category, args.page);
    let movies = client.fetch_movies(&request).await;

    tracing::info!(
        "{} (page {}): {} movies",
        args.category.title(),
        args.page,
        movies.len()
    );
    print_movies(&movies);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let request = MovieRequest::search(args.query.as_str()).param("page", args.page);
    let movies = client.fetch_movies(&request).await;

    tracing::info!(
        "Search \"{}\" (page {}): {} movies",
        args.query,
        args.page,
        movies.len()
    );
    print_movies(&movies);
    Ok(())
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "movieflix", &mut io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        run_completions(args);
        return Ok(());
    }

    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let log_file = matches!(cli.command, Commands::Browse(_)).then(|| resolve_log_path(&config_path));
    init_logging(log_file.as_deref())?;

    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "Config loaded");

    match cli.command {
        Commands::Browse(args) => run_browse(&args, &config).await,
        Commands::List(args) => run_list(&args, &config).await,
        Commands::Search(args) => run_search(&args, &config).await,
        Commands::Completions(_) => Ok(()),
    }
}
