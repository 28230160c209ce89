//! cinedex - OMDb movie catalogue CLI.

/// Application configuration (TOML).
mod config;
/// Text rendering for command output.
mod views;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use crate::views::{details_lines, emit, favorites_lines, home_lines, search_lines};
use cinedex_api::omdb::{Movie, MovieLookup, OmdbClient, lookup_movie, search_all_movies};
use cinedex_store::{FavoritesStore, SqliteStore, ThemeStore};

/// Shown when neither the environment nor the config file provides a key.
const API_KEY_MISSING: &str =
    "API key not configured. Please set OMDB_API_KEY or [omdb].api_key in config.toml.";

/// Query used by the home listing.
const HOME_QUERY: &str = "movie";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
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
    /// Search movies by title across all result pages.
    Search(SearchArgs),
    /// List popular movies.
    Home,
    /// Show full details for one movie.
    Movie(MovieIdArgs),
    /// Manage local favorites.
    Favorites(FavoritesCommand),
    /// Show or switch the colour theme.
    Theme(ThemeCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
}

/// A single IMDb identifier.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// IMDb ID (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `favorites` subcommand.
#[derive(clap::Args)]
struct FavoritesCommand {
    /// Favorites subcommand to run.
    #[command(subcommand)]
    command: FavoritesSubcommands,
}

/// Available favorites subcommands.
#[derive(Subcommand)]
enum FavoritesSubcommands {
    /// List saved favorites.
    List,
    /// Fetch a movie and save it as a favorite.
    Add(MovieIdArgs),
    /// Remove a favorite (works offline).
    Remove(MovieIdArgs),
    /// Add the movie if it is not a favorite, remove it otherwise.
    Toggle(MovieIdArgs),
}

/// Arguments for the `theme` subcommand.
#[derive(clap::Args)]
struct ThemeCommand {
    /// Theme subcommand to run.
    #[command(subcommand)]
    command: ThemeSubcommands,
}

/// Available theme subcommands.
#[derive(Subcommand)]
enum ThemeSubcommands {
    /// Print the current theme.
    Show,
    /// Switch between light and dark.
    Toggle,
}

/// Builds an `OmdbClient` from the environment and the config file.
///
/// # Errors
///
/// Returns an error if no API key is configured, the config file is
/// invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(dir: Option<&PathBuf>) -> Result<OmdbClient> {
    let config = AppConfig::load(&resolve_config_path(dir)?)?;

    let Some(api_key) = config.resolve_api_key(std::env::var(API_KEY_ENV).ok()) else {
        bail!(API_KEY_MISSING);
    };

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build OMDb client")
}

/// Opens the favorites list in the data directory.
fn open_favorites(dir: Option<&PathBuf>) -> Result<FavoritesStore<SqliteStore>> {
    FavoritesStore::load(SqliteStore::open(dir)?).context("failed to load favorites")
}

/// Fetches a movie that must exist.
///
/// # Errors
///
/// Returns an error if the request fails or the movie is not found.
async fn fetch_movie(client: &OmdbClient, imdb_id: &str) -> Result<Movie> {
    match lookup_movie(client, imdb_id).await? {
        MovieLookup::Found(movie) => Ok(*movie),
        MovieLookup::NotFound { reason } => match reason {
            Some(reason) => bail!("Movie not found: {reason}"),
            None => bail!("Movie not found: {imdb_id}"),
        },
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the API key is missing or the first result page fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;

    let response = search_all_movies(&client, &args.query).await?;
    if let Some(error) = response.error.as_deref() {
        bail!("{error}");
    }

    let favorites = open_favorites(dir)?;
    emit(&search_lines(&args.query, &response, &|id| {
        favorites.is_favorite(id)
    }));

    Ok(())
}

/// Runs the `home` subcommand.
///
/// # Errors
///
/// Returns an error if the API key is missing or the first result page fails.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;

    let response = search_all_movies(&client, HOME_QUERY).await?;

    let favorites = open_favorites(dir)?;
    emit(&home_lines(&response, &|id| favorites.is_favorite(id)));

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails or the movie is not found.
#[instrument(skip_all)]
async fn run_movie(args: &MovieIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;

    let movie = fetch_movie(&client, &args.id).await?;

    let favorites = open_favorites(dir)?;
    emit(&details_lines(&movie, favorites.is_favorite(&movie.imdb_id)));

    Ok(())
}

/// Runs the `favorites list` subcommand.
///
/// # Errors
///
/// Returns an error if the favorites cannot be loaded.
#[instrument(skip_all)]
fn run_favorites_list(dir: Option<&PathBuf>) -> Result<()> {
    let favorites = open_favorites(dir)?;
    emit(&favorites_lines(favorites.favorites()));
    Ok(())
}

/// Runs the `favorites add` subcommand.
///
/// Already-saved movies are reported and left as they are.
///
/// # Errors
///
/// Returns an error if the lookup fails or the favorites cannot be saved.
#[instrument(skip_all)]
async fn run_favorites_add(args: &MovieIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let mut favorites = open_favorites(dir)?;
    if favorites.is_favorite(&args.id) {
        tracing::info!("{} is already in favorites", args.id);
        return Ok(());
    }

    let client = build_omdb_client(dir)?;
    let movie = fetch_movie(&client, &args.id).await?;
    let title = movie.title.clone();
    favorites.add(movie)?;

    tracing::info!("Added {title} to favorites");
    Ok(())
}

/// Runs the `favorites remove` subcommand.
///
/// # Errors
///
/// Returns an error if the favorites cannot be saved.
#[instrument(skip_all)]
fn run_favorites_remove(args: &MovieIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let mut favorites = open_favorites(dir)?;
    if favorites.remove(&args.id)? {
        tracing::info!("Removed {} from favorites", args.id);
    } else {
        tracing::info!("{} is not in favorites", args.id);
    }
    Ok(())
}

/// Runs the `favorites toggle` subcommand.
///
/// # Errors
///
/// Returns an error if the lookup fails or the favorites cannot be saved.
#[instrument(skip_all)]
async fn run_favorites_toggle(args: &MovieIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let movie = fetch_movie(&client, &args.id).await?;
    let title = movie.title.clone();

    let mut favorites = open_favorites(dir)?;
    if favorites.toggle(movie)? {
        tracing::info!("Added {title} to favorites");
    } else {
        tracing::info!("Removed {title} from favorites");
    }
    Ok(())
}

/// Runs the `theme show` / `theme toggle` subcommands.
///
/// # Errors
///
/// Returns an error if the theme cannot be loaded or saved.
#[instrument(skip_all)]
fn run_theme(command: &ThemeSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let mut theme = ThemeStore::load(SqliteStore::open(dir)?).context("failed to load theme")?;
    let current = match command {
        ThemeSubcommands::Show => theme.theme(),
        ThemeSubcommands::Toggle => theme.toggle()?,
    };
    tracing::info!("Theme: {current}");
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

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

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Home => run_home(dir).await,
        Commands::Movie(args) => run_movie(&args, dir).await,
        Commands::Favorites(fav) => match fav.command {
            FavoritesSubcommands::List => run_favorites_list(dir),
            FavoritesSubcommands::Add(args) => run_favorites_add(&args, dir).await,
            FavoritesSubcommands::Remove(args) => run_favorites_remove(&args, dir),
            FavoritesSubcommands::Toggle(args) => run_favorites_toggle(&args, dir).await,
        },
        Commands::Theme(theme) => run_theme(&theme.command, dir),
    }
}
