//! cinehub - movie/series catalog browser and streaming link resolver.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cinehub_api::catalog::{BrowseSession, CatalogClient, LocalCatalogApi, MediaKind, absorb};
use cinehub_playback::player::{
    EntryPoint, PlaybackStateController, PlaybackTarget, SurfaceTracker,
};
use cinehub_playback::providers::{Provider, Resolution};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tracing::{instrument, warn};
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, mask_key, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "cinehub", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Load the five category shelves for a media kind.
    Browse(BrowseArgs),
    /// Search movies and series.
    Search(SearchArgs),
    /// Show details, genres and leading cast of a title.
    Details(TitleArgs),
    /// List the episodes of one season.
    Season(SeasonArgs),
    /// Resolve the playback link of a title.
    Play(PlayArgs),
    /// List streaming providers.
    Providers,
    /// Manage the configuration file.
    Config(ConfigCommand),
    /// Print shell completions.
    Completions(CompletionsArgs),
}

/// Media kind as accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Movies.
    Movie,
    /// TV series.
    Series,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => Self::Movie,
            KindArg::Series => Self::Series,
        }
    }
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Media kind to browse.
    #[arg(long, value_enum, default_value = "movie")]
    kind: KindArg,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Duna").
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct TitleArgs {
    /// Catalog ID.
    #[arg(long, required = true)]
    id: u64,
    /// Media kind of the title.
    #[arg(long, value_enum, required = true)]
    kind: KindArg,
}

/// Arguments for the `season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// Series catalog ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, default_value_t = 1)]
    season: u32,
}

/// Arguments for the `play` subcommand.
#[derive(clap::Args)]
struct PlayArgs {
    /// Catalog ID.
    #[arg(long, required = true)]
    id: u64,
    /// Media kind of the title.
    #[arg(long, value_enum, required = true)]
    kind: KindArg,
    /// Season number (series only).
    #[arg(long, requires = "episode")]
    season: Option<u32>,
    /// Episode number (series only).
    #[arg(long, requires = "season")]
    episode: Option<u32>,
    /// Provider ID (default: first registered provider).
    #[arg(long, conflicts_with = "all")]
    provider: Option<String>,
    /// Resolve the link through every provider.
    #[arg(long)]
    all: bool,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the catalog access key.
    SetKey {
        /// Access key.
        key: String,
    },
    /// Print the effective configuration (key masked).
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Builds a `CatalogClient` from the config file and environment.
///
/// # Errors
///
/// Returns an error if no access key is available or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &AppConfig) -> Result<CatalogClient> {
    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

    let mut builder = CatalogClient::builder()
        .api_key(api_key)
        .language(&config.catalog.language)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(raw) = &config.catalog.base_url {
        let mut raw = raw.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = raw
            .parse()
            .with_context(|| format!("invalid catalog base_url: {raw}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build catalog client")
}

/// Loads the config file selected by `--dir`.
///
/// # Errors
///
/// Returns an error if the config file cannot be resolved or parsed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error only if the client cannot be built; category failures
/// show up as empty shelves.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;
    let kind = MediaKind::from(args.kind);

    let mut session = BrowseSession::new(kind);
    session.refresh(&client).await;
    let Some(shelves) = session.shelves() else {
        bail!("browse results were discarded");
    };

    if shelves.is_empty() {
        tracing::info!("No content available.");
    }
    for (category, items) in shelves.iter() {
        tracing::info!("== {} ({}) ==", category.label(kind), items.len());
        for item in items {
            tracing::info!(
                "  {}\t{}\t{}\t{:.1}",
                item.id,
                item.title,
                item.release_year()
                    .map_or_else(|| String::from("-"), |y| y.to_string()),
                item.vote_average,
            );
        }
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;

    let results = client
        .search(&args.query)
        .await
        .context("catalog search request failed")?;

    tracing::info!("Total results: {}", results.len());
    tracing::info!("ID\tKind\tYear\tTitle");
    for item in &results {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            item.id,
            item.kind,
            item.release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            item.title,
        );
    }

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the details request fails.
#[instrument(skip_all)]
async fn run_details(args: &TitleArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;
    let kind = MediaKind::from(args.kind);

    let detail = client
        .details(args.id, kind)
        .await
        .context("catalog details request failed")?;
    let cast = absorb("credits", client.credits(args.id, kind).await);

    tracing::info!("ID: {}", detail.item.id);
    tracing::info!("Title: {}", detail.item.title);
    if !detail.tagline.is_empty() {
        tracing::info!("Tagline: {}", detail.tagline);
    }
    tracing::info!(
        "Released: {}",
        detail.item.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Rating: {:.1}", detail.item.vote_average);
    match kind {
        MediaKind::Movie => tracing::info!(
            "Runtime: {}",
            detail
                .runtime
                .map_or_else(|| String::from("-"), |r| format!("{r} min"))
        ),
        MediaKind::Series => tracing::info!(
            "Seasons: {}",
            detail
                .season_count
                .map_or_else(|| String::from("-"), |n| n.to_string())
        ),
    }
    tracing::info!(
        "External ID: {}",
        detail.external_id.as_deref().unwrap_or("-")
    );
    let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genres.join(", "));
    if let Some(poster) = detail.item.poster_url() {
        tracing::info!("Poster: {poster}");
    }
    tracing::info!("Overview: {}", detail.item.overview);
    tracing::info!("Cast:");
    for member in &cast {
        tracing::info!("  {} as {}", member.name, member.character);
    }

    Ok(())
}

/// Runs the `season` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_season(args: &SeasonArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;

    let episodes = client
        .season_episodes(args.id, args.season)
        .await
        .context("catalog season request failed")?;

    tracing::info!("Season {}: {} episodes", args.season, episodes.len());
    for ep in &episodes {
        tracing::info!(
            "  E{:02}: {} (air_date: {})",
            ep.episode_number,
            ep.name,
            ep.air_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Target used when the details request fails: no external ID, no season bound.
fn fallback_target(id: u64, kind: MediaKind) -> PlaybackTarget {
    PlaybackTarget {
        content_id: id,
        external_id: None,
        kind,
        title: format!("#{id}"),
        season_count: None,
    }
}

/// Prints one provider line with its link and guidance.
fn print_link(provider: &Provider, resolution: &Resolution) {
    match resolution {
        Resolution::Primary(url) => tracing::info!("[{}] {url}", provider.id),
        Resolution::Fallback(url) => tracing::info!("[{}] {url} (fallback)", provider.id),
        Resolution::Unavailable(reason) => {
            tracing::info!("[{}] link unavailable: {reason}", provider.id);
        }
    }
    tracing::info!("  referrer-policy: {}", provider.referrer_policy);
    if let Some(guidance) = &provider.guidance {
        tracing::info!("  [{}] {}", guidance.badge(), guidance.headline());
        tracing::info!("  {}", guidance.tip());
    }
    if let Some(note) = &provider.note {
        tracing::info!("  {note}");
    }
}

/// Runs the `play` subcommand.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the selection is
/// invalid for the title.
#[instrument(skip_all)]
async fn run_play(args: &PlayArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let registry = config.registry()?;
    let client = build_catalog_client(&config)?;
    let kind = MediaKind::from(args.kind);

    let target = match client.details(args.id, kind).await {
        Ok(detail) => PlaybackTarget::from(&detail),
        Err(e) => {
            warn!("details unavailable, continuing without external ID: {e:#}");
            fallback_target(args.id, kind)
        }
    };

    let entry = args
        .season
        .zip(args.episode)
        .map(|(season, episode)| EntryPoint { season, episode });
    let (mut controller, refresh) = PlaybackStateController::enter(registry, target, entry)?;
    if let Some(refresh) = refresh {
        let listing = refresh.fetch(&client).await;
        controller.apply_episodes(listing);
        let episode = controller.state().episode;
        if !controller.episodes().is_empty()
            && !controller.episodes().iter().any(|e| e.episode_number == episode)
        {
            warn!("episode {episode} is not listed for this season");
        }
    }
    if let Some(id) = &args.provider {
        controller.select_provider(id)?;
    }

    let state = controller.state();
    tracing::info!("Title: {}", controller.target().title);
    if kind == MediaKind::Series {
        tracing::info!("Season {} Episode {}", state.season, state.episode);
    }

    let request = controller.request();
    if args.all {
        for provider in controller.registry().iter() {
            print_link(provider, &provider.resolve(&request));
        }
        return Ok(());
    }

    let mut surface = SurfaceTracker::new();
    if let Some(load) = surface.poll(&controller) {
        print_link(controller.provider(), &load.resolution);
    }

    Ok(())
}

/// Runs the `providers` subcommand.
///
/// # Errors
///
/// Returns an error if the config file is invalid.
fn run_providers(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let registry = config.registry()?;

    tracing::info!("ID\tName\tBadge\tReferrer policy");
    for provider in registry.iter() {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            provider.id,
            provider.name,
            provider.guidance.as_ref().map_or("-", |g| g.badge()),
            provider.referrer_policy,
        );
    }

    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the key is blank or the config cannot be written.
fn run_config_set_key(key: &str, dir: Option<&PathBuf>) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    config.catalog.api_key = Some(key.to_owned());
    config.save(&path)?;

    tracing::info!("Saved API key to {}", path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;

    tracing::info!("Config file: {}", path.display());
    let key = match (std::env::var(API_KEY_ENV).ok(), &config.catalog.api_key) {
        (Some(env), _) if !env.trim().is_empty() => {
            format!("{} (from {API_KEY_ENV})", mask_key(&env))
        }
        (_, Some(stored)) => mask_key(stored),
        _ => String::from("(not set)"),
    };
    tracing::info!("API key: {key}");
    tracing::info!("Language: {}", config.catalog.language);
    tracing::info!(
        "Base URL: {}",
        config.catalog.base_url.as_deref().unwrap_or("(default)")
    );
    tracing::info!("Extra providers: {}", config.providers.len());
    Ok(())
}

/// Writes completions for `shell` to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "cinehub", &mut std::io::stdout());
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
        Commands::Browse(args) => run_browse(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Season(args) => run_season(&args, dir).await,
        Commands::Play(args) => run_play(&args, dir).await,
        Commands::Providers => run_providers(dir),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::SetKey { key } => run_config_set_key(&key, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
