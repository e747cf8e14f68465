//! `derma-tui`: terminal showcase of the clinic site's public content.

mod action;
mod app;
mod component;
mod event;
mod loader_bridge;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use derma_core::{CollectionLoader, EmptyPolicy, Site, SiteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::app::App;

/// Browse the clinic site's doctors, services, results, reviews, videos
/// and FAQs from the terminal.
#[derive(Debug, Parser)]
#[command(name = "derma-tui", version, about)]
struct Cli {
    /// Backend base URL (overrides the profile's api_url)
    #[arg(long, env = "DERMA_API_URL")]
    api_url: Option<String>,

    /// Config profile to read the backend from
    #[arg(short, long, env = "DERMA_PROFILE")]
    profile: Option<String>,

    /// Skip the backend and show built-in content only (wins over --api-url)
    #[arg(long)]
    offline: bool,

    /// How long to wait for each collection before falling back
    #[arg(long, value_name = "MS")]
    load_timeout_ms: Option<u64>,

    /// Log file path (defaults to derma-tui.log in the temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only logging; the terminal belongs to the UI.
fn setup_tracing(cli: &Cli) -> tracing_appender::non_blocking::WorkerGuard {
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("derma-tui.log"));
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let file_name = path
        .file_name()
        .map_or_else(|| "derma-tui.log".into(), ToOwned::to_owned);

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("derma_tui={level},derma_core={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

/// Backend from `--api-url`, else the config profile, else offline.
fn build_loader(cli: &Cli) -> Result<(Option<CollectionLoader>, String)> {
    if cli.offline {
        return Ok((None, "offline".into()));
    }

    let config = derma_config::load_config_or_default();

    let mut site_config = if let Some(raw) = &cli.api_url {
        let url = Url::parse(raw).wrap_err_with(|| format!("invalid --api-url '{raw}'"))?;
        let mut site = SiteConfig::new(url);
        site.load_timeout = Duration::from_millis(config.defaults.load_timeout_ms);
        if !config.defaults.fallback_on_empty {
            site.empty_policy = EmptyPolicy::ShowEmpty;
        }
        site
    } else {
        let name = config.active_profile_name(cli.profile.as_deref());
        match config.profiles.get(&name) {
            Some(profile) => derma_config::profile_to_site_config(profile, &config.defaults)
                .wrap_err_with(|| format!("profile '{name}'"))?,
            None => return Ok((None, "offline".into())),
        }
    };

    if let Some(ms) = cli.load_timeout_ms {
        site_config.load_timeout = Duration::from_millis(ms);
    }

    let label = site_config
        .api_url
        .host_str()
        .unwrap_or("backend")
        .to_owned();
    let site = Site::new(site_config).wrap_err("failed to build HTTP client")?;
    Ok((Some(site.loader()), label))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_tracing(&cli);
    tui::install_hooks()?;

    let (loader, label) = build_loader(&cli)?;
    info!(backend = %label, "starting derma-tui");

    let (cols, _) = crossterm::terminal::size().unwrap_or((80, 24));
    App::new(loader, label, cols).run().await
}
