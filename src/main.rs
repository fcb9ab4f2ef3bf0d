use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::info;
use track_resolver::config::AppConfig;
use track_resolver::downloader::YtDlpEngine;
use track_resolver::security::CookieJar;
use track_resolver::toggles::StaticToggles;
use track_resolver::utils::TokioCommandRunner;
use track_resolver::{ResolveContext, SourceType, Track, TrackInfo};

/// Resolve a track into a local file or a direct playback URL
#[derive(Parser, Debug)]
#[command(name = "track-resolver", version)]
struct Cli {
    /// Canonical link of the track
    link: String,

    #[arg(long)]
    title: Option<String>,

    /// apple, resso, spotify, youtube, m3u8, soundcloud, telegram or other
    #[arg(long, default_value = "youtube")]
    source: SourceType,

    /// Fetch video and audio instead of audio only
    #[arg(long)]
    video: bool,

    /// Duration in seconds, 0 when unknown
    #[arg(long)]
    duration: Option<u64>,

    #[arg(long)]
    download_url: Option<String>,

    #[arg(long)]
    live: Option<bool>,

    /// Already-downloaded file for this track
    #[arg(long)]
    file_path: Option<String>,

    /// Override the download toggle (true caches files, false streams direct URLs)
    #[arg(long)]
    download_mode: Option<bool>,

    #[arg(long)]
    config: Option<PathBuf>,
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(Some(path.as_path()))?,
        None => AppConfig::load()?,
    };
    info!("Configuration loaded successfully");

    let toggles = Arc::new(StaticToggles::new(config.features.clone()));
    if let Some(enabled) = cli.download_mode {
        toggles.set(&config.download_toggle_key, enabled).await;
    }

    let engine = YtDlpEngine::new().with_ytdlp_path(config.ytdlp_path.clone());
    let ctx = ResolveContext::new(
        &config,
        toggles,
        Arc::new(engine),
        Arc::new(CookieJar::from_config(&config)),
        Arc::new(TokioCommandRunner),
    );

    let mut info = TrackInfo::new(cli.title, cli.link, cli.source)
        .with_video(cli.video)
        .with_download_url(cli.download_url)
        .with_live(cli.live)
        .with_file_path(cli.file_path);
    info.duration = cli.duration;

    let mut track = Track::new(info)?;
    Ok(track.resolve(&ctx).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    match run(Cli::parse()).await {
        Ok(resolved) => {
            println!("{}", resolved);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("could not play this track: {}", e);
            eprintln!("could not play this track: {}", e);
            ExitCode::FAILURE
        }
    }
}
