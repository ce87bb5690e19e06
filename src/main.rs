use std::sync::Arc;

use clap::Parser;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::{error, info, instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod adapters;
mod application;
mod cli;
mod config;
mod domain;
mod ports;
mod prettyprint;

use crate::adapters::google::{
    auth::auth, http_client::http_client, playlist_manager::PlaylistManager,
    presentation_manager::PresentationManager, spreadsheet_manager::SpreadsheetManager,
};
use crate::application::{
    quiz_kit::{parse_videos, run_routines, QuizPlan, QuizServices},
    video_grid::VideoGridSlideBuilder,
};
use crate::cli::Args;
use crate::config::{
    app_config::{AppConfig, ConfigError},
    logging_config::LoggingConfig,
};
use crate::domain::entry::{load_entries, shuffle_entries};
use crate::prettyprint::prettyprint::PrettyFormatter;

#[derive(Error, Debug)]
enum AppError {
    #[error("invalid configuration")]
    Config,
    #[error("could not read the quiz entries")]
    Entries,
    #[error("invalid slide layout")]
    Layout,
    #[error("could not authenticate with Google")]
    Auth,
    #[error("quiz generation failed")]
    Routine,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = AppConfig::load();

    let log_file = match &config {
        Ok(config) => config.logging.log_file.clone(),
        Err(_) => LoggingConfig::default().log_file,
    };
    setup_tracing(&log_file)?;
    setup_panic_hook();

    info!("Starting quiz-kit for '{}'", args.name);

    match run(args, config).await {
        Ok(()) => info!("✅ Quiz ready"),
        Err(report) => error!("❌ {:?}", report),
    }

    Ok(())
}

#[instrument(skip(config))]
async fn run(
    args: Args,
    config: error_stack::Result<AppConfig, ConfigError>,
) -> error_stack::Result<(), AppError> {
    let config = config.change_context(AppError::Config)?;

    let mut entries = load_entries(&args.urls).change_context(AppError::Entries)?;
    if args.shuffle {
        shuffle_entries(&mut entries);
    }
    info!("Loaded {} songs", entries.len());

    let videos = parse_videos(&entries, args.duration).change_context(AppError::Entries)?;

    let grid = VideoGridSlideBuilder::new(args.grid_spec(&config.layout), args.duration);
    grid.spec.validate().change_context(AppError::Layout)?;

    let client = http_client();
    let authenticator = auth(&config.google, client.clone())
        .await
        .change_context(AppError::Auth)?;

    let services = QuizServices {
        presentations: Arc::new(PresentationManager::new(
            reqwest::Client::new(),
            authenticator.clone(),
        )),
        spreadsheets: Arc::new(SpreadsheetManager::new(client.clone(), authenticator.clone())),
        playlists: Arc::new(PlaylistManager::new(client, authenticator)),
    };

    let plan = QuizPlan {
        name: args.name,
        host: args.host,
        fillers: args.fillers,
        grid,
        entries: entries.into(),
        videos: videos.into(),
        playlist_description: config.playlist.description,
        privacy_status: config.playlist.privacy_status,
    };

    run_routines(&plan.routines(&services))
        .await
        .change_context(AppError::Routine)
}

fn setup_tracing(log_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let indicatif_layer = IndicatifLayer::new();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(log_file)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("quiz_kit", tracing::Level::TRACE)
                .with_target("yup_oauth2", tracing::Level::INFO),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
