use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cubelaunch::application::tasks::LauncherTasks;
use cubelaunch::application::use_cases::LaunchGameUseCase;
use cubelaunch::infrastructure::{
    AppConfig, ClassiCubeClient, CliArgs, OptionsStore, ProcessGameLauncher, StorageManager,
};
use cubelaunch::presentation::App;
use cubelaunch::presentation::ui::{LauncherContext, LauncherSettings};

/// Release the bundled client corresponds to.
const GAME_VERSION: &str = "1.3.7";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn resolve_executable(config: &AppConfig, data_dir: &std::path::Path) -> PathBuf {
    if config.game_executable.is_absolute() {
        config.game_executable.clone()
    } else {
        data_dir.join(&config.game_executable)
    }
}

fn create_context(config: &AppConfig) -> Result<LauncherContext> {
    let data_dir = config.effective_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let game_executable = resolve_executable(config, &data_dir);

    let api = Arc::new(ClassiCubeClient::new(
        config.api_base_url.clone(),
        config.update_base_url.clone(),
    )?);
    let game = Arc::new(ProcessGameLauncher::new(
        game_executable.clone(),
        data_dir.clone(),
    ));
    let options = OptionsStore::load(&data_dir)?;

    let settings = LauncherSettings {
        close_on_launch: config.close_on_launch,
        check_updates_on_start: config.check_updates_on_start,
        data_dir,
        game_executable,
        game_version: GAME_VERSION.to_string(),
    };

    Ok(LauncherContext::new(
        LauncherTasks::new(api),
        options,
        LaunchGameUseCase::new(game),
        settings,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;
    info!(version = cubelaunch::VERSION, "Starting Cubelaunch");

    let ctx = create_context(&config)?;
    let app = App::new(ctx, config.tick_rate());

    let mut terminal = ratatui::init();
    if config.mouse {
        execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if config.mouse
        && let Err(e) = execute!(stdout(), DisableMouseCapture)
    {
        warn!(error = %e, "Failed to release mouse capture");
    }
    ratatui::restore();

    let ctx = result?;
    if ctx.should_update {
        info!(path = %ctx.update_path().display(), "Update ready to apply");
        println!("Update downloaded to {}", ctx.update_path().display());
    }

    Ok(())
}
