mod action;
mod app;
mod component;
mod components;
mod focus;
mod player;
mod theme;
mod widgets;

use radiodex_core::favorites::{FavoritesStore, FileStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = radiodex_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("tui.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // The terminal belongs to ratatui, so logs go to a file. RUST_LOG
    // overrides; HTTP client internals stay quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("radiodex log: {}", log_path.display());
    tracing::info!("radiodex starting…");

    let config = radiodex_core::config::Config::load().unwrap_or_default();

    let directory = radiodex_core::directory::DirectoryClient::new(&config.directory.base_url)?;
    let favorites = FavoritesStore::load(Box::new(FileStorage::new(
        config.paths.favorites_file.clone(),
    )));
    let controller = radiodex_core::controller::SearchController::new(favorites);

    let ui_state_path = data_dir.join("ui_state.json");
    let app = app::App::new(controller, directory, ui_state_path);
    app.run().await?;

    Ok(())
}
