use anyhow::Context;
use eframe::egui;

use tweet_explorer::app::TweetExplorerApp;
use tweet_explorer::config::AppConfig;
use tweet_explorer::data::loader::load_file;
use tweet_explorer::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (state, config) = match startup() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e:#}");
            return Err(e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tweet Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(TweetExplorerApp::new(state, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}

/// Load config and dataset. Any failure here stops the process before a
/// window opens.
fn startup() -> anyhow::Result<(AppState, AppConfig)> {
    let config = AppConfig::load().context("loading configuration")?;
    let dataset = load_file(&config.dataset_path, &config.category_column)?;
    log::info!(
        "Loaded {} tweets with categories {:?}",
        dataset.len(),
        dataset.categories()
    );
    Ok((AppState::new(dataset, config.page_size), config))
}
