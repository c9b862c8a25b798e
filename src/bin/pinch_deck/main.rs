//! pinch_deck - terminal simulator for the gesture controls
//!
//! Run with: cargo run -- [settings.toml]
//!
//! Logs go to `pinch_deck.log` (override with `PINCH_DECK_LOG`), filtered by
//! `RUST_LOG`.

mod app;
mod hands;
mod ui;

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use app::App;
use pinch_deck::Settings;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(Path::new(&path))?,
        None => Settings::default(),
    };
    settings.validate().wrap_err("invalid settings")?;
    info!(?settings, "starting simulator");

    let mut app = App::new(settings)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

fn init_logging() -> EyreResult<()> {
    let path = std::env::var("PINCH_DECK_LOG").unwrap_or_else(|_| "pinch_deck.log".into());
    let file = File::create(&path).wrap_err_with(|| format!("failed to create log file {path}"))?;

    // The terminal belongs to the TUI, so logs only go to the file
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

#[cfg(feature = "serde")]
fn load_settings(path: &Path) -> EyreResult<Settings> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Settings::from_toml_str(&raw).wrap_err_with(|| format!("failed to load {}", path.display()))
}

#[cfg(not(feature = "serde"))]
fn load_settings(path: &Path) -> EyreResult<Settings> {
    Err(color_eyre::eyre::eyre!(
        "cannot load {}: settings files need the `serde` feature",
        path.display()
    ))
}
