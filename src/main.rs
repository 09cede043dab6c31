//! Placement Review (Kommandozeile).
//!
//! Spielt eine Szenario-Datei über den Controller ab und gibt das
//! Ansage-Protokoll als JSON aus.

use placement_review::{Scenario, SessionOptions};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Placement Review v{} startet...", env!("CARGO_PKG_VERSION"));

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        anyhow::bail!("Aufruf: placement-review <szenario.toml>");
    };

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = SessionOptions::config_path();
    let options = SessionOptions::load_from_file(&config_path);

    let scenario = Scenario::load(&path)?;
    let report = scenario.report(&options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
