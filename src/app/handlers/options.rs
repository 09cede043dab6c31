//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::SessionOptions;

/// Übernimmt Optionen in den laufenden Zustand.
pub fn apply(state: &mut AppState, options: SessionOptions) {
    state
        .session
        .set_budget_factor(options.flood_fill_budget_factor);
    state
        .announcements
        .set_capacity(options.announcement_log_capacity);
    state.options = options;
    log::info!("Optionen übernommen");
}

/// Speichert die aktuellen Optionen neben der Binary.
pub fn save(state: &mut AppState) -> anyhow::Result<()> {
    let path = SessionOptions::config_path();
    state.options.save_to_file(&path)
}
