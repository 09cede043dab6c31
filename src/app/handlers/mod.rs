//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod map;
pub mod navigation;
pub mod options;
pub mod placement;

use crate::app::summary::Announcement;
use crate::app::AppState;

/// Meldet eine Operation, die ohne geladene Karte nicht möglich ist.
fn report_missing_map(state: &mut AppState, action: &str) {
    log::warn!("{}: keine Karte geladen", action);
    state.announce(Announcement::Failed {
        message: format!("{}: keine Karte geladen", action),
    });
}
