//! Handler für Karte und Cursor.

use crate::app::summary::Announcement;
use crate::app::AppState;
use crate::core::{Cell, GridMap, GridQuery};

/// Lädt eine Karte aus ASCII-Zeilen.
///
/// Eine laufende Prüfung auf der alten Karte wird vorher abgebrochen.
pub fn load(state: &mut AppState, rows: &[String]) -> anyhow::Result<()> {
    let map = GridMap::from_ascii(rows)?;

    if let Some(old) = state.map.as_mut() {
        if state.session.cancel(old).is_some() {
            log::info!("Laufende Prüfung vor dem Kartenwechsel abgebrochen");
        }
    }

    let (width, height) = (map.width(), map.height());
    state.map = Some(map);
    state.cursor = Cell::default();
    log::info!("Karte geladen: {}x{}", width, height);
    state.announce(Announcement::MapLoaded { width, height });
    Ok(())
}

/// Setzt den Cursor. Zellen außerhalb der Karte werden ignoriert.
pub fn move_cursor(state: &mut AppState, cell: Cell) {
    if let Some(map) = state.map.as_ref() {
        if !map.in_bounds(cell) {
            log::debug!("Cursor außerhalb der Karte ignoriert: {}", cell);
            return;
        }
    }
    state.cursor = cell;
}
