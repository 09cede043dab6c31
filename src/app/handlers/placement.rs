//! Handler für die Platzierungs-Prüfung (Zeichnen, Toggle, Undo, Bestätigen).

use super::report_missing_map;
use crate::app::session::{RefusalReason, ToggleOutcome};
use crate::app::summary::Announcement;
use crate::app::tools::{draw_shape, DrawRequest};
use crate::app::AppState;
use crate::core::Cell;

fn refuse(state: &mut AppState, cell: Option<Cell>, reason: RefusalReason) {
    log::debug!("Abgelehnt: {}", reason);
    state.announce(Announcement::Refused { cell, reason });
}

/// Rastert die Form und nimmt das Ergebnis als Segment auf.
pub fn draw(state: &mut AppState, request: &DrawRequest) -> anyhow::Result<()> {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Zeichnen");
        return Ok(());
    };

    let batch = draw_shape(map, request)?;
    let announcement = match session.enter(map, batch) {
        Ok(summary) => Announcement::Placed { summary },
        Err(e) => Announcement::Failed {
            message: e.to_string(),
        },
    };
    state.announce(announcement);
    Ok(())
}

/// Schaltet eine Zonenzelle um.
pub fn toggle(state: &mut AppState, cell: Cell) {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Umschalten");
        return;
    };

    let added = match session.toggle_cell_at_cursor(map, cell) {
        ToggleOutcome::Added(_) => true,
        ToggleOutcome::Removed(_) => false,
        ToggleOutcome::Refused(reason) => {
            refuse(state, Some(cell), reason);
            return;
        }
    };
    let summary = state.session.summary();
    state.announce(Announcement::Toggled {
        cell,
        added,
        summary,
    });
}

/// Bestätigt die Prüfung.
pub fn confirm(state: &mut AppState) {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Bestätigen");
        return;
    };

    match session.confirm(map) {
        Some(report) => state.announce(Announcement::Confirmed { report }),
        None => refuse(state, None, RefusalReason::Inactive),
    }
}

/// Nimmt das letzte Segment zurück.
pub fn undo_last(state: &mut AppState) {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Rückgängig");
        return;
    };

    match session.undo_last(map) {
        Some(report) => {
            let summary = state.session.summary();
            state.announce(Announcement::Undone { report, summary });
        }
        None => refuse(state, None, RefusalReason::Inactive),
    }
}

/// Nimmt alle Segmente zurück.
pub fn undo_all(state: &mut AppState) {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Alles rückgängig");
        return;
    };

    match session.undo_all(map) {
        Some(report) => state.announce(Announcement::Undone {
            report,
            summary: None,
        }),
        None => refuse(state, None, RefusalReason::Inactive),
    }
}

/// Bricht die Prüfung ab.
pub fn cancel(state: &mut AppState) {
    let AppState { map, session, .. } = state;
    let Some(map) = map.as_mut() else {
        report_missing_map(state, "Abbrechen");
        return;
    };

    match session.cancel(map) {
        Some(report) => state.announce(Announcement::Cancelled { report }),
        None => refuse(state, None, RefusalReason::Inactive),
    }
}

/// Wechselt in den Zeichenmodus für ein weiteres Segment.
pub fn begin_adding_more(state: &mut AppState) {
    match state.session.begin_adding_more() {
        Ok(()) => state.announce(Announcement::AddingMore),
        Err(reason) => refuse(state, None, reason),
    }
}

/// Verlässt den Zeichenmodus ohne Änderung.
pub fn cancel_adding_more(state: &mut AppState) {
    match state.session.cancel_adding_more() {
        Ok(()) => {
            let summary = state.session.summary();
            state.announce(Announcement::ResumedReview { summary });
        }
        Err(reason) => refuse(state, None, reason),
    }
}
