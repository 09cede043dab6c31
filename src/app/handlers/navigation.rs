//! Handler für die navigierbare Liste.

use crate::app::navigation::{publish_session, NavItem};
use crate::app::summary::Announcement;
use crate::app::AppState;

/// Veröffentlicht die Liste der aktuellen Prüfung neu (oder leert sie).
pub fn refresh(state: &mut AppState) {
    let count = publish_session(
        &mut state.navigation,
        &state.session,
        &state.options,
        state.cursor,
    );
    log::debug!("Navigation aktualisiert: {} Einträge", count);
}

/// Springt zum nächsten Eintrag.
pub fn focus_next(state: &mut AppState) {
    let item = state.navigation.next_item().cloned();
    focus(state, item);
}

/// Springt zum vorherigen Eintrag.
pub fn focus_previous(state: &mut AppState) {
    let item = state.navigation.previous_item().cloned();
    focus(state, item);
}

fn focus(state: &mut AppState, item: Option<NavItem>) {
    let Some(item) = item else {
        log::debug!("Navigation: keine Einträge");
        return;
    };
    state.cursor = item.cell;
    state.announce(Announcement::Focused {
        cell: item.cell,
        label: item.label,
    });
}
