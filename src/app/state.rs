//! Application State: zentrale Datenhaltung.

use super::navigation::NavigationBoard;
use super::session::PlacementSession;
use super::summary::{Announcement, AnnouncementLog};
use super::CommandLog;
use crate::core::{Cell, GridMap};
use crate::shared::SessionOptions;

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Aktuell geladene Karte (None = keine Karte geladen)
    pub map: Option<GridMap>,
    /// Laufende oder inaktive Platzierungs-Prüfung
    pub session: PlacementSession,
    /// Cursor-Zelle
    pub cursor: Cell,
    /// Veröffentlichte Navigationsliste
    pub navigation: NavigationBoard,
    /// Ansagen an die Ausgabe
    pub announcements: AnnouncementLog,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: SessionOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            map: None,
            session: PlacementSession::new(options.flood_fill_budget_factor),
            cursor: Cell::default(),
            navigation: NavigationBoard::new(),
            announcements: AnnouncementLog::new(options.announcement_log_capacity),
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Hängt eine Ansage an das Protokoll.
    pub fn announce(&mut self, announcement: Announcement) {
        log::debug!("Ansage: {:?}", announcement);
        self.announcements.push(announcement);
    }

    /// Letzte Ansage (für Tests und Ausgabe).
    pub fn last_announcement(&self) -> Option<&Announcement> {
        self.announcements.last()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
