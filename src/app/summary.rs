//! Strukturierte Zusammenfassungen und Ansagen an der Ausgabe-Grenze.
//!
//! Hier wird kein Text formuliert; Sprachausgabe oder Anzeige bauen ihre
//! Sätze selbst aus diesen Daten.

use super::history::UndoReport;
use super::segment::EditCategory;
use super::session::{ConfirmReport, RefusalReason};
use super::tools::ShapeKind;
use crate::core::{Cell, Enclosure, ObstacleClass};
use serde::Serialize;
use std::collections::VecDeque;

/// Kurzfassung eines Einschlusses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnclosureSummary {
    /// Anzahl der Innenzellen
    pub interior: usize,
    /// Anzahl zusammenhängender Lücken in der Begrenzung
    pub gaps: usize,
    /// Klassifizierte Inhalte des Innenraums
    pub obstacles: Vec<ObstacleClass>,
}

impl From<&Enclosure> for EnclosureSummary {
    fn from(enclosure: &Enclosure) -> Self {
        Self {
            interior: enclosure.interior_count(),
            gaps: enclosure.gap_count,
            obstacles: enclosure.obstacle_classes.clone(),
        }
    }
}

/// Zustand der Prüfung nach einer Änderung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Kategorie der Sitzung
    pub category: EditCategory,
    /// Form des obersten Segments
    pub shape: ShapeKind,
    /// Anzahl der Segmente
    pub segment_count: usize,
    /// Änderungen im obersten Segment
    pub placed_count: usize,
    /// Blockierte Zellen im obersten Segment
    pub blocked_count: usize,
    /// Änderungen über alle Segmente
    pub total_placed: usize,
    /// Hindernisse über alle Segmente (ohne Duplikate)
    pub total_obstacles: usize,
    /// Gefundene Einschlüsse (nur Objekt-Platzierung)
    pub enclosures: Vec<EnclosureSummary>,
    /// Anzahl der Zonenteile (nur Zonen-Kategorien)
    pub region_split_count: Option<usize>,
}

impl SessionSummary {
    /// Zerfällt die Zielzone in mehrere Teile?
    pub fn is_split(&self) -> bool {
        self.region_split_count.is_some_and(|n| n > 1)
    }
}

/// Ein Ereignis für die Ausgabe-Grenze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Announcement {
    /// Karte geladen
    MapLoaded {
        /// Breite in Zellen
        width: i32,
        /// Höhe in Zellen
        height: i32,
    },
    /// Segment aufgenommen
    Placed {
        /// Zustand danach
        summary: SessionSummary,
    },
    /// Zelle per Toggle geändert
    Toggled {
        /// Zelle
        cell: Cell,
        /// `true` = hinzugefügt, `false` = entfernt
        added: bool,
        /// Zustand danach
        summary: Option<SessionSummary>,
    },
    /// Operation abgelehnt
    Refused {
        /// Betroffene Zelle, falls zellbezogen
        cell: Option<Cell>,
        /// Grund
        reason: RefusalReason,
    },
    /// Segmente rückgängig gemacht
    Undone {
        /// Bericht
        report: UndoReport,
        /// Zustand danach (`None` = Prüfung beendet)
        summary: Option<SessionSummary>,
    },
    /// Prüfung bestätigt
    Confirmed {
        /// Bericht
        report: ConfirmReport,
    },
    /// Prüfung abgebrochen, alles zurückgenommen
    Cancelled {
        /// Bericht
        report: UndoReport,
    },
    /// Nächstes Segment wird gezeichnet
    AddingMore,
    /// Zeichnen abgebrochen, Prüfung unverändert
    ResumedReview {
        /// Zustand
        summary: Option<SessionSummary>,
    },
    /// Cursor auf einen Listeneintrag gesetzt
    Focused {
        /// Zelle
        cell: Cell,
        /// Anzeigename
        label: String,
    },
    /// Vorbedingung verletzt
    Failed {
        /// Fehlermeldung
        message: String,
    },
}

/// Begrenztes Protokoll der Ansagen in Reihenfolge.
#[derive(Debug, Clone)]
pub struct AnnouncementLog {
    entries: VecDeque<Announcement>,
    capacity: usize,
}

impl Default for AnnouncementLog {
    fn default() -> Self {
        Self::new(crate::shared::options::ANNOUNCEMENT_LOG_CAPACITY)
    }
}

impl AnnouncementLog {
    /// Erstellt ein leeres Protokoll mit Kapazität (mindestens 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Hängt eine Ansage an, älteste Einträge fallen heraus.
    pub fn push(&mut self, announcement: Announcement) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(announcement);
    }

    /// Ändert die Kapazität und kürzt ggf. von vorne.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Letzte Ansage.
    pub fn last(&self) -> Option<&Announcement> {
        self.entries.back()
    }

    /// Alle Ansagen, älteste zuerst.
    pub fn entries(&self) -> impl Iterator<Item = &Announcement> {
        self.entries.iter()
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Ansagen vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kopie aller Einträge für Serialisierung.
    pub fn to_vec(&self) -> Vec<Announcement> {
        self.entries.iter().cloned().collect()
    }
}
