//! Zeichen-Werkzeuge: Shape-Rasterisierung und Aufbau von Platzierungs-Batches.
//!
//! Ein Werkzeug erzeugt reine Daten (`PlacementBatch`), die Sitzung
//! übernimmt Besitz und Undo-Buchführung. Externe Zeichen-Oberflächen können
//! Batches auch selbst bauen; `draw_shape` ist die Referenz-Implementierung.

/// Batch-Aufbau aus einer Zeichen-Anfrage gegen den Raster-Speicher.
mod drawing;
/// Rasterisierung von Linien und Rechtecken.
pub mod shapes;

pub use drawing::draw_shape;
pub use shapes::rasterize;

use super::segment::EditCategory;
use crate::core::{AreaId, Cell, DesignationTag, OwnedObject, ZoneId};
use serde::{Deserialize, Serialize};

// ── Typen ────────────────────────────────────────────────────────

/// Form, mit der ein Segment gezeichnet wurde (nur für Zusammenfassungen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Einzelne Zelle
    #[default]
    Single,
    /// Gerade Linie (Bresenham)
    Line,
    /// Gefülltes Rechteck
    FilledRect,
    /// Rechteck-Umriss
    EmptyRect,
}

/// Zelle, an der das Werkzeug nicht platzieren konnte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedCell {
    /// Blockierte Zelle
    pub cell: Cell,
    /// Grund (Anzeigename des Blockierers)
    pub reason: String,
}

impl BlockedCell {
    /// Erstellt eine blockierte Zelle.
    pub fn new(cell: Cell, reason: impl Into<String>) -> Self {
        Self {
            cell,
            reason: reason.into(),
        }
    }
}

/// Nutzlast eines Batches, eine Variante je Speichermodell.
#[derive(Debug)]
pub enum EditPayload {
    /// Bereits gesetzte vorläufige Objekte; Besitz geht an die Sitzung
    Objects(Vec<OwnedObject>),
    /// Zellen, die mit dem Tag markiert werden sollen
    Designations {
        /// Werkzeug-Tag
        tag: DesignationTag,
        /// Zielzellen
        cells: Vec<Cell>,
    },
    /// Zellen, die einer Zone hinzugefügt werden (`None` = neue Zone)
    ZoneAdd {
        /// Zielzone
        zone: Option<ZoneId>,
        /// Zielzellen
        cells: Vec<Cell>,
    },
    /// Zellen, die aus einer bestehenden Zone entfernt werden
    ZoneShrink {
        /// Zielzone
        zone: ZoneId,
        /// Zu entfernende Zellen
        cells: Vec<Cell>,
    },
    /// Zellen, deren Bereichs-Mitgliedschaft gesetzt wird
    Area {
        /// Zielbereich
        area: AreaId,
        /// Zielzellen
        cells: Vec<Cell>,
        /// `true` = aufnehmen, `false` = entfernen
        member: bool,
    },
}

impl EditPayload {
    /// Bearbeitungs-Kategorie dieser Nutzlast.
    pub fn category(&self) -> EditCategory {
        match self {
            EditPayload::Objects(_) => EditCategory::ObjectPlacement,
            EditPayload::Designations { .. } => EditCategory::DesignationToggle,
            EditPayload::ZoneAdd { .. } => EditCategory::ZoneMembership,
            EditPayload::ZoneShrink { .. } => EditCategory::ZoneShrink,
            EditPayload::Area { .. } => EditCategory::AreaMembership,
        }
    }
}

/// Ergebnis eines abgeschlossenen Zeichenversuchs.
#[derive(Debug)]
pub struct PlacementBatch {
    /// Verwendete Form
    pub shape: ShapeKind,
    /// Platzierte Objekte bzw. Zielzellen
    pub payload: EditPayload,
    /// Zellen, an denen die Platzierung blockiert war
    pub blocked: Vec<BlockedCell>,
}

impl PlacementBatch {
    /// Batch aus vorläufigen Objekten.
    pub fn objects(shape: ShapeKind, objects: Vec<OwnedObject>, blocked: Vec<BlockedCell>) -> Self {
        Self {
            shape,
            payload: EditPayload::Objects(objects),
            blocked,
        }
    }

    /// Batch aus Zellen mit beliebiger Zell-Nutzlast.
    pub fn cells(shape: ShapeKind, payload: EditPayload, blocked: Vec<BlockedCell>) -> Self {
        Self {
            shape,
            payload,
            blocked,
        }
    }

    /// Kategorie der Nutzlast.
    pub fn category(&self) -> EditCategory {
        self.payload.category()
    }
}

/// Art der Bearbeitung einer Zeichen-Anfrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditKind {
    /// Wandartige Objekte setzen
    Wall {
        /// Anzeigename der Objekte
        #[serde(default = "default_wall_label")]
        label: String,
    },
    /// Zellen markieren
    Designate {
        /// Werkzeug-Tag
        tag: DesignationTag,
    },
    /// Zone erweitern (`None` = neue Zone)
    ZoneAdd {
        /// Zielzone
        #[serde(default)]
        zone: Option<ZoneId>,
    },
    /// Zone verkleinern
    ZoneShrink {
        /// Zielzone
        zone: ZoneId,
    },
    /// Bereichs-Mitgliedschaft setzen
    Area {
        /// Zielbereich
        area: AreaId,
        /// Aufnehmen oder entfernen
        #[serde(default = "default_true")]
        member: bool,
    },
}

fn default_wall_label() -> String {
    crate::core::grid_map::WALL_LABEL.to_owned()
}

fn default_true() -> bool {
    true
}

/// Zeichen-Anfrage: Form zwischen zwei Eckzellen plus Bearbeitungsart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    /// Form
    pub shape: ShapeKind,
    /// Startzelle
    pub from: Cell,
    /// Endzelle (bei `Single` ignoriert)
    pub to: Cell,
    /// Bearbeitungsart
    pub edit: EditKind,
}
