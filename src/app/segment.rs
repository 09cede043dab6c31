//! Segment-Stapel einer Review-Sitzung.
//!
//! Ein Segment ist ein atomarer Batch aus genau einem Zeichenversuch, samt
//! allem, was zum Rückgängigmachen nötig ist. Der Stapel selbst mutiert
//! keinen Speicher; das Invertieren übernimmt `history::revert_segment`.

use super::tools::ShapeKind;
use crate::core::{AreaId, BoundaryObject, Cell, DesignationTag, OwnedObject, ZoneId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Bearbeitungs-Kategorie, fest für die Dauer einer Sitzung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditCategory {
    /// Objekte (Wände) platzieren
    ObjectPlacement,
    /// Zellen markieren
    DesignationToggle,
    /// Zellen einer Zone hinzufügen
    ZoneMembership,
    /// Zellen aus einer Zone entfernen (keine Hindernisse)
    ZoneShrink,
    /// Bereichs-Mitgliedschaft setzen
    AreaMembership,
}

impl EditCategory {
    /// Kategorien, die auf eine Zielzone wirken.
    pub fn is_zone(self) -> bool {
        matches!(self, EditCategory::ZoneMembership | EditCategory::ZoneShrink)
    }
}

/// Vorheriger Mitgliedschafts-Zustand einer Bereichszelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaEdit {
    /// Geänderte Zelle
    pub cell: Cell,
    /// Mitgliedschaft vor der Änderung
    pub was_member: bool,
}

/// Zonen-Änderung mit Zustand vor dem Segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEdit {
    /// Zielzone
    pub zone: ZoneId,
    /// Tatsächlich geänderte Zellen (Toggle ergänzt hier)
    pub cells: Vec<Cell>,
    /// Zellen der Zone vor dem Segment
    pub before: IndexSet<Cell>,
    /// Per Toggle entfernte Zellen, die ein tieferes Segment hinzugefügt hat
    pub withdrawn: Vec<Cell>,
}

impl ZoneEdit {
    /// Erstellt eine Zonen-Änderung ohne Rücknahmen.
    pub fn new(zone: ZoneId, cells: Vec<Cell>, before: IndexSet<Cell>) -> Self {
        Self {
            zone,
            cells,
            before,
            withdrawn: Vec::new(),
        }
    }
}

/// Inversions-Daten eines Segments, eine Variante je Speichermodell.
#[derive(Debug)]
pub enum SegmentEdits {
    /// Besitz-Handles der vorläufigen Objekte
    Objects(Vec<OwnedObject>),
    /// Mit diesem Tag neu markierte Zellen
    Designations {
        /// Tag des Werkzeugs
        tag: DesignationTag,
        /// Markierte Zellen
        cells: Vec<Cell>,
    },
    /// Hinzugefügte Zonenzellen
    ZoneAdd(ZoneEdit),
    /// Entfernte Zonenzellen
    ZoneShrink(ZoneEdit),
    /// Geänderte Bereichszellen
    Area {
        /// Zielbereich
        area: AreaId,
        /// Änderungen in Reihenfolge
        edits: Vec<AreaEdit>,
    },
}

impl SegmentEdits {
    /// Kategorie der Änderungen.
    pub fn category(&self) -> EditCategory {
        match self {
            SegmentEdits::Objects(_) => EditCategory::ObjectPlacement,
            SegmentEdits::Designations { .. } => EditCategory::DesignationToggle,
            SegmentEdits::ZoneAdd(_) => EditCategory::ZoneMembership,
            SegmentEdits::ZoneShrink(_) => EditCategory::ZoneShrink,
            SegmentEdits::Area { .. } => EditCategory::AreaMembership,
        }
    }

    /// Anzahl der Einzeländerungen.
    pub fn len(&self) -> usize {
        match self {
            SegmentEdits::Objects(objects) => objects.len(),
            SegmentEdits::Designations { cells, .. } => cells.len(),
            SegmentEdits::ZoneAdd(edit) | SegmentEdits::ZoneShrink(edit) => edit.cells.len(),
            SegmentEdits::Area { edits, .. } => edits.len(),
        }
    }

    /// `true`, wenn das Segment nichts geändert hat.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zellen tieferer Segmente, die dieses Segment wieder entfernt hat.
    pub fn withdrawn_count(&self) -> usize {
        match self {
            SegmentEdits::ZoneAdd(edit) => edit.withdrawn.len(),
            _ => 0,
        }
    }
}

/// Ein Segment des Stapels.
#[derive(Debug)]
pub struct Segment {
    /// Fortlaufende ID innerhalb der Sitzung
    pub id: u64,
    /// Verwendete Form
    pub shape: ShapeKind,
    /// Inversions-Daten
    pub edits: SegmentEdits,
    /// Anzahl blockierter Zellen beim Zeichnen
    pub blocked_count: usize,
    /// Hindernis-Zellen, die dieses Segment neu eingebracht hat
    pub new_obstacles: Vec<Cell>,
}

/// LIFO-Stapel der Segmente einer Sitzung.
#[derive(Debug, Default)]
pub struct SegmentStack {
    segments: Vec<Segment>,
    next_id: u64,
}

impl SegmentStack {
    /// Erstellt einen leeren Stapel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vergibt die nächste Segment-ID.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Legt ein Segment oben auf.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Nimmt das oberste Segment ab.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Nimmt alle Segmente ab, oberstes zuerst.
    pub fn drain(&mut self) -> Vec<Segment> {
        let mut segments = std::mem::take(&mut self.segments);
        segments.reverse();
        segments
    }

    /// Oberstes Segment.
    pub fn top(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Oberstes Segment (nur für Toggle).
    pub fn top_mut(&mut self) -> Option<&mut Segment> {
        self.segments.last_mut()
    }

    /// Anzahl der Segmente.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Gibt zurück ob der Stapel leer ist.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Summe aller Einzeländerungen abzüglich späterer Rücknahmen.
    pub fn placed_count(&self) -> usize {
        let placed: usize = self.segments.iter().map(|s| s.edits.len()).sum();
        let withdrawn: usize = self.segments.iter().map(|s| s.edits.withdrawn_count()).sum();
        placed.saturating_sub(withdrawn)
    }

    /// Alle noch gehaltenen vorläufigen Objekte als Begrenzung.
    pub fn boundary_objects(&self) -> Vec<BoundaryObject> {
        self.segments
            .iter()
            .filter_map(|s| match &s.edits {
                SegmentEdits::Objects(objects) => Some(objects),
                _ => None,
            })
            .flatten()
            .map(OwnedObject::as_boundary)
            .collect()
    }

    /// Segmente von unten nach oben.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}
