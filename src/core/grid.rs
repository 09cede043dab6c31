//! Schnittstelle zum externen Raster-Speicher.
//!
//! `GridQuery` sind die reinen Punkt-Abfragen (Belegung, Terrain, Zone,
//! Kartengrenzen, Nebel). `GridStore` ergänzt die schmalen Mutationen, die
//! die Review-Sitzung für Platzieren und Rückgängigmachen braucht. Der
//! Speicher gehört immer dem Aufrufer, die Sitzung hält nur Handles.

use super::Cell;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ID eines platzierten Objekts im Raster-Speicher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

/// ID einer Zone (Zellmenge, jede Zelle gehört höchstens einer Zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

/// ID eines Bereichs (Zellen dürfen in mehreren Bereichen liegen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub u32);

/// Werkzeug-spezifische Markierung einer Zelle (z.B. `"abbauen"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignationTag(pub String);

impl DesignationTag {
    /// Erstellt einen Tag aus einem Bezeichner.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for DesignationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ein Objekt auf einer Zelle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    /// Objekt-ID
    pub id: ObjectId,
    /// Anzeigename für Ansagen und Klassifikation
    pub label: String,
    /// Zählt als Wand (begrenzt Einschlüsse)
    pub wall_like: bool,
}

/// Terrain-Art einer Zelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    /// Normaler Boden
    #[default]
    Soil,
    /// Kies
    Gravel,
    /// Sumpf
    Marsh,
    /// Flaches Wasser
    ShallowWater,
    /// Tiefes Wasser (unpassierbar)
    DeepWater,
    /// Massiver Fels (unpassierbar)
    Rock,
}

impl TerrainKind {
    /// Unpassierbares Terrain wirkt wie eine Wand.
    pub fn is_impassable(self) -> bool {
        matches!(self, TerrainKind::DeepWater | TerrainKind::Rock)
    }

    /// Terrain, das in einer Innenraum-Klassifikation genannt wird.
    pub fn is_notable(self) -> bool {
        !matches!(self, TerrainKind::Soil | TerrainKind::Gravel)
    }

    /// Anzeigename.
    pub fn label(self) -> &'static str {
        match self {
            TerrainKind::Soil => "Erde",
            TerrainKind::Gravel => "Kies",
            TerrainKind::Marsh => "Sumpf",
            TerrainKind::ShallowWater => "Flachwasser",
            TerrainKind::DeepWater => "Tiefwasser",
            TerrainKind::Rock => "Fels",
        }
    }
}

/// Besitz-Handle eines noch nicht bestätigten Objekts.
///
/// Weder `Clone` noch `Copy`: das Handle wird genau einmal verbraucht,
/// entweder durch `GridStore::destroy_object` (Undo) oder durch
/// `GridStore::commit_object` (Bestätigen).
#[derive(Debug, PartialEq, Eq)]
#[must_use = "ein OwnedObject muss zerstört oder bestätigt werden"]
pub struct OwnedObject {
    id: ObjectId,
    cell: Cell,
}

impl OwnedObject {
    /// Stellt ein Handle aus. Nur für `GridStore`-Implementierungen gedacht.
    pub fn issue(id: ObjectId, cell: Cell) -> Self {
        Self { id, cell }
    }

    /// Objekt-ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Zelle, auf der das Objekt steht.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Leichtgewichtige Referenz für die Einschluss-Erkennung.
    pub fn as_boundary(&self) -> BoundaryObject {
        BoundaryObject {
            id: self.id,
            cell: self.cell,
        }
    }
}

/// Neu platziertes Begrenzungsobjekt (ID + Zelle), ohne Besitz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryObject {
    /// Objekt-ID
    pub id: ObjectId,
    /// Zelle des Objekts
    pub cell: Cell,
}

/// Ergebnis beim Entfernen einer Markierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignationRemoval {
    /// Genau die gesuchte Markierung wurde entfernt
    Removed,
    /// Markierung mit diesem Tag liegt nicht (mehr) auf der Zelle
    NotFound,
}

/// Fehler des Raster-Speichers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Zelle außerhalb der Karte
    #[error("Zelle {0} liegt außerhalb der Karte")]
    OutOfBounds(Cell),
    /// Objekt existiert nicht (bereits zerstört oder nie platziert)
    #[error("Objekt {0:?} existiert nicht")]
    UnknownObject(ObjectId),
    /// Objekt ist bereits endgültig
    #[error("Objekt {0:?} ist bereits bestätigt")]
    AlreadyCommitted(ObjectId),
    /// Zone existiert nicht
    #[error("Zone {0:?} existiert nicht")]
    UnknownZone(ZoneId),
    /// Bereich existiert nicht
    #[error("Bereich {0:?} existiert nicht")]
    UnknownArea(AreaId),
    /// Zelle gehört bereits zu einer anderen Zone
    #[error("Zelle {cell} gehört bereits zu Zone {zone:?}")]
    CellInOtherZone {
        /// Betroffene Zelle
        cell: Cell,
        /// Zone, zu der die Zelle gehört
        zone: ZoneId,
    },
}

/// Punkt-Abfragen auf dem Raster.
pub trait GridQuery {
    /// Kartenbreite in Zellen.
    fn width(&self) -> i32;

    /// Kartenhöhe in Zellen.
    fn height(&self) -> i32;

    /// Alle Objekte auf einer Zelle (leer außerhalb der Karte).
    fn occupants_at(&self, cell: Cell) -> &[Occupant];

    /// Terrain einer Zelle.
    fn terrain_at(&self, cell: Cell) -> TerrainKind;

    /// Zone, zu der die Zelle gehört.
    fn zone_at(&self, cell: Cell) -> Option<ZoneId>;

    /// Zelle im Nebel (unerkundet).
    fn is_fogged(&self, cell: Cell) -> bool;

    /// Liegt die Zelle innerhalb der Karte?
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width() && cell.z < self.height()
    }

    /// Liegt die Zelle auf dem Kartenrand?
    fn is_edge(&self, cell: Cell) -> bool {
        self.in_bounds(cell)
            && (cell.x == 0
                || cell.z == 0
                || cell.x == self.width() - 1
                || cell.z == self.height() - 1)
    }

    /// Anzahl der Zellen der Karte.
    fn cell_count(&self) -> usize {
        self.width().max(0) as usize * self.height().max(0) as usize
    }
}

/// Mutationen auf dem Raster, die eine Review-Sitzung benötigt.
pub trait GridStore: GridQuery {
    /// Setzt ein vorläufiges Objekt und gibt das Besitz-Handle zurück.
    fn spawn_object(
        &mut self,
        cell: Cell,
        label: &str,
        wall_like: bool,
    ) -> Result<OwnedObject, GridError>;

    /// Zerstört ein vorläufiges Objekt und verbraucht das Handle.
    fn destroy_object(&mut self, object: OwnedObject) -> Result<(), GridError>;

    /// Übergibt ein vorläufiges Objekt endgültig an den Speicher.
    fn commit_object(&mut self, object: OwnedObject) -> Result<ObjectId, GridError>;

    /// Legt eine neue, leere Zone an.
    fn create_zone(&mut self) -> ZoneId;

    /// Löscht eine Zone samt Zellzuordnung.
    fn delete_zone(&mut self, zone: ZoneId) -> Result<(), GridError>;

    /// Zellen einer Zone in Einfügereihenfolge.
    fn zone_cells(&self, zone: ZoneId) -> Option<&IndexSet<Cell>>;

    /// Fügt eine Zelle hinzu. `Ok(false)` wenn sie bereits Mitglied war.
    fn add_zone_cell(&mut self, zone: ZoneId, cell: Cell) -> Result<bool, GridError>;

    /// Entfernt eine Zelle. `Ok(false)` wenn sie kein Mitglied war.
    fn remove_zone_cell(&mut self, zone: ZoneId, cell: Cell) -> Result<bool, GridError>;

    /// Ersetzt die Zellmenge einer Zone vollständig.
    fn set_zone_cells(&mut self, zone: ZoneId, cells: IndexSet<Cell>) -> Result<(), GridError>;

    /// Alle Markierungen einer Zelle.
    fn designations_at(&self, cell: Cell) -> &[DesignationTag];

    /// Setzt eine Markierung. `Ok(false)` wenn sie bereits vorhanden war.
    fn add_designation(&mut self, cell: Cell, tag: &DesignationTag) -> Result<bool, GridError>;

    /// Entfernt genau die Markierung mit diesem Tag.
    fn remove_designation(&mut self, cell: Cell, tag: &DesignationTag) -> DesignationRemoval;

    /// Entfernt alle Markierungen einer Zelle, gibt die Anzahl zurück.
    fn clear_designations(&mut self, cell: Cell) -> usize;

    /// Existiert der Bereich?
    fn has_area(&self, area: AreaId) -> bool;

    /// Ist die Zelle Mitglied des Bereichs?
    fn area_contains(&self, area: AreaId, cell: Cell) -> bool;

    /// Setzt die Mitgliedschaft. `Ok(true)` wenn sich etwas geändert hat.
    fn set_area_membership(
        &mut self,
        area: AreaId,
        cell: Cell,
        member: bool,
    ) -> Result<bool, GridError>;
}

/// Wand-Prädikat ohne die neu platzierten Begrenzungsobjekte:
/// wandartige Bestandsobjekte oder unpassierbares Terrain.
pub fn is_wall_like<G: GridQuery + ?Sized>(grid: &G, cell: Cell) -> bool {
    grid.terrain_at(cell).is_impassable() || grid.occupants_at(cell).iter().any(|o| o.wall_like)
}
