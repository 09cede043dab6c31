//! Raster-Zelle `(x, z)` als reiner Werttyp.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ganzzahlige Raster-Koordinate.
///
/// Gleichheit und Hashing über den Wert; Zellen werden frei kopiert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    /// Spalte
    pub x: i32,
    /// Zeile (Tiefe)
    pub z: i32,
}

impl Cell {
    /// Erstellt eine Zelle aus Spalte und Zeile.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Die vier orthogonalen Nachbarn (Nord, Ost, Süd, West).
    ///
    /// Diagonale Nachbarn gehören ausdrücklich nicht dazu.
    pub fn neighbors4(self) -> [Cell; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    /// Verschiebt die Zelle um `(dx, dz)`.
    pub fn offset(self, dx: i32, dz: i32) -> Cell {
        Cell::new(self.x + dx, self.z + dz)
    }

    /// Manhattan-Distanz zu einer anderen Zelle.
    pub fn manhattan_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.z - other.z).abs()
    }
}

impl From<IVec2> for Cell {
    fn from(v: IVec2) -> Self {
        Cell::new(v.x, v.y)
    }
}

impl From<Cell> for IVec2 {
    fn from(cell: Cell) -> Self {
        IVec2::new(cell.x, cell.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
