//! Hindernisse und Lücken als getrennte Typen.
//!
//! Ein `Obstacle` ist eine Zelle, an der eine Platzierung gescheitert ist.
//! Ein `Gap` ist eine fehlende Wandzelle am Rand eines Einschlusses. Beide
//! werden nie über Text-Präfixe voneinander abgeleitet.

use super::Cell;
use serde::Serialize;

/// Zelle, an der die Platzierung blockiert war.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Obstacle {
    /// Blockierte Zelle
    pub cell: Cell,
    /// Was die Platzierung blockiert hat
    pub label: String,
}

impl Obstacle {
    /// Erstellt ein Hindernis.
    pub fn new(cell: Cell, label: impl Into<String>) -> Self {
        Self {
            cell,
            label: label.into(),
        }
    }
}

/// Fehlende Wandzelle am Rand eines Einschlusses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Gap {
    /// Zelle der Lücke
    pub cell: Cell,
}
