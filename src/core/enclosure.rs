//! Erkennung eingeschlossener Innenräume per Flood-Fill.
//!
//! Ausgehend von den orthogonalen Nachbarn neu platzierter Begrenzungsobjekte
//! wird iterativ (explizite Queue) geflutet. Wandartige Zellen begrenzen die
//! Flut. Hindernis-Zellen auf der geplanten Wandlinie begrenzen sie ebenfalls,
//! werden aber als Lücke gemeldet statt stillschweigend als Wand zu gelten.
//! Eine Flut, die den Kartenrand erreicht oder das Schrittbudget
//! überschreitet, ist nicht eingeschlossen.

use super::grid::{is_wall_like, BoundaryObject, GridQuery};
use super::marker::Gap;
use super::region::count_regions;
use super::Cell;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// Klassifikation für Zellen im Nebel.
pub const FOGGED_LABEL: &str = "unerkundet";

/// Gruppierte Innenraum-Belegung: Anzeigename und Anzahl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObstacleClass {
    /// Anzeigename
    pub label: String,
    /// Anzahl der Vorkommen im Innenraum
    pub count: usize,
}

/// Ein eingeschlossener Innenraum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    /// Innenzellen in Flut-Reihenfolge
    pub interior: IndexSet<Cell>,
    /// Lückenzellen am Rand (Hindernisse auf der Wandlinie)
    pub gaps: Vec<Gap>,
    /// Anzahl zusammenhängender Lückenabschnitte
    pub gap_count: usize,
    /// Belegung des Innenraums, absteigend nach Anzahl
    pub obstacle_classes: Vec<ObstacleClass>,
}

impl Enclosure {
    /// Anzahl der Innenzellen.
    pub fn interior_count(&self) -> usize {
        self.interior.len()
    }
}

enum Flood {
    Enclosed(IndexSet<Cell>),
    Leaked(IndexSet<Cell>),
}

/// Findet alle Innenräume, die die Begrenzungsobjekte zusammen mit
/// bestehenden Wänden umschließen.
///
/// `budget_factor` skaliert das Schrittbudget (`Breite × Höhe × Faktor`).
/// Ohne Begrenzungsobjekte gibt es keine Einschlüsse, auch wenn die
/// Hindernisse allein eine Fläche umranden würden.
pub fn detect_enclosures<G: GridQuery + ?Sized>(
    grid: &G,
    boundary: &[BoundaryObject],
    obstacle_cells: &IndexSet<Cell>,
    budget_factor: usize,
) -> Vec<Enclosure> {
    // Nur Objekte, die tatsächlich noch auf ihrer Zelle stehen
    let placed: Vec<Cell> = boundary
        .iter()
        .filter(|b| grid.occupants_at(b.cell).iter().any(|o| o.id == b.id))
        .map(|b| b.cell)
        .collect();
    if placed.is_empty() {
        return Vec::new();
    }

    let placed_set: HashSet<Cell> = placed.iter().copied().collect();
    let blocks = |cell: Cell| {
        placed_set.contains(&cell) || obstacle_cells.contains(&cell) || is_wall_like(grid, cell)
    };
    let max_steps = grid.cell_count().saturating_mul(budget_factor.max(1));

    let mut claimed: HashSet<Cell> = HashSet::new();
    let mut enclosures: Vec<Enclosure> = Vec::new();

    for &wall in &placed {
        for seed in wall.neighbors4() {
            if !grid.in_bounds(seed) || claimed.contains(&seed) || blocks(seed) {
                continue;
            }
            match flood_from(grid, seed, &blocks, max_steps) {
                Flood::Enclosed(interior) => {
                    claimed.extend(interior.iter().copied());
                    if enclosures.iter().any(|e| e.interior == interior) {
                        continue;
                    }
                    enclosures.push(build_enclosure(grid, interior, obstacle_cells));
                }
                Flood::Leaked(visited) => {
                    claimed.extend(visited);
                }
            }
        }
    }

    log::debug!(
        "Einschluss-Erkennung: {} Begrenzungsobjekte, {} Einschlüsse",
        placed.len(),
        enclosures.len()
    );
    enclosures
}

fn flood_from<G, F>(grid: &G, seed: Cell, blocks: &F, max_steps: usize) -> Flood
where
    G: GridQuery + ?Sized,
    F: Fn(Cell) -> bool,
{
    let mut visited: IndexSet<Cell> = IndexSet::new();
    let mut queue = VecDeque::new();
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(cell) = queue.pop_front() {
        if grid.is_edge(cell) || visited.len() > max_steps {
            return Flood::Leaked(visited);
        }
        for neighbor in cell.neighbors4() {
            if !grid.in_bounds(neighbor) {
                return Flood::Leaked(visited);
            }
            if blocks(neighbor) || visited.contains(&neighbor) {
                continue;
            }
            visited.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    Flood::Enclosed(visited)
}

fn build_enclosure<G: GridQuery + ?Sized>(
    grid: &G,
    interior: IndexSet<Cell>,
    obstacle_cells: &IndexSet<Cell>,
) -> Enclosure {
    let mut gap_cells: IndexSet<Cell> = IndexSet::new();
    for cell in &interior {
        for neighbor in cell.neighbors4() {
            // Inzwischen wandartige Zellen schließen die Linie
            if obstacle_cells.contains(&neighbor) && !is_wall_like(grid, neighbor) {
                gap_cells.insert(neighbor);
            }
        }
    }
    let gap_count = count_regions(gap_cells.iter().copied());

    Enclosure {
        obstacle_classes: classify_interior(grid, &interior),
        gaps: gap_cells.into_iter().map(|cell| Gap { cell }).collect(),
        gap_count,
        interior,
    }
}

/// Reduziert jede Innenzelle auf Anzeigenamen und zählt gruppiert.
///
/// Objekte vor Terrain; Nebelzellen werden nicht näher beschrieben.
pub fn classify_interior<G: GridQuery + ?Sized>(
    grid: &G,
    interior: &IndexSet<Cell>,
) -> Vec<ObstacleClass> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for &cell in interior {
        if grid.is_fogged(cell) {
            *counts.entry(FOGGED_LABEL.to_owned()).or_default() += 1;
            continue;
        }
        let occupants = grid.occupants_at(cell);
        if !occupants.is_empty() {
            for occupant in occupants {
                *counts.entry(occupant.label.clone()).or_default() += 1;
            }
            continue;
        }
        let terrain = grid.terrain_at(cell);
        if terrain.is_notable() {
            *counts.entry(terrain.label().to_owned()).or_default() += 1;
        }
    }

    let mut classes: Vec<ObstacleClass> = counts
        .into_iter()
        .map(|(label, count)| ObstacleClass { label, count })
        .collect();
    // stabil: gleiche Anzahl behält die Reihenfolge des ersten Auftretens
    classes.sort_by(|a, b| b.count.cmp(&a.count));
    classes
}
