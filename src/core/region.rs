//! Zählt 4-zusammenhängende Teilregionen einer Zellmenge.
//!
//! Grundlage der Warnung, dass eine Zone nach dem Bestätigen in mehrere
//! Teile zerfällt. Diagonale Nachbarschaft verbindet nicht.

use super::Cell;
use indexmap::IndexSet;
use std::collections::{HashSet, VecDeque};

/// Anzahl der 4-zusammenhängenden Komponenten. Duplikate zählen einfach,
/// die leere Menge ergibt 0.
pub fn count_regions<I>(cells: I) -> usize
where
    I: IntoIterator<Item = Cell>,
{
    connected_regions(cells).len()
}

/// Alle Komponenten in Reihenfolge ihres ersten Auftretens,
/// jede Komponente in BFS-Reihenfolge ab ihrer ersten Zelle.
pub fn connected_regions<I>(cells: I) -> Vec<Vec<Cell>>
where
    I: IntoIterator<Item = Cell>,
{
    let members: IndexSet<Cell> = cells.into_iter().collect();
    let mut visited: HashSet<Cell> = HashSet::with_capacity(members.len());
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for &start in &members {
        if !visited.insert(start) {
            continue;
        }
        let mut region = Vec::new();
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            region.push(cell);
            for neighbor in cell.neighbors4() {
                if members.contains(&neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        regions.push(region);
    }

    regions
}
