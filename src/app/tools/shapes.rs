//! Rasterisierung der Zeichenformen auf Zellen.

use super::ShapeKind;
use crate::core::Cell;
use glam::IVec2;

/// Zellen einer Form zwischen `from` und `to` in Zeichenreihenfolge, ohne Duplikate.
pub fn rasterize(shape: ShapeKind, from: Cell, to: Cell) -> Vec<Cell> {
    let a: IVec2 = from.into();
    let b: IVec2 = to.into();
    match shape {
        ShapeKind::Single => vec![from],
        ShapeKind::Line => line(a, b),
        ShapeKind::FilledRect => filled_rect(a.min(b), a.max(b)),
        ShapeKind::EmptyRect => rect_outline(a.min(b), a.max(b)),
    }
}

/// Bresenham-Linie inklusive beider Endpunkte.
fn line(a: IVec2, b: IVec2) -> Vec<Cell> {
    let delta = (b - a).abs();
    let step = (b - a).signum();
    let mut err = delta.x - delta.y;
    let mut current = a;
    let mut cells = Vec::with_capacity(delta.max_element() as usize + 1);

    loop {
        cells.push(Cell::from(current));
        if current == b {
            break;
        }
        let e2 = 2 * err;
        if e2 > -delta.y {
            err -= delta.y;
            current.x += step.x;
        }
        if e2 < delta.x {
            err += delta.x;
            current.y += step.y;
        }
    }
    cells
}

fn filled_rect(min: IVec2, max: IVec2) -> Vec<Cell> {
    let mut cells = Vec::new();
    for z in min.y..=max.y {
        for x in min.x..=max.x {
            cells.push(Cell::new(x, z));
        }
    }
    cells
}

/// Umriss im Uhrzeigersinn ab der linken oberen Ecke.
fn rect_outline(min: IVec2, max: IVec2) -> Vec<Cell> {
    if min.x == max.x || min.y == max.y {
        return filled_rect(min, max);
    }
    let mut cells = Vec::new();
    for x in min.x..=max.x {
        cells.push(Cell::new(x, min.y));
    }
    for z in (min.y + 1)..=max.y {
        cells.push(Cell::new(max.x, z));
    }
    for x in (min.x..max.x).rev() {
        cells.push(Cell::new(x, max.y));
    }
    for z in ((min.y + 1)..max.y).rev() {
        cells.push(Cell::new(min.x, z));
    }
    cells
}
