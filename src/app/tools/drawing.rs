use super::{rasterize, BlockedCell, DrawRequest, EditKind, EditPayload, PlacementBatch};
use crate::core::{Cell, GridError, GridStore, OwnedObject, ZoneId};

/// Führt eine Zeichen-Anfrage gegen den Speicher aus.
///
/// Wände werden sofort als vorläufige Objekte gesetzt, alle anderen
/// Bearbeitungsarten liefern nur die Zielzellen. Zellen außerhalb der Karte
/// werden verworfen.
pub fn draw_shape<G: GridStore + ?Sized>(
    store: &mut G,
    request: &DrawRequest,
) -> Result<PlacementBatch, GridError> {
    let cells: Vec<Cell> = rasterize(request.shape, request.from, request.to)
        .into_iter()
        .filter(|&cell| store.in_bounds(cell))
        .collect();

    let batch = match &request.edit {
        EditKind::Wall { label } => {
            let (objects, blocked) = place_walls(store, &cells, label)?;
            PlacementBatch::objects(request.shape, objects, blocked)
        }
        EditKind::Designate { tag } => PlacementBatch::cells(
            request.shape,
            EditPayload::Designations {
                tag: tag.clone(),
                cells,
            },
            Vec::new(),
        ),
        EditKind::ZoneAdd { zone } => {
            let (cells, blocked) = split_zone_cells(store, cells, *zone);
            PlacementBatch::cells(
                request.shape,
                EditPayload::ZoneAdd { zone: *zone, cells },
                blocked,
            )
        }
        EditKind::ZoneShrink { zone } => {
            let members: Vec<Cell> = cells
                .into_iter()
                .filter(|&cell| store.zone_at(cell) == Some(*zone))
                .collect();
            PlacementBatch::cells(
                request.shape,
                EditPayload::ZoneShrink {
                    zone: *zone,
                    cells: members,
                },
                Vec::new(),
            )
        }
        EditKind::Area { area, member } => PlacementBatch::cells(
            request.shape,
            EditPayload::Area {
                area: *area,
                cells,
                member: *member,
            },
            Vec::new(),
        ),
    };

    log::debug!(
        "Zeichnen {:?}: {} Zellen blockiert",
        request.shape,
        batch.blocked.len()
    );
    Ok(batch)
}

/// Setzt Wandobjekte auf alle freien Zellen. Zellen mit bestehender Wand
/// werden übersprungen. Schlägt ein Setzen fehl, werden die bereits gesetzten
/// Objekte wieder entfernt.
fn place_walls<G: GridStore + ?Sized>(
    store: &mut G,
    cells: &[Cell],
    label: &str,
) -> Result<(Vec<OwnedObject>, Vec<BlockedCell>), GridError> {
    let mut objects = Vec::with_capacity(cells.len());
    let mut blocked = Vec::new();
    let mut walled = 0usize;

    for &cell in cells {
        match wall_cell(store, cell) {
            WallCell::Free => {}
            WallCell::Walled => {
                walled += 1;
                continue;
            }
            WallCell::Blocked(reason) => {
                blocked.push(BlockedCell::new(cell, reason));
                continue;
            }
        }
        match store.spawn_object(cell, label, true) {
            Ok(object) => objects.push(object),
            Err(e) => {
                for object in objects {
                    if let Err(undo_err) = store.destroy_object(object) {
                        log::warn!("Aufräumen nach Fehler fehlgeschlagen: {}", undo_err);
                    }
                }
                return Err(e);
            }
        }
    }

    if walled > 0 {
        log::debug!("{} Zellen tragen bereits eine Wand", walled);
    }
    Ok((objects, blocked))
}

/// Zustand einer Zielzelle für eine neue Wand.
enum WallCell {
    Free,
    /// Trägt schon ein wandartiges Objekt; die Linie ist dort geschlossen
    Walled,
    Blocked(String),
}

/// Jedes andere Objekt und unpassierbares Terrain blockiert eine Wand.
fn wall_cell<G: GridStore + ?Sized>(store: &G, cell: Cell) -> WallCell {
    let occupants = store.occupants_at(cell);
    if occupants.iter().any(|o| o.wall_like) {
        return WallCell::Walled;
    }
    if let Some(occupant) = occupants.first() {
        return WallCell::Blocked(occupant.label.clone());
    }
    let terrain = store.terrain_at(cell);
    if terrain.is_impassable() {
        WallCell::Blocked(terrain.label().to_owned())
    } else {
        WallCell::Free
    }
}

fn split_zone_cells<G: GridStore + ?Sized>(
    store: &G,
    cells: Vec<Cell>,
    target: Option<ZoneId>,
) -> (Vec<Cell>, Vec<BlockedCell>) {
    let mut accepted = Vec::with_capacity(cells.len());
    let mut blocked = Vec::new();

    for cell in cells {
        if let Some(occupant) = store.occupants_at(cell).iter().find(|o| o.wall_like) {
            blocked.push(BlockedCell::new(cell, occupant.label.clone()));
            continue;
        }
        let terrain = store.terrain_at(cell);
        if terrain.is_impassable() {
            blocked.push(BlockedCell::new(cell, terrain.label()));
            continue;
        }
        match store.zone_at(cell) {
            Some(zone) if Some(zone) != target => {
                blocked.push(BlockedCell::new(cell, format!("Zone {}", zone.0)));
            }
            _ => accepted.push(cell),
        }
    }

    (accepted, blocked)
}
