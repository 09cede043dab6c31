//! Rückgängigmachen von Segmenten gegen den Raster-Speicher.
//!
//! Eine einzige, erschöpfende Fallunterscheidung über die Speichermodelle.
//! Fehler des Speichers brechen das Rückgängigmachen nicht ab, sie werden
//! protokolliert und die übrigen Änderungen trotzdem invertiert.

use super::segment::{AreaEdit, Segment, SegmentEdits, ZoneEdit};
use crate::core::{AreaId, Cell, DesignationRemoval, DesignationTag, GridStore};
use serde::Serialize;

/// Ergebnis eines Undo-Schritts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UndoReport {
    /// Anzahl entfernter Segmente
    pub segments_removed: usize,
    /// Anzahl invertierter Einzeländerungen
    pub removed_count: usize,
    /// Zellen, an denen alle Markierungen statt nur der eigenen entfernt wurden
    pub imprecise_cells: Vec<Cell>,
}

impl UndoReport {
    /// Führt zwei Berichte zusammen.
    pub fn merge(&mut self, other: UndoReport) {
        self.segments_removed += other.segments_removed;
        self.removed_count += other.removed_count;
        self.imprecise_cells.extend(other.imprecise_cells);
    }

    /// `true`, wenn mindestens eine Zelle unpräzise zurückgesetzt wurde.
    pub fn is_imprecise(&self) -> bool {
        !self.imprecise_cells.is_empty()
    }
}

/// Invertiert ein Segment vollständig und verbraucht es.
pub fn revert_segment<G: GridStore + ?Sized>(store: &mut G, segment: Segment) -> UndoReport {
    let id = segment.id;
    let report = revert_edits(store, segment.edits);
    log::debug!(
        "Segment {} rückgängig: {} Änderungen",
        id,
        report.removed_count
    );
    report
}

/// Invertiert lose Änderungen (auch für abgebrochene, nie gestapelte Batches).
pub fn revert_edits<G: GridStore + ?Sized>(store: &mut G, edits: SegmentEdits) -> UndoReport {
    let mut report = UndoReport {
        segments_removed: 1,
        removed_count: edits.len(),
        imprecise_cells: Vec::new(),
    };

    match edits {
        SegmentEdits::Objects(objects) => {
            for object in objects {
                let id = object.id();
                if let Err(e) = store.destroy_object(object) {
                    log::warn!("Objekt {:?} konnte nicht entfernt werden: {}", id, e);
                }
            }
        }
        SegmentEdits::Designations { tag, cells } => {
            report.imprecise_cells = revert_designations(store, &tag, &cells);
        }
        SegmentEdits::ZoneAdd(edit) | SegmentEdits::ZoneShrink(edit) => {
            restore_zone(store, edit);
        }
        SegmentEdits::Area { area, edits } => revert_area(store, area, &edits),
    }

    report
}

/// Entfernt den eigenen Tag. Ist er nicht mehr auffindbar, aber andere
/// Markierungen liegen noch auf der Zelle, werden alle entfernt.
fn revert_designations<G: GridStore + ?Sized>(
    store: &mut G,
    tag: &DesignationTag,
    cells: &[Cell],
) -> Vec<Cell> {
    let mut imprecise = Vec::new();
    for &cell in cells {
        match store.remove_designation(cell, tag) {
            DesignationRemoval::Removed => {}
            DesignationRemoval::NotFound => {
                if store.designations_at(cell).is_empty() {
                    continue;
                }
                let cleared = store.clear_designations(cell);
                log::warn!(
                    "Markierung '{}' an {} nicht auffindbar, {} Markierungen entfernt",
                    tag,
                    cell,
                    cleared
                );
                imprecise.push(cell);
            }
        }
    }
    imprecise
}

/// Setzt die Zone auf den Stand vor dem Segment zurück.
fn restore_zone<G: GridStore + ?Sized>(store: &mut G, edit: ZoneEdit) {
    let ZoneEdit { zone, before, .. } = edit;
    if let Err(e) = store.set_zone_cells(zone, before) {
        log::warn!("Zone {:?} konnte nicht zurückgesetzt werden: {}", zone, e);
    }
}

fn revert_area<G: GridStore + ?Sized>(store: &mut G, area: AreaId, edits: &[AreaEdit]) {
    for edit in edits.iter().rev() {
        if let Err(e) = store.set_area_membership(area, edit.cell, edit.was_member) {
            log::warn!(
                "Bereich {:?} an {} nicht zurückgesetzt: {}",
                area,
                edit.cell,
                e
            );
        }
    }
}
