//! Zustandsmaschine einer Platzierungs-Prüfung.
//!
//! `Inactive → Reviewing` beim ersten `enter`, weitere `enter` hängen
//! Segmente an. `AddingMore` ist ein Untermodus, solange das nächste
//! Segment gezeichnet wird; Abbrechen kehrt unverändert zu `Reviewing`
//! zurück. Bestätigen, Abbrechen oder Leer-Rückgängigmachen beenden die
//! Prüfung.
//!
//! Die Sitzung besitzt nur Handles und Buchführung, der Raster-Speicher
//! wird bei jedem Aufruf geliehen.

use super::history::{revert_edits, revert_segment, UndoReport};
use super::segment::{AreaEdit, EditCategory, Segment, SegmentEdits, SegmentStack, ZoneEdit};
use super::summary::{EnclosureSummary, SessionSummary};
use super::tools::{EditPayload, PlacementBatch, ShapeKind};
use crate::core::{
    connected_regions, detect_enclosures, AreaId, Cell, Enclosure, GridError, GridStore, Obstacle,
    ZoneId,
};
use crate::shared::options::FLOOD_FILL_BUDGET_FACTOR;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

// ── Typen ────────────────────────────────────────────────────────

/// Phase der Sitzung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Keine Prüfung aktiv
    #[default]
    Inactive,
    /// Segmente liegen zur Prüfung vor
    Reviewing,
    /// Nächstes Segment wird gezeichnet
    AddingMore,
}

/// Grund für eine abgelehnte Operation (kein Fehler, nur ein No-op).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RefusalReason {
    /// Keine Prüfung aktiv
    #[error("Keine Platzierung in Prüfung")]
    Inactive,
    /// Operation passt nicht zur Kategorie
    #[error("Nicht möglich bei Kategorie {category:?}")]
    WrongCategory {
        /// Kategorie der Sitzung
        category: EditCategory,
    },
    /// Zelle gehörte schon vor der Sitzung zur Zone
    #[error("Zelle {cell} gehörte schon vor der Platzierung zur Zone")]
    PreSessionMember {
        /// Zelle
        cell: Cell,
    },
    /// Zelle außerhalb der Karte
    #[error("Zelle {cell} liegt außerhalb der Karte")]
    OutOfBounds {
        /// Zelle
        cell: Cell,
    },
    /// Zelle gehört zu einer anderen Zone
    #[error("Zelle {cell} gehört zu Zone {zone:?}")]
    ForeignZone {
        /// Zelle
        cell: Cell,
        /// Fremde Zone
        zone: ZoneId,
    },
    /// Zielzone wurde außerhalb der Sitzung gelöscht
    #[error("Zielzone {zone:?} existiert nicht mehr")]
    TargetZoneMissing {
        /// Zielzone
        zone: ZoneId,
    },
    /// Es wird bereits ein weiteres Segment gezeichnet
    #[error("Es wird bereits ein weiteres Segment gezeichnet")]
    AlreadyAddingMore,
    /// Es wird gerade kein weiteres Segment gezeichnet
    #[error("Es wird gerade kein weiteres Segment gezeichnet")]
    NotAddingMore,
}

/// Verletzte Vorbedingung bei `enter`; die Sitzung bleibt unverändert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Batch-Kategorie weicht von der laufenden Prüfung ab
    #[error("Kategorie {batch:?} passt nicht zur laufenden Prüfung ({session:?})")]
    CategoryMismatch {
        /// Kategorie der Sitzung
        session: EditCategory,
        /// Kategorie des Batches
        batch: EditCategory,
    },
    /// Batch zielt auf eine andere Zone als die Sitzung
    #[error("Zone {batch:?} ist nicht die Zielzone {session:?} dieser Prüfung")]
    TargetZoneMismatch {
        /// Zielzone der Sitzung
        session: ZoneId,
        /// Zone des Batches
        batch: ZoneId,
    },
    /// Batch zielt auf einen anderen Bereich als die Sitzung
    #[error("Bereich {batch:?} ist nicht der Zielbereich {session:?} dieser Prüfung")]
    TargetAreaMismatch {
        /// Zielbereich der Sitzung
        session: AreaId,
        /// Bereich des Batches
        batch: AreaId,
    },
    /// Zonen-Segment ohne auflösbare Zielzone
    #[error("Zonen-Segment ohne Zielzone")]
    MissingTargetZone,
    /// Zielzone der laufenden Prüfung existiert nicht mehr
    #[error("Zielzone {0:?} der Prüfung existiert nicht mehr")]
    TargetZoneGone(ZoneId),
    /// Angegebene Zone existiert nicht
    #[error("Zone {0:?} existiert nicht")]
    UnknownZone(ZoneId),
    /// Angegebener Bereich existiert nicht
    #[error("Bereich {0:?} existiert nicht")]
    UnknownArea(AreaId),
    /// Fehler des Raster-Speichers
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Ergebnis von `toggle_cell_at_cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Zelle zur Zielzone hinzugefügt
    Added(Cell),
    /// Sitzungs-Zelle aus der Zielzone entfernt
    Removed(Cell),
    /// Abgelehnt, nichts geändert
    Refused(RefusalReason),
}

/// Bericht beim Bestätigen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmReport {
    /// Kategorie der Sitzung
    pub category: EditCategory,
    /// Anzahl bestätigter Segmente
    pub segments: usize,
    /// An den Speicher übergebene Objekte
    pub committed_objects: usize,
    /// Einzeländerungen über alle Segmente
    pub total_edits: usize,
    /// Hindernisse über alle Segmente
    pub total_obstacles: usize,
    /// Einschlüsse zum Zeitpunkt der Bestätigung
    pub enclosures: Vec<EnclosureSummary>,
    /// Anzahl der Zonenteile (nur Zonen-Kategorien)
    pub region_split_count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    Zone { zone: ZoneId, created: bool },
    Area(AreaId),
}

impl Target {
    fn zone(self) -> Option<ZoneId> {
        match self {
            Target::Zone { zone, .. } => Some(zone),
            _ => None,
        }
    }
}

/// Zustand einer laufenden Prüfung.
#[derive(Debug)]
struct Review {
    phase: SessionPhase,
    category: EditCategory,
    target: Target,
    segments: SegmentStack,
    obstacles: IndexMap<Cell, Obstacle>,
    /// Zonenzellen vor Beginn der Sitzung (nie per Toggle entfernbar)
    pre_session_cells: IndexSet<Cell>,
    enclosures: Vec<Enclosure>,
    regions: Vec<Vec<Cell>>,
}

impl Review {
    fn new(category: EditCategory, target: Target, pre_session_cells: IndexSet<Cell>) -> Self {
        Self {
            phase: SessionPhase::Reviewing,
            category,
            target,
            segments: SegmentStack::new(),
            obstacles: IndexMap::new(),
            pre_session_cells,
            enclosures: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Leitet Einschlüsse bzw. Zonenteile neu ab.
    fn recompute<G: GridStore + ?Sized>(&mut self, store: &G, budget_factor: usize) {
        match self.category {
            EditCategory::ObjectPlacement => {
                let boundary = self.segments.boundary_objects();
                let obstacle_cells: IndexSet<Cell> = self.obstacles.keys().copied().collect();
                self.enclosures =
                    detect_enclosures(store, &boundary, &obstacle_cells, budget_factor);
            }
            EditCategory::ZoneMembership | EditCategory::ZoneShrink => {
                self.regions = self
                    .target
                    .zone()
                    .and_then(|zone| store.zone_cells(zone))
                    .map(|cells| connected_regions(cells.iter().copied()))
                    .unwrap_or_default();
            }
            EditCategory::DesignationToggle | EditCategory::AreaMembership => {}
        }
    }

    fn forget_obstacles(&mut self, cells: &[Cell]) {
        for cell in cells {
            self.obstacles.shift_remove(cell);
        }
    }

    fn region_split_count(&self) -> Option<usize> {
        self.category.is_zone().then_some(self.regions.len())
    }

    fn summary(&self) -> SessionSummary {
        let top = self.segments.top();
        SessionSummary {
            category: self.category,
            shape: top.map(|s| s.shape).unwrap_or_default(),
            segment_count: self.segments.len(),
            placed_count: top.map_or(0, |s| s.edits.len()),
            blocked_count: top.map_or(0, |s| s.blocked_count),
            total_placed: self.segments.placed_count(),
            total_obstacles: self.obstacles.len(),
            enclosures: self.enclosures.iter().map(EnclosureSummary::from).collect(),
            region_split_count: self.region_split_count(),
        }
    }
}

// ── Sitzung ──────────────────────────────────────────────────────

/// Explizites Sitzungsobjekt; ersetzt jeden globalen Reset.
#[derive(Debug)]
pub struct PlacementSession {
    review: Option<Review>,
    budget_factor: usize,
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new(FLOOD_FILL_BUDGET_FACTOR)
    }
}

impl PlacementSession {
    /// Erstellt eine inaktive Sitzung mit Schrittbudget-Faktor für die Flutung.
    pub fn new(budget_factor: usize) -> Self {
        Self {
            review: None,
            budget_factor: budget_factor.max(1),
        }
    }

    /// Setzt den Schrittbudget-Faktor (wirkt ab der nächsten Neuberechnung).
    pub fn set_budget_factor(&mut self, budget_factor: usize) {
        self.budget_factor = budget_factor.max(1);
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> SessionPhase {
        self.review
            .as_ref()
            .map_or(SessionPhase::Inactive, |r| r.phase)
    }

    /// Läuft eine Prüfung?
    pub fn is_active(&self) -> bool {
        self.review.is_some()
    }

    /// Kategorie der laufenden Prüfung.
    pub fn category(&self) -> Option<EditCategory> {
        self.review.as_ref().map(|r| r.category)
    }

    /// Zielzone (nur Zonen-Kategorien).
    pub fn target_zone(&self) -> Option<ZoneId> {
        self.review.as_ref().and_then(|r| r.target.zone())
    }

    /// Zielbereich (nur Bereichs-Kategorie).
    pub fn target_area(&self) -> Option<AreaId> {
        match self.review.as_ref()?.target {
            Target::Area(area) => Some(area),
            _ => None,
        }
    }

    /// Anzahl der Segmente.
    pub fn segment_count(&self) -> usize {
        self.review.as_ref().map_or(0, |r| r.segments.len())
    }

    /// Einzeländerungen über alle Segmente.
    pub fn total_placed(&self) -> usize {
        self.review
            .as_ref()
            .map_or(0, |r| r.segments.placed_count())
    }

    /// Gesammelte Hindernisse in Reihenfolge ihres Auftretens.
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.review.iter().flat_map(|r| r.obstacles.values())
    }

    /// Anzahl der gesammelten Hindernisse.
    pub fn obstacle_count(&self) -> usize {
        self.review.as_ref().map_or(0, |r| r.obstacles.len())
    }

    /// Aktuelle Einschlüsse.
    pub fn enclosures(&self) -> &[Enclosure] {
        self.review
            .as_ref()
            .map(|r| r.enclosures.as_slice())
            .unwrap_or_default()
    }

    /// Aktuelle Zonenteile in Reihenfolge des ersten Auftretens.
    pub fn regions(&self) -> &[Vec<Cell>] {
        self.review
            .as_ref()
            .map(|r| r.regions.as_slice())
            .unwrap_or_default()
    }

    /// Anzahl der Zonenteile (nur Zonen-Kategorien).
    pub fn region_count(&self) -> Option<usize> {
        self.review.as_ref().and_then(Review::region_split_count)
    }

    /// Zusammenfassung des aktuellen Zustands.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.review.as_ref().map(Review::summary)
    }

    /// Nimmt einen Batch auf. Der erste Aufruf startet die Prüfung.
    ///
    /// Bei verletzter Vorbedingung bleibt die Sitzung unverändert und die
    /// vorläufigen Objekte des Batches werden zerstört.
    pub fn enter<G: GridStore + ?Sized>(
        &mut self,
        store: &mut G,
        batch: PlacementBatch,
    ) -> Result<SessionSummary, SessionError> {
        let target = match self.review.as_ref() {
            Some(review) => check_batch(review, store, &batch),
            None => resolve_target(store, &batch.payload),
        };
        let target = match target {
            Ok(target) => target,
            Err(e) => {
                log::warn!("Segment abgelehnt: {}", e);
                discard_batch(store, batch);
                return Err(e);
            }
        };

        let category = batch.category();
        let pre_session_cells = match (&self.review, target) {
            (None, Target::Zone { zone, .. }) => {
                store.zone_cells(zone).cloned().unwrap_or_default()
            }
            _ => IndexSet::new(),
        };

        let PlacementBatch {
            shape,
            payload,
            blocked,
        } = batch;
        let edits = match apply_payload(store, payload, target) {
            Ok(edits) => edits,
            Err(e) => {
                log::warn!("Segment konnte nicht angewendet werden: {}", e);
                if self.review.is_none() {
                    drop_created_zone(store, target);
                }
                return Err(e);
            }
        };

        let budget_factor = self.budget_factor;
        let fresh = self.review.is_none();
        let review = self
            .review
            .get_or_insert_with(|| Review::new(category, target, pre_session_cells));

        let mut new_obstacles = Vec::new();
        if category != EditCategory::ZoneShrink {
            for blocked_cell in &blocked {
                if !review.obstacles.contains_key(&blocked_cell.cell) {
                    review.obstacles.insert(
                        blocked_cell.cell,
                        Obstacle::new(blocked_cell.cell, blocked_cell.reason.clone()),
                    );
                    new_obstacles.push(blocked_cell.cell);
                }
            }
        }

        let id = review.segments.next_id();
        review.segments.push(Segment {
            id,
            shape,
            edits,
            blocked_count: blocked.len(),
            new_obstacles,
        });
        review.phase = SessionPhase::Reviewing;
        review.recompute(store, budget_factor);

        let summary = review.summary();
        if fresh {
            log::info!("Prüfung gestartet ({:?})", category);
        }
        log::info!(
            "Segment {} aufgenommen: {} platziert, {} blockiert",
            id,
            summary.placed_count,
            summary.blocked_count
        );
        Ok(summary)
    }

    /// Schaltet eine Zelle der Zielzone um (nur `ZoneMembership`).
    pub fn toggle_cell_at_cursor<G: GridStore + ?Sized>(
        &mut self,
        store: &mut G,
        cell: Cell,
    ) -> ToggleOutcome {
        let budget_factor = self.budget_factor;
        let Some(review) = self.review.as_mut() else {
            log::debug!("Toggle ohne aktive Prüfung ignoriert");
            return ToggleOutcome::Refused(RefusalReason::Inactive);
        };
        let (EditCategory::ZoneMembership, Some(zone)) = (review.category, review.target.zone())
        else {
            return ToggleOutcome::Refused(RefusalReason::WrongCategory {
                category: review.category,
            });
        };
        if !store.in_bounds(cell) {
            return ToggleOutcome::Refused(RefusalReason::OutOfBounds { cell });
        }

        let outcome = match store.zone_at(cell) {
            Some(owner) if owner == zone => {
                if review.pre_session_cells.contains(&cell) {
                    return ToggleOutcome::Refused(RefusalReason::PreSessionMember { cell });
                }
                let opened = open_toggle_segment(&mut review.segments, store, zone);
                if let Err(e) = store.remove_zone_cell(zone, cell) {
                    log::warn!("Toggle an {} fehlgeschlagen: {}", cell, e);
                    close_toggle_segment(&mut review.segments, opened);
                    return ToggleOutcome::Refused(RefusalReason::TargetZoneMissing { zone });
                }
                if let Some(edit) = top_zone_edit(&mut review.segments) {
                    match edit.cells.iter().position(|&c| c == cell) {
                        Some(index) => {
                            edit.cells.remove(index);
                        }
                        None => edit.withdrawn.push(cell),
                    }
                }
                ToggleOutcome::Removed(cell)
            }
            Some(owner) => {
                return ToggleOutcome::Refused(RefusalReason::ForeignZone { cell, zone: owner });
            }
            None => {
                let opened = open_toggle_segment(&mut review.segments, store, zone);
                if let Err(e) = store.add_zone_cell(zone, cell) {
                    log::warn!("Toggle an {} fehlgeschlagen: {}", cell, e);
                    close_toggle_segment(&mut review.segments, opened);
                    return ToggleOutcome::Refused(RefusalReason::TargetZoneMissing { zone });
                }
                if let Some(edit) = top_zone_edit(&mut review.segments) {
                    match edit.withdrawn.iter().position(|&c| c == cell) {
                        Some(index) => {
                            edit.withdrawn.remove(index);
                        }
                        None => edit.cells.push(cell),
                    }
                }
                ToggleOutcome::Added(cell)
            }
        };

        review.recompute(store, budget_factor);
        log::info!("Toggle an {}: {:?}", cell, outcome);
        outcome
    }

    /// Bestätigt alle Segmente und beendet die Prüfung.
    pub fn confirm<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<ConfirmReport> {
        let Some(mut review) = self.review.take() else {
            log::debug!("Bestätigen: nichts zu tun");
            return None;
        };

        let mut report = ConfirmReport {
            category: review.category,
            segments: review.segments.len(),
            committed_objects: 0,
            total_edits: review.segments.placed_count(),
            total_obstacles: review.obstacles.len(),
            enclosures: review.enclosures.iter().map(EnclosureSummary::from).collect(),
            region_split_count: review.region_split_count(),
        };

        for segment in review.segments.drain().into_iter().rev() {
            if let SegmentEdits::Objects(objects) = segment.edits {
                for object in objects {
                    let id = object.id();
                    match store.commit_object(object) {
                        Ok(_) => report.committed_objects += 1,
                        Err(e) => log::warn!("Objekt {:?} nicht bestätigt: {}", id, e),
                    }
                }
            }
        }
        drop_created_zone_if_empty(store, review.target);

        log::info!(
            "Prüfung bestätigt: {} Segmente, {} Änderungen",
            report.segments,
            report.total_edits
        );
        Some(report)
    }

    /// Nimmt das oberste Segment zurück; die Prüfung bleibt bestehen.
    pub fn pop_segment<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<UndoReport> {
        let budget_factor = self.budget_factor;
        let review = self.review.as_mut()?;
        let segment = review.segments.pop()?;
        review.forget_obstacles(&segment.new_obstacles);
        let report = revert_segment(store, segment);
        review.recompute(store, budget_factor);
        Some(report)
    }

    /// Nimmt alle Segmente zurück; die Prüfung bleibt bestehen.
    pub fn pop_all<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<UndoReport> {
        let budget_factor = self.budget_factor;
        let review = self.review.as_mut()?;
        if review.segments.is_empty() {
            return None;
        }
        let mut report = UndoReport::default();
        for segment in review.segments.drain() {
            review.forget_obstacles(&segment.new_obstacles);
            report.merge(revert_segment(store, segment));
        }
        review.recompute(store, budget_factor);
        Some(report)
    }

    /// Nimmt das oberste Segment zurück. Ist der Stapel danach leer, endet
    /// die Prüfung.
    pub fn undo_last<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<UndoReport> {
        let Some(report) = self.pop_segment(store) else {
            log::debug!("Rückgängig: nichts zu tun");
            return None;
        };
        if let Some(review) = self.review.as_mut() {
            review.phase = SessionPhase::Reviewing;
        }
        if self.segment_count() == 0 {
            self.teardown(store);
        }
        log::info!("Letztes Segment rückgängig ({} Änderungen)", report.removed_count);
        Some(report)
    }

    /// Nimmt alle Segmente zurück und beendet die Prüfung.
    pub fn undo_all<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<UndoReport> {
        let report = self.pop_all(store)?;
        self.teardown(store);
        log::info!(
            "Alle Segmente rückgängig ({} Segmente, {} Änderungen)",
            report.segments_removed,
            report.removed_count
        );
        Some(report)
    }

    /// Bricht die Prüfung ab: alles zurücknehmen, Sitzung beenden.
    pub fn cancel<G: GridStore + ?Sized>(&mut self, store: &mut G) -> Option<UndoReport> {
        if !self.is_active() {
            log::debug!("Abbrechen: nichts zu tun");
            return None;
        }
        let report = self.pop_all(store).unwrap_or_default();
        self.teardown(store);
        log::info!("Prüfung abgebrochen");
        Some(report)
    }

    /// Wechselt in den Untermodus zum Zeichnen eines weiteren Segments.
    pub fn begin_adding_more(&mut self) -> Result<(), RefusalReason> {
        let review = self.review.as_mut().ok_or(RefusalReason::Inactive)?;
        if review.phase == SessionPhase::AddingMore {
            return Err(RefusalReason::AlreadyAddingMore);
        }
        review.phase = SessionPhase::AddingMore;
        log::info!("Weiteres Segment wird gezeichnet");
        Ok(())
    }

    /// Bricht das Zeichnen ab; Segmente und Hindernisse bleiben unverändert.
    pub fn cancel_adding_more(&mut self) -> Result<(), RefusalReason> {
        let review = self.review.as_mut().ok_or(RefusalReason::Inactive)?;
        if review.phase != SessionPhase::AddingMore {
            return Err(RefusalReason::NotAddingMore);
        }
        review.phase = SessionPhase::Reviewing;
        log::info!("Zeichnen abgebrochen, Prüfung fortgesetzt");
        Ok(())
    }

    fn teardown<G: GridStore + ?Sized>(&mut self, store: &mut G) {
        if let Some(review) = self.review.take() {
            drop_created_zone_if_empty(store, review.target);
            log::info!("Prüfung beendet");
        }
    }
}

// ── Hilfsfunktionen ──────────────────────────────────────────────

/// Ziel beim ersten Segment auflösen; legt ggf. die neue Zone an.
fn resolve_target<G: GridStore + ?Sized>(
    store: &mut G,
    payload: &EditPayload,
) -> Result<Target, SessionError> {
    match payload {
        EditPayload::Objects(_) | EditPayload::Designations { .. } => Ok(Target::None),
        EditPayload::ZoneAdd { zone: None, .. } => Ok(Target::Zone {
            zone: store.create_zone(),
            created: true,
        }),
        EditPayload::ZoneAdd {
            zone: Some(zone), ..
        }
        | EditPayload::ZoneShrink { zone, .. } => {
            if store.zone_cells(*zone).is_none() {
                return Err(SessionError::UnknownZone(*zone));
            }
            Ok(Target::Zone {
                zone: *zone,
                created: false,
            })
        }
        EditPayload::Area { area, .. } => {
            if !store.has_area(*area) {
                return Err(SessionError::UnknownArea(*area));
            }
            Ok(Target::Area(*area))
        }
    }
}

/// Weitere Segmente müssen Kategorie und Ziel der Prüfung einhalten.
fn check_batch<G: GridStore + ?Sized>(
    review: &Review,
    store: &G,
    batch: &PlacementBatch,
) -> Result<Target, SessionError> {
    let category = batch.category();
    if category != review.category {
        return Err(SessionError::CategoryMismatch {
            session: review.category,
            batch: category,
        });
    }

    match (&batch.payload, review.target) {
        (EditPayload::ZoneAdd { zone, .. }, Target::Zone { zone: session, .. }) => {
            check_zone(store, session, zone.unwrap_or(session))?;
        }
        (EditPayload::ZoneShrink { zone, .. }, Target::Zone { zone: session, .. }) => {
            check_zone(store, session, *zone)?;
        }
        (EditPayload::Area { area, .. }, Target::Area(session)) => {
            if *area != session {
                return Err(SessionError::TargetAreaMismatch {
                    session,
                    batch: *area,
                });
            }
            if !store.has_area(session) {
                return Err(SessionError::UnknownArea(session));
            }
        }
        _ => {}
    }
    Ok(review.target)
}

fn check_zone<G: GridStore + ?Sized>(
    store: &G,
    session: ZoneId,
    batch: ZoneId,
) -> Result<(), SessionError> {
    if batch != session {
        return Err(SessionError::TargetZoneMismatch { session, batch });
    }
    if store.zone_cells(session).is_none() {
        return Err(SessionError::TargetZoneGone(session));
    }
    Ok(())
}

/// Wendet eine Nutzlast an. Schlägt eine Zelle hart fehl, werden die
/// bisherigen Änderungen zurückgenommen.
fn apply_payload<G: GridStore + ?Sized>(
    store: &mut G,
    payload: EditPayload,
    target: Target,
) -> Result<SegmentEdits, SessionError> {
    match payload {
        EditPayload::Objects(objects) => Ok(SegmentEdits::Objects(objects)),
        EditPayload::Designations { tag, cells } => {
            let mut applied = Vec::with_capacity(cells.len());
            for cell in cells {
                match store.add_designation(cell, &tag) {
                    Ok(true) => applied.push(cell),
                    Ok(false) => {}
                    Err(GridError::OutOfBounds(_)) => {
                        log::debug!("Markierung außerhalb der Karte übersprungen: {}", cell);
                    }
                    Err(e) => {
                        revert_edits(store, SegmentEdits::Designations { tag, cells: applied });
                        return Err(e.into());
                    }
                }
            }
            Ok(SegmentEdits::Designations { tag, cells: applied })
        }
        EditPayload::ZoneAdd { cells, .. } => {
            let zone = target_zone(target)?;
            let before = store
                .zone_cells(zone)
                .cloned()
                .ok_or(SessionError::TargetZoneGone(zone))?;
            let mut applied = Vec::with_capacity(cells.len());
            for cell in cells {
                match store.add_zone_cell(zone, cell) {
                    Ok(true) => applied.push(cell),
                    Ok(false) => {}
                    Err(GridError::OutOfBounds(_)) | Err(GridError::CellInOtherZone { .. }) => {
                        log::debug!("Zonenzelle {} übersprungen", cell);
                    }
                    Err(e) => {
                        restore_after_failure(store, zone, before);
                        return Err(e.into());
                    }
                }
            }
            Ok(SegmentEdits::ZoneAdd(ZoneEdit::new(zone, applied, before)))
        }
        EditPayload::ZoneShrink { cells, .. } => {
            let zone = target_zone(target)?;
            let before = store
                .zone_cells(zone)
                .cloned()
                .ok_or(SessionError::TargetZoneGone(zone))?;
            let mut applied = Vec::with_capacity(cells.len());
            for cell in cells {
                match store.remove_zone_cell(zone, cell) {
                    Ok(true) => applied.push(cell),
                    Ok(false) => {}
                    Err(e) => {
                        restore_after_failure(store, zone, before);
                        return Err(e.into());
                    }
                }
            }
            Ok(SegmentEdits::ZoneShrink(ZoneEdit::new(zone, applied, before)))
        }
        EditPayload::Area {
            area,
            cells,
            member,
        } => {
            let mut edits = Vec::with_capacity(cells.len());
            for cell in cells {
                let was_member = store.area_contains(area, cell);
                match store.set_area_membership(area, cell, member) {
                    Ok(true) => edits.push(AreaEdit { cell, was_member }),
                    Ok(false) => {}
                    Err(GridError::OutOfBounds(_)) => {
                        log::debug!("Bereichszelle außerhalb der Karte übersprungen: {}", cell);
                    }
                    Err(e) => {
                        revert_edits(store, SegmentEdits::Area { area, edits });
                        return Err(e.into());
                    }
                }
            }
            Ok(SegmentEdits::Area { area, edits })
        }
    }
}

fn target_zone(target: Target) -> Result<ZoneId, SessionError> {
    target.zone().ok_or(SessionError::MissingTargetZone)
}

fn restore_after_failure<G: GridStore + ?Sized>(
    store: &mut G,
    zone: ZoneId,
    before: IndexSet<Cell>,
) {
    revert_edits(
        store,
        SegmentEdits::ZoneAdd(ZoneEdit::new(zone, Vec::new(), before)),
    );
}

/// Verwirft einen abgelehnten Batch, damit keine vorläufigen Objekte liegen bleiben.
fn discard_batch<G: GridStore + ?Sized>(store: &mut G, batch: PlacementBatch) {
    if let EditPayload::Objects(objects) = batch.payload {
        let count = objects.len();
        revert_edits(store, SegmentEdits::Objects(objects));
        log::debug!("{} vorläufige Objekte des abgelehnten Segments entfernt", count);
    }
}

fn drop_created_zone<G: GridStore + ?Sized>(store: &mut G, target: Target) {
    if let Target::Zone {
        zone,
        created: true,
    } = target
    {
        if let Err(e) = store.delete_zone(zone) {
            log::warn!("Zone {:?} konnte nicht gelöscht werden: {}", zone, e);
        }
    }
}

fn drop_created_zone_if_empty<G: GridStore + ?Sized>(store: &mut G, target: Target) {
    let Target::Zone {
        zone,
        created: true,
    } = target
    else {
        return;
    };
    if store.zone_cells(zone).is_some_and(|cells| cells.is_empty()) {
        drop_created_zone(store, target);
        log::debug!("Leere Sitzungs-Zone {:?} gelöscht", zone);
    }
}

/// Legt bei leerem Stapel ein Einzelzellen-Segment mit dem aktuellen
/// Zonenstand an, damit auch dieser Toggle rückgängig gemacht werden kann.
fn open_toggle_segment<G: GridStore + ?Sized>(
    segments: &mut SegmentStack,
    store: &G,
    zone: ZoneId,
) -> bool {
    if !segments.is_empty() {
        return false;
    }
    let before = store.zone_cells(zone).cloned().unwrap_or_default();
    let id = segments.next_id();
    segments.push(Segment {
        id,
        shape: ShapeKind::Single,
        edits: SegmentEdits::ZoneAdd(ZoneEdit::new(zone, Vec::new(), before)),
        blocked_count: 0,
        new_obstacles: Vec::new(),
    });
    log::debug!("Toggle bei leerem Stapel: Segment {} angelegt", id);
    true
}

fn close_toggle_segment(segments: &mut SegmentStack, opened: bool) {
    if opened {
        segments.pop();
    }
}

fn top_zone_edit(segments: &mut SegmentStack) -> Option<&mut ZoneEdit> {
    match &mut segments.top_mut()?.edits {
        SegmentEdits::ZoneAdd(edit) => Some(edit),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
