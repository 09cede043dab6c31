use super::*;
use crate::app::tools::{draw_shape, BlockedCell, DrawRequest, EditKind, ShapeKind};
use crate::core::grid_map::{ROCK_CHUNK_LABEL, WALL_LABEL};
use crate::core::{DesignationTag, GridMap, GridQuery, ObstacleClass};
use std::collections::HashSet;

/// Vier Wandlinien um den 3×3-Innenraum (3..=5, 3..=5).
const RING: [((i32, i32), (i32, i32)); 4] = [
    ((2, 2), (6, 2)),
    ((6, 3), (6, 6)),
    ((5, 6), (2, 6)),
    ((2, 5), (2, 3)),
];

fn open_field() -> GridMap {
    GridMap::new(9, 9)
}

fn room_with_rocks() -> GridMap {
    GridMap::from_ascii(&[
        ".........",
        ".........",
        ".........",
        "...r.....",
        "....r....",
        ".........",
        ".........",
        ".........",
        ".........",
    ])
    .expect("Karte")
}

fn request(shape: ShapeKind, from: (i32, i32), to: (i32, i32), edit: EditKind) -> DrawRequest {
    DrawRequest {
        shape,
        from: Cell::new(from.0, from.1),
        to: Cell::new(to.0, to.1),
        edit,
    }
}

fn wall(map: &mut GridMap, from: (i32, i32), to: (i32, i32)) -> PlacementBatch {
    let edit = EditKind::Wall {
        label: WALL_LABEL.to_owned(),
    };
    draw_shape(map, &request(ShapeKind::Line, from, to, edit)).expect("Zeichnen")
}

fn zone_rect(
    map: &mut GridMap,
    from: (i32, i32),
    to: (i32, i32),
    zone: Option<ZoneId>,
) -> PlacementBatch {
    let edit = EditKind::ZoneAdd { zone };
    draw_shape(map, &request(ShapeKind::FilledRect, from, to, edit)).expect("Zeichnen")
}

fn enter_ring(session: &mut PlacementSession, map: &mut GridMap) -> SessionSummary {
    let mut last = None;
    for (from, to) in RING {
        let batch = wall(map, from, to);
        last = Some(session.enter(map, batch).expect("enter"));
    }
    last.expect("mindestens ein Segment")
}

// ── Objekt-Platzierung ───────────────────────────────────────────

#[test]
fn first_enter_starts_review() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    assert_eq!(session.phase(), SessionPhase::Inactive);

    let batch = wall(&mut map, (0, 0), (3, 0));
    let summary = session.enter(&mut map, batch).expect("enter");

    assert_eq!(session.phase(), SessionPhase::Reviewing);
    assert_eq!(summary.category, EditCategory::ObjectPlacement);
    assert_eq!(summary.shape, ShapeKind::Line);
    assert_eq!(summary.placed_count, 4);
    assert_eq!(summary.blocked_count, 0);
    assert_eq!(summary.segment_count, 1);
    assert_eq!(summary.region_split_count, None);
}

#[test]
fn walled_room_reports_enclosure_with_rock_chunks() {
    let mut map = room_with_rocks();
    let mut session = PlacementSession::default();

    let summary = enter_ring(&mut session, &mut map);

    assert_eq!(summary.total_placed, 16);
    assert_eq!(summary.segment_count, 4);
    assert_eq!(summary.enclosures.len(), 1);
    let enclosure = &summary.enclosures[0];
    assert_eq!(enclosure.interior, 9);
    assert_eq!(enclosure.gaps, 0);
    assert_eq!(
        enclosure.obstacles,
        vec![ObstacleClass {
            label: ROCK_CHUNK_LABEL.to_owned(),
            count: 2,
        }]
    );
}

#[test]
fn undoing_last_wall_opens_the_room() {
    let mut map = room_with_rocks();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);

    let report = session.undo_last(&mut map).expect("undo");

    assert_eq!(report.segments_removed, 1);
    assert_eq!(report.removed_count, 3);
    assert!(session.enclosures().is_empty());
    assert_eq!(session.total_placed(), 13);
    assert_eq!(session.phase(), SessionPhase::Reviewing);
    assert_eq!(map.provisional_count(), 13);
}

#[test]
fn blocked_wall_cell_becomes_gap_of_the_same_room() {
    let mut map = GridMap::from_ascii(&[
        ".........",
        ".........",
        "....r....",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
    ])
    .expect("Karte");
    let mut session = PlacementSession::default();

    let summary = enter_ring(&mut session, &mut map);

    assert_eq!(summary.total_placed, 15);
    assert_eq!(summary.total_obstacles, 1);
    assert_eq!(summary.enclosures.len(), 1);
    assert_eq!(summary.enclosures[0].interior, 9);
    assert_eq!(summary.enclosures[0].gaps, 1);

    let obstacle = session.obstacles().next().expect("Hindernis");
    assert_eq!(obstacle.cell, Cell::new(4, 2));
    assert_eq!(obstacle.label, ROCK_CHUNK_LABEL);
}

#[test]
fn ring_through_existing_wall_stays_closed() {
    let mut map = GridMap::from_ascii(&[
        ".........",
        ".........",
        "....#....",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
    ])
    .expect("Karte");
    let mut session = PlacementSession::default();

    let summary = enter_ring(&mut session, &mut map);

    assert_eq!(summary.total_placed, 15);
    assert_eq!(summary.total_obstacles, 0);
    assert_eq!(summary.enclosures.len(), 1);
    assert_eq!(summary.enclosures[0].interior, 9);
    assert_eq!(summary.enclosures[0].gaps, 0);
    assert!(session.obstacles().next().is_none());
}

#[test]
fn retracing_own_wall_adds_neither_walls_nor_gaps() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);

    let batch = wall(&mut map, (2, 2), (6, 2));
    let summary = session.enter(&mut map, batch).expect("enter");

    assert_eq!(summary.placed_count, 0);
    assert_eq!(summary.blocked_count, 0);
    assert_eq!(summary.total_placed, 16);
    assert_eq!(summary.total_obstacles, 0);
    assert_eq!(summary.enclosures[0].gaps, 0);
}

#[test]
fn pop_restores_obstacles_introduced_by_the_segment() {
    let mut map = GridMap::from_ascii(&["..r..", ".....", "..r.."]).expect("Karte");
    let mut session = PlacementSession::default();

    let first = wall(&mut map, (0, 0), (4, 0));
    session.enter(&mut map, first).expect("enter");
    let second = wall(&mut map, (0, 2), (4, 2));
    session.enter(&mut map, second).expect("enter");
    assert_eq!(session.obstacle_count(), 2);

    session.pop_segment(&mut map).expect("pop");
    assert_eq!(session.obstacle_count(), 1);
    assert_eq!(session.total_placed(), 4);

    session.pop_segment(&mut map).expect("pop");
    assert_eq!(session.obstacle_count(), 0);
    assert!(session.is_active());
    assert!(session.pop_segment(&mut map).is_none());
}

#[test]
fn duplicate_obstacles_belong_to_the_first_segment() {
    let mut map = GridMap::from_ascii(&["..r..", "....."]).expect("Karte");
    let mut session = PlacementSession::default();

    let first = wall(&mut map, (0, 0), (4, 0));
    session.enter(&mut map, first).expect("enter");
    let again = PlacementBatch::objects(
        ShapeKind::Single,
        Vec::new(),
        vec![BlockedCell::new(Cell::new(2, 0), ROCK_CHUNK_LABEL)],
    );
    session.enter(&mut map, again).expect("enter");
    assert_eq!(session.obstacle_count(), 1);

    session.pop_segment(&mut map).expect("pop");
    assert_eq!(session.obstacle_count(), 1);
}

#[test]
fn cancel_destroys_every_object_exactly_once() {
    let mut map = room_with_rocks();
    let before = map.object_count();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);

    let report = session.cancel(&mut map).expect("cancel");

    assert_eq!(report.segments_removed, 4);
    assert_eq!(report.removed_count, 16);
    assert_eq!(session.phase(), SessionPhase::Inactive);
    assert_eq!(map.object_count(), before);
    let destroyed = map.destroyed_objects();
    let unique: HashSet<_> = destroyed.iter().collect();
    assert_eq!(destroyed.len(), 16);
    assert_eq!(unique.len(), destroyed.len());
}

#[test]
fn undo_all_ends_the_session() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);

    let report = session.undo_all(&mut map).expect("undo all");
    assert_eq!(report.segments_removed, 4);
    assert!(!session.is_active());
    assert_eq!(map.object_count(), 0);
}

#[test]
fn undo_last_of_single_segment_ends_the_session() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let batch = wall(&mut map, (1, 1), (1, 4));
    session.enter(&mut map, batch).expect("enter");

    session.undo_last(&mut map).expect("undo");
    assert_eq!(session.phase(), SessionPhase::Inactive);
    assert!(session.undo_last(&mut map).is_none());
}

#[test]
fn confirm_commits_objects_and_ends_the_session() {
    let mut map = room_with_rocks();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);

    let report = session.confirm(&mut map).expect("confirm");

    assert_eq!(report.committed_objects, 16);
    assert_eq!(report.segments, 4);
    assert_eq!(report.enclosures.len(), 1);
    assert_eq!(map.provisional_count(), 0);
    assert!(map.destroyed_objects().is_empty());
    assert!(!session.is_active());
    assert!(session.undo_all(&mut map).is_none());
}

#[test]
fn refused_batch_leaves_session_untouched_and_destroys_its_objects() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let zone_batch = zone_rect(&mut map, (0, 0), (1, 1), None);
    session.enter(&mut map, zone_batch).expect("enter");

    let walls = wall(&mut map, (4, 4), (6, 4));
    let error = session.enter(&mut map, walls).expect_err("falsche Kategorie");

    assert_eq!(
        error,
        SessionError::CategoryMismatch {
            session: EditCategory::ZoneMembership,
            batch: EditCategory::ObjectPlacement,
        }
    );
    assert_eq!(session.segment_count(), 1);
    assert_eq!(map.provisional_count(), 0);
    assert_eq!(map.destroyed_objects().len(), 3);
}

#[test]
fn unknown_area_is_a_precondition_failure() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let batch = PlacementBatch::cells(
        ShapeKind::Single,
        EditPayload::Area {
            area: AreaId(42),
            cells: vec![Cell::new(0, 0)],
            member: true,
        },
        Vec::new(),
    );

    let error = session.enter(&mut map, batch).expect_err("unbekannter Bereich");
    assert_eq!(error, SessionError::UnknownArea(AreaId(42)));
    assert!(!session.is_active());
}

#[test]
fn inactive_session_ignores_everything_but_enter() {
    let mut map = open_field();
    let mut session = PlacementSession::default();

    assert!(session.confirm(&mut map).is_none());
    assert!(session.undo_last(&mut map).is_none());
    assert!(session.undo_all(&mut map).is_none());
    assert!(session.cancel(&mut map).is_none());
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, Cell::new(1, 1)),
        ToggleOutcome::Refused(RefusalReason::Inactive)
    );
    assert_eq!(session.begin_adding_more(), Err(RefusalReason::Inactive));
    assert!(session.summary().is_none());
    assert!(session.enclosures().is_empty());
}

// ── Weitere Segmente ─────────────────────────────────────────────

#[test]
fn cancel_adding_more_resumes_unchanged() {
    let mut map = room_with_rocks();
    let mut session = PlacementSession::default();
    enter_ring(&mut session, &mut map);
    let before = session.summary();

    session.begin_adding_more().expect("weiteres Segment");
    assert_eq!(session.phase(), SessionPhase::AddingMore);
    assert_eq!(
        session.begin_adding_more(),
        Err(RefusalReason::AlreadyAddingMore)
    );

    session.cancel_adding_more().expect("abbrechen");
    assert_eq!(session.phase(), SessionPhase::Reviewing);
    assert_eq!(session.summary(), before);
    assert_eq!(
        session.cancel_adding_more(),
        Err(RefusalReason::NotAddingMore)
    );
}

#[test]
fn enter_while_adding_more_appends_and_resumes_review() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let first = wall(&mut map, (0, 0), (2, 0));
    session.enter(&mut map, first).expect("enter");

    session.begin_adding_more().expect("weiteres Segment");
    let second = wall(&mut map, (0, 2), (2, 2));
    let summary = session.enter(&mut map, second).expect("enter");

    assert_eq!(session.phase(), SessionPhase::Reviewing);
    assert_eq!(summary.segment_count, 2);
    assert_eq!(summary.total_placed, 6);
}

// ── Zonen ────────────────────────────────────────────────────────

#[test]
fn new_zone_is_created_once_per_session() {
    let mut map = open_field();
    let mut session = PlacementSession::default();

    let first = zone_rect(&mut map, (0, 0), (1, 1), None);
    session.enter(&mut map, first).expect("enter");
    let zone = session.target_zone().expect("Zielzone");
    let second = zone_rect(&mut map, (2, 0), (3, 1), None);
    let summary = session.enter(&mut map, second).expect("enter");

    assert_eq!(map.zone_count(), 1);
    assert_eq!(map.zone_cells(zone).map(|c| c.len()), Some(8));
    assert_eq!(summary.region_split_count, Some(1));
}

#[test]
fn disjoint_zone_segments_report_split() {
    let mut map = open_field();
    let mut session = PlacementSession::default();

    let first = zone_rect(&mut map, (0, 0), (1, 1), None);
    session.enter(&mut map, first).expect("enter");
    let second = zone_rect(&mut map, (5, 5), (6, 6), None);
    let summary = session.enter(&mut map, second).expect("enter");

    assert!(summary.is_split());
    assert_eq!(summary.region_split_count, Some(2));
    assert_eq!(session.regions().len(), 2);
}

#[test]
fn toggle_twice_restores_membership() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let batch = zone_rect(&mut map, (0, 0), (2, 2), None);
    session.enter(&mut map, batch).expect("enter");
    let zone = session.target_zone().expect("Zielzone");
    let before = map.zone_cells(zone).cloned();
    let placed = session.total_placed();

    let outside = Cell::new(3, 1);
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, outside),
        ToggleOutcome::Added(outside)
    );
    assert_eq!(session.total_placed(), placed + 1);
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, outside),
        ToggleOutcome::Removed(outside)
    );
    assert_eq!(map.zone_cells(zone).cloned(), before);
    assert_eq!(session.total_placed(), placed);

    let inside = Cell::new(1, 1);
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, inside),
        ToggleOutcome::Removed(inside)
    );
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, inside),
        ToggleOutcome::Added(inside)
    );
    assert_eq!(map.zone_cells(zone).cloned(), before);
}

#[test]
fn toggle_after_popping_every_segment_is_undone_by_cancel() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let line = request(
        ShapeKind::Line,
        (0, 0),
        (2, 0),
        EditKind::ZoneAdd { zone: None },
    );
    let batch = draw_shape(&mut map, &line).expect("Zeichnen");
    session.enter(&mut map, batch).expect("enter");
    session.pop_segment(&mut map).expect("pop");
    assert!(session.is_active());

    let cell = Cell::new(4, 4);
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, cell),
        ToggleOutcome::Added(cell)
    );
    assert_eq!(session.total_placed(), 1);

    session.cancel(&mut map);

    assert!(!session.is_active());
    assert_eq!(map.zone_at(cell), None);
    assert_eq!(map.zone_count(), 0);
}

#[test]
fn toggling_off_a_lower_segment_cell_lowers_the_total() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let first = zone_rect(&mut map, (0, 0), (1, 1), None);
    session.enter(&mut map, first).expect("enter");
    let zone = session.target_zone().expect("Zielzone");
    let second = zone_rect(&mut map, (2, 0), (3, 1), Some(zone));
    session.enter(&mut map, second).expect("enter");
    assert_eq!(session.total_placed(), 8);

    let lower = Cell::new(0, 0);
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, lower),
        ToggleOutcome::Removed(lower)
    );
    assert_eq!(session.total_placed(), 7);
    assert_eq!(map.zone_cells(zone).map(|c| c.len()), Some(7));

    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, lower),
        ToggleOutcome::Added(lower)
    );
    assert_eq!(session.total_placed(), 8);

    session.toggle_cell_at_cursor(&mut map, lower);
    session.undo_last(&mut map).expect("undo");
    assert_eq!(session.total_placed(), 4);
    assert_eq!(map.zone_cells(zone).map(|c| c.len()), Some(4));
}

#[test]
fn toggle_never_removes_pre_session_members() {
    let mut map = GridMap::from_ascii(&["zz.....", "zz.....", "......."]).expect("Karte");
    let zone = map.zone_at(Cell::new(0, 0)).expect("Zone");
    let mut session = PlacementSession::default();
    let batch = zone_rect(&mut map, (2, 0), (3, 1), Some(zone));
    session.enter(&mut map, batch).expect("enter");

    let outcome = session.toggle_cell_at_cursor(&mut map, Cell::new(1, 1));

    assert_eq!(
        outcome,
        ToggleOutcome::Refused(RefusalReason::PreSessionMember {
            cell: Cell::new(1, 1)
        })
    );
    assert_eq!(map.zone_at(Cell::new(1, 1)), Some(zone));
}

#[test]
fn toggle_refuses_foreign_zone_and_outside_cells() {
    let mut map = GridMap::from_ascii(&["zz.....", "......."]).expect("Karte");
    let foreign = map.zone_at(Cell::new(0, 0)).expect("Zone");
    let mut session = PlacementSession::default();
    let batch = zone_rect(&mut map, (3, 0), (4, 1), None);
    session.enter(&mut map, batch).expect("enter");

    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, Cell::new(0, 0)),
        ToggleOutcome::Refused(RefusalReason::ForeignZone {
            cell: Cell::new(0, 0),
            zone: foreign,
        })
    );
    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, Cell::new(-1, 0)),
        ToggleOutcome::Refused(RefusalReason::OutOfBounds {
            cell: Cell::new(-1, 0)
        })
    );
}

#[test]
fn toggle_outside_zone_membership_is_refused() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let batch = wall(&mut map, (0, 0), (2, 0));
    session.enter(&mut map, batch).expect("enter");

    assert_eq!(
        session.toggle_cell_at_cursor(&mut map, Cell::new(4, 4)),
        ToggleOutcome::Refused(RefusalReason::WrongCategory {
            category: EditCategory::ObjectPlacement
        })
    );
}

#[test]
fn undo_restores_zone_snapshot_after_toggles() {
    let mut map = GridMap::from_ascii(&["zz.....", "......."]).expect("Karte");
    let zone = map.zone_at(Cell::new(0, 0)).expect("Zone");
    let original = map.zone_cells(zone).cloned();
    let mut session = PlacementSession::default();

    let batch = zone_rect(&mut map, (2, 0), (3, 0), Some(zone));
    session.enter(&mut map, batch).expect("enter");
    session.toggle_cell_at_cursor(&mut map, Cell::new(2, 1));
    session.toggle_cell_at_cursor(&mut map, Cell::new(3, 0));

    session.undo_last(&mut map).expect("undo");

    assert_eq!(map.zone_cells(zone).cloned(), original);
    assert!(!session.is_active());
    assert_eq!(map.zone_count(), 1);
}

#[test]
fn zone_created_by_session_is_deleted_when_undone() {
    let mut map = open_field();
    let mut session = PlacementSession::default();
    let batch = zone_rect(&mut map, (0, 0), (2, 2), None);
    session.enter(&mut map, batch).expect("enter");
    assert_eq!(map.zone_count(), 1);

    session.undo_last(&mut map).expect("undo");

    assert_eq!(map.zone_count(), 0);
    assert_eq!(map.zone_at(Cell::new(1, 1)), None);
}

#[test]
fn batch_for_another_zone_is_refused() {
    let mut map = GridMap::from_ascii(&["z......", "......."]).expect("Karte");
    let existing = map.zone_at(Cell::new(0, 0)).expect("Zone");
    let mut session = PlacementSession::default();
    let batch = zone_rect(&mut map, (3, 0), (4, 1), None);
    session.enter(&mut map, batch).expect("enter");
    let own = session.target_zone().expect("Zielzone");

    let other = zone_rect(&mut map, (1, 1), (1, 1), Some(existing));
    let error = session.enter(&mut map, other).expect_err("fremde Zone");

    assert_eq!(
        error,
        SessionError::TargetZoneMismatch {
            session: own,
            batch: existing,
        }
    );
    assert_eq!(session.segment_count(), 1);
}

#[test]
fn shrinking_through_the_middle_splits_the_zone() {
    let mut map = GridMap::from_ascii(&["zzzzz", "zzzzz", "zzzzz", "....."]).expect("Karte");
    let zone = map.zone_at(Cell::new(0, 0)).expect("Zone");
    let mut session = PlacementSession::default();
    let edit = EditKind::ZoneShrink { zone };
    let batch = draw_shape(&mut map, &request(ShapeKind::Line, (2, 0), (2, 2), edit))
        .expect("Zeichnen");

    let summary = session.enter(&mut map, batch).expect("enter");

    assert_eq!(summary.category, EditCategory::ZoneShrink);
    assert_eq!(summary.placed_count, 3);
    assert_eq!(summary.total_obstacles, 0);
    assert_eq!(summary.region_split_count, Some(2));

    session.undo_last(&mut map).expect("undo");
    assert_eq!(map.zone_cells(zone).map(|c| c.len()), Some(15));
    assert_eq!(map.zone_count(), 1);
}

// ── Markierungen und Bereiche ────────────────────────────────────

#[test]
fn designation_undo_only_removes_own_tag() {
    let mut map = open_field();
    let tag = DesignationTag::new("abbauen");
    let foreign = DesignationTag::new("ernten");
    let mut session = PlacementSession::default();
    let edit = EditKind::Designate { tag: tag.clone() };
    let batch = draw_shape(&mut map, &request(ShapeKind::Line, (0, 0), (2, 0), edit))
        .expect("Zeichnen");
    session.enter(&mut map, batch).expect("enter");
    map.add_designation(Cell::new(1, 0), &foreign)
        .expect("markieren");

    let report = session.undo_last(&mut map).expect("undo");

    assert_eq!(report.removed_count, 3);
    assert!(report.imprecise_cells.is_empty());
    assert_eq!(map.designations_at(Cell::new(1, 0)), &[foreign]);
    assert!(map.designations_at(Cell::new(0, 0)).is_empty());
}

#[test]
fn already_designated_cells_are_not_claimed_by_the_session() {
    let mut map = open_field();
    let tag = DesignationTag::new("abbauen");
    map.add_designation(Cell::new(0, 0), &tag).expect("markieren");
    let mut session = PlacementSession::default();
    let edit = EditKind::Designate { tag: tag.clone() };
    let batch = draw_shape(&mut map, &request(ShapeKind::Line, (0, 0), (1, 0), edit))
        .expect("Zeichnen");

    let summary = session.enter(&mut map, batch).expect("enter");
    assert_eq!(summary.placed_count, 1);

    session.undo_all(&mut map).expect("undo");
    assert_eq!(map.designations_at(Cell::new(0, 0)), &[tag]);
}

#[test]
fn area_membership_undo_restores_previous_state() {
    let mut map = open_field();
    let area = map.define_area();
    map.set_area_membership(area, Cell::new(1, 0), true)
        .expect("setzen");
    let mut session = PlacementSession::default();
    let edit = EditKind::Area {
        area,
        member: true,
    };
    let batch = draw_shape(&mut map, &request(ShapeKind::Line, (0, 0), (2, 0), edit))
        .expect("Zeichnen");

    let summary = session.enter(&mut map, batch).expect("enter");
    assert_eq!(summary.placed_count, 2);
    assert_eq!(session.target_area(), Some(area));

    session.undo_last(&mut map).expect("undo");
    assert!(!map.area_contains(area, Cell::new(0, 0)));
    assert!(map.area_contains(area, Cell::new(1, 0)));
    assert!(!map.area_contains(area, Cell::new(2, 0)));
}
