use indexmap::IndexSet;
use placement_review::core::grid_map::WALL_LABEL;
use placement_review::core::{BoundaryObject, OwnedObject};
use placement_review::{
    connected_regions, count_regions, detect_enclosures, Cell, GridMap, GridStore,
};

const BUDGET: usize = 4;

fn rect(x0: i32, z0: i32, x1: i32, z1: i32) -> Vec<Cell> {
    (z0..=z1)
        .flat_map(|z| (x0..=x1).map(move |x| Cell::new(x, z)))
        .collect()
}

/// 5×5-Ring um den Innenraum (3..=5, 3..=5); `skip` bleibt frei.
fn ring(map: &mut GridMap, skip: &[Cell]) -> Vec<OwnedObject> {
    rect(2, 2, 6, 6)
        .into_iter()
        .filter(|c| c.x == 2 || c.x == 6 || c.z == 2 || c.z == 6)
        .filter(|c| !skip.contains(c))
        .map(|c| map.spawn_object(c, WALL_LABEL, true).expect("Wand"))
        .collect()
}

fn boundary(objects: &[OwnedObject]) -> Vec<BoundaryObject> {
    objects.iter().map(OwnedObject::as_boundary).collect()
}

fn release(map: &mut GridMap, objects: Vec<OwnedObject>) {
    for object in objects {
        map.destroy_object(object).expect("zerstören");
    }
}

#[test]
fn region_count_ignores_duplicates_and_empty_input() {
    let cells = rect(0, 0, 3, 2);
    let doubled: Vec<Cell> = cells.iter().chain(cells.iter()).copied().collect();

    assert_eq!(count_regions(Vec::<Cell>::new()), 0);
    assert_eq!(count_regions(doubled), count_regions(cells));
}

#[test]
fn rectangle_stays_whole_until_bisected() {
    let mut cells = rect(0, 0, 4, 4);
    assert_eq!(count_regions(cells.iter().copied()), 1);

    cells.retain(|&c| c != Cell::new(2, 2));
    assert_eq!(count_regions(cells.iter().copied()), 1);

    cells.retain(|c| c.x != 2);
    assert_eq!(count_regions(cells.iter().copied()), 2);
    let parts = connected_regions(cells.iter().copied());
    assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), 20);
}

#[test]
fn closed_ring_encloses_nine_cells() {
    let mut map = GridMap::new(9, 9);
    let walls = ring(&mut map, &[]);

    let found = detect_enclosures(&map, &boundary(&walls), &IndexSet::new(), BUDGET);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].interior_count(), 9);
    assert_eq!(found[0].gap_count, 0);
    release(&mut map, walls);
}

#[test]
fn obstacle_in_ring_is_one_gap() {
    let mut map = GridMap::new(9, 9);
    let hole = Cell::new(4, 2);
    let walls = ring(&mut map, &[hole]);
    let obstacles: IndexSet<Cell> = [hole].into_iter().collect();

    let found = detect_enclosures(&map, &boundary(&walls), &obstacles, BUDGET);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].interior_count(), 9);
    assert_eq!(found[0].gap_count, 1);
    assert_eq!(found[0].gaps[0].cell, hole);
    release(&mut map, walls);
}

#[test]
fn obstacle_cell_holding_a_wall_is_not_a_gap() {
    let mut rows = vec![".........".to_owned(); 9];
    rows[2] = "....#....".to_owned();
    let mut map = GridMap::from_ascii(&rows).expect("Karte");
    let existing = Cell::new(4, 2);
    let walls = ring(&mut map, &[existing]);
    let obstacles: IndexSet<Cell> = [existing].into_iter().collect();

    let found = detect_enclosures(&map, &boundary(&walls), &obstacles, BUDGET);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].interior_count(), 9);
    assert_eq!(found[0].gap_count, 0);
    assert!(found[0].gaps.is_empty());
    release(&mut map, walls);
}

#[test]
fn open_side_never_encloses() {
    let mut map = GridMap::new(9, 9);
    let open: Vec<Cell> = (3..=5).map(|z| Cell::new(6, z)).collect();
    let walls = ring(&mut map, &open);

    let found = detect_enclosures(&map, &boundary(&walls), &IndexSet::new(), BUDGET);

    assert!(found.is_empty());
    release(&mut map, walls);
}

#[test]
fn budget_factor_one_still_covers_small_room() {
    let mut map = GridMap::new(9, 9);
    let walls = ring(&mut map, &[]);

    let found = detect_enclosures(&map, &boundary(&walls), &IndexSet::new(), 1);
    assert_eq!(found.len(), 1);
    release(&mut map, walls);
}
