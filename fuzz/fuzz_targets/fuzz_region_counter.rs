#![no_main]

use libfuzzer_sys::fuzz_target;
use placement_review::{connected_regions, count_regions, Cell};
use std::collections::HashSet;

fuzz_target!(|data: &[u8]| {
    // Je zwei Bytes eine Zelle im 16×16-Fenster
    let cells: Vec<Cell> = data
        .chunks_exact(2)
        .map(|pair| Cell::new(i32::from(pair[0] % 16), i32::from(pair[1] % 16)))
        .collect();
    let distinct: HashSet<Cell> = cells.iter().copied().collect();

    let count = count_regions(cells.iter().copied());
    let doubled = count_regions(cells.iter().chain(cells.iter()).copied());
    assert_eq!(count, doubled, "Duplikate ändern die Anzahl");
    assert!(count <= distinct.len());
    assert_eq!(count == 0, distinct.is_empty());

    let regions = connected_regions(cells.iter().copied());
    assert_eq!(regions.len(), count);
    let covered: usize = regions.iter().map(Vec::len).sum();
    assert_eq!(covered, distinct.len(), "Zellen gehen verloren oder doppelt");
});
