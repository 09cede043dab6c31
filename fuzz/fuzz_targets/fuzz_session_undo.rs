#![no_main]

use libfuzzer_sys::fuzz_target;
use placement_review::app::draw_shape;
use placement_review::{Cell, DrawRequest, EditKind, GridMap, PlacementSession, ShapeKind};

fuzz_target!(|data: &[u8]| {
    let mut map = match GridMap::from_ascii(&[
        "..........",
        "...r......",
        "......#...",
        "..t.......",
        "..........",
        "....r.....",
        "..........",
        "..........",
    ]) {
        Ok(map) => map,
        Err(_) => return,
    };
    let mut session = PlacementSession::default();

    // Je fünf Bytes: Operation, Startzelle, Endzelle
    for chunk in data.chunks_exact(5) {
        let from = Cell::new(i32::from(chunk[1] % 12) - 1, i32::from(chunk[2] % 10) - 1);
        let to = Cell::new(i32::from(chunk[3] % 12) - 1, i32::from(chunk[4] % 10) - 1);
        match chunk[0] % 6 {
            0..=2 => {
                let shape = match chunk[0] % 3 {
                    0 => ShapeKind::Line,
                    1 => ShapeKind::EmptyRect,
                    _ => ShapeKind::Single,
                };
                let request = DrawRequest {
                    shape,
                    from,
                    to,
                    edit: EditKind::Wall {
                        label: "Mauer".into(),
                    },
                };
                if let Ok(batch) = draw_shape(&mut map, &request) {
                    let _ = session.enter(&mut map, batch);
                }
            }
            3 => {
                let _ = session.undo_last(&mut map);
            }
            4 => {
                let _ = session.begin_adding_more();
            }
            _ => {
                let _ = session.cancel_adding_more();
            }
        }
    }

    let _ = session.cancel(&mut map);

    assert!(!session.is_active());
    assert_eq!(map.provisional_count(), 0, "vorläufige Objekte übrig");
    let mut destroyed = map.destroyed_objects().to_vec();
    let total = destroyed.len();
    destroyed.sort();
    destroyed.dedup();
    assert_eq!(destroyed.len(), total, "Objekt doppelt zerstört");
});
