use placement_review::{Announcement, Scenario, SessionOptions, SessionPhase};
use std::path::Path;

fn fixture(name: &str) -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    Scenario::load(&path).expect("Fixture sollte ladbar sein")
}

#[test]
fn walled_room_fixture_encloses_then_reopens() {
    let scenario = fixture("walled_room.toml");
    let report = scenario
        .report(&SessionOptions::default())
        .expect("Szenario sollte durchlaufen");

    let placed: Vec<_> = report
        .announcements
        .iter()
        .filter_map(|a| match a {
            Announcement::Placed { summary } => Some(summary),
            _ => None,
        })
        .collect();
    assert_eq!(placed.len(), 4);
    let closed = placed[3];
    assert_eq!(closed.total_placed, 16);
    assert_eq!(closed.enclosures.len(), 1);
    assert_eq!(closed.enclosures[0].interior, 9);

    match report.announcements.last() {
        Some(Announcement::Undone {
            summary: Some(summary),
            ..
        }) => {
            assert_eq!(summary.total_placed, 13);
            assert!(summary.enclosures.is_empty());
        }
        other => panic!("Unerwartete letzte Ansage: {other:?}"),
    }
    assert_eq!(report.final_phase, SessionPhase::Reviewing);
}

#[test]
fn report_serializes_to_json() {
    let scenario = fixture("walled_room.toml");
    let report = scenario
        .report(&SessionOptions::default())
        .expect("Szenario sollte durchlaufen");

    let json = serde_json::to_value(&report).expect("JSON");
    assert_eq!(json["name"], "Ummauerter Raum");
    assert_eq!(json["final_phase"], "reviewing");
    assert_eq!(json["announcements"][0]["event"], "map_loaded");
}

#[test]
fn missing_fixture_is_an_error() {
    let result = Scenario::load(Path::new("/nonexistent/scenario.toml"));
    assert!(result.is_err());
}
