//! Placement Review Library.
//! Barrierefreie Prüfung von Platzierungen auf Raster-Karten: Segmente mit
//! Undo, Einschluss-Erkennung, Zonenteil-Zählung und navigierbare Listen.

pub mod app;
pub mod core;
pub mod scenario;
pub mod shared;

pub use app::{
    Announcement, AppCommand, AppController, AppIntent, AppState, DrawRequest, EditKind,
    NavigationBoard, NavigationSink, PlacementSession, SessionPhase, SessionSummary, ShapeKind,
};
pub use core::{
    connected_regions, count_regions, detect_enclosures, Cell, Enclosure, GridMap, GridQuery,
    GridStore,
};
pub use scenario::{Scenario, ScenarioReport};
pub use shared::SessionOptions;
