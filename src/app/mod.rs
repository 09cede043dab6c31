//! Application-Layer: Controller, State, Events, Sitzung und Werkzeuge.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod navigation;
pub mod segment;
pub mod session;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Karte, Sitzung, Cursor, Ansagen).
pub mod state;
pub mod summary;
pub mod tools;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::UndoReport;
pub use navigation::{
    build_session_list, publish_session, NavItem, NavItemKind, NavigableList, NavigationBoard,
    NavigationSink,
};
pub use segment::{EditCategory, Segment, SegmentEdits, SegmentStack};
pub use session::{
    ConfirmReport, PlacementSession, RefusalReason, SessionError, SessionPhase, ToggleOutcome,
};
pub use state::AppState;
pub use summary::{Announcement, AnnouncementLog, EnclosureSummary, SessionSummary};
pub use tools::{
    draw_shape, rasterize, DrawRequest, EditKind, EditPayload, PlacementBatch, ShapeKind,
};
