//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `app`, `scenario` und die Binary
//! gemeinsam nutzen.

pub mod options;

pub use options::SessionOptions;
pub use options::{FLOOD_FILL_BUDGET_FACTOR, OBSTACLE_LIST_NAME, REGION_LIST_NAME};
