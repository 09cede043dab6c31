//! Core-Domänentypen: Zellen, Raster-Schnittstelle, Regionen, Einschlüsse.

pub mod cell;
pub mod enclosure;
/// Schnittstelle zum externen Raster-Speicher (Abfragen + schmale Mutationen)
pub mod grid;
pub mod grid_map;
pub mod marker;
pub mod region;

pub use cell::Cell;
pub use enclosure::{detect_enclosures, Enclosure, ObstacleClass, FOGGED_LABEL};
pub use grid::{
    is_wall_like, AreaId, BoundaryObject, DesignationRemoval, DesignationTag, GridError,
    GridQuery, GridStore, ObjectId, Occupant, OwnedObject, TerrainKind, ZoneId,
};
pub use grid_map::GridMap;
pub use marker::{Gap, Obstacle};
pub use region::{connected_regions, count_regions};
