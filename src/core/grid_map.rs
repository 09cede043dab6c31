//! In-Memory-Raster-Speicher für Tests, Benchmarks und den Szenario-Runner.

use super::grid::{
    AreaId, DesignationRemoval, DesignationTag, GridError, GridQuery, GridStore, ObjectId,
    Occupant, OwnedObject, TerrainKind, ZoneId,
};
use super::Cell;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// Anzeigename bestehender Mauern (`#` im ASCII-Format).
pub const WALL_LABEL: &str = "Mauer";
/// Anzeigename eines Felsbrockens (`r`).
pub const ROCK_CHUNK_LABEL: &str = "Felsbrocken";
/// Anzeigename eines Baums (`t`).
pub const TREE_LABEL: &str = "Baum";

/// Vollständiger Raster-Speicher im Arbeitsspeicher.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    terrain: Vec<TerrainKind>,
    fog: Vec<bool>,
    occupants: HashMap<Cell, Vec<Occupant>>,
    object_cells: HashMap<ObjectId, Cell>,
    /// Vorläufige Objekte, deren Handle noch bei einer Sitzung liegt
    provisional: HashSet<ObjectId>,
    /// Protokoll zerstörter Objekte (Doppel-Zerstörung bleibt sichtbar)
    destroyed: Vec<ObjectId>,
    zones: IndexMap<ZoneId, IndexSet<Cell>>,
    zone_index: HashMap<Cell, ZoneId>,
    designations: HashMap<Cell, Vec<DesignationTag>>,
    areas: HashMap<AreaId, HashSet<Cell>>,
    next_object_id: u64,
    next_zone_id: u32,
    next_area_id: u32,
}

impl GridMap {
    /// Erstellt eine leere Karte (überall Erde, kein Nebel).
    pub fn new(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width: width.max(0),
            height: height.max(0),
            terrain: vec![TerrainKind::Soil; len],
            fog: vec![false; len],
            occupants: HashMap::new(),
            object_cells: HashMap::new(),
            provisional: HashSet::new(),
            destroyed: Vec::new(),
            zones: IndexMap::new(),
            zone_index: HashMap::new(),
            designations: HashMap::new(),
            areas: HashMap::new(),
            next_object_id: 1,
            next_zone_id: 0,
            next_area_id: 0,
        }
    }

    /// Baut eine Karte aus ASCII-Zeilen (Zeile = z, Spalte = x).
    ///
    /// Legende: `.` Erde, `,` Kies, `%` Sumpf, `~` Flachwasser, `W` Tiefwasser,
    /// `^` Fels, `#` Mauer, `r` Felsbrocken, `t` Baum, `?` Erde im Nebel,
    /// `z` Erde in einer gemeinsamen Bestandszone.
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> anyhow::Result<Self> {
        let Some(first) = rows.first() else {
            anyhow::bail!("Karte ohne Zeilen");
        };
        let width = first.as_ref().chars().count();
        let mut map = GridMap::new(width as i32, rows.len() as i32);
        let mut legacy_zone: Option<ZoneId> = None;

        for (z, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                anyhow::bail!(
                    "Zeile {} hat {} Zeichen, erwartet {}",
                    z,
                    row.chars().count(),
                    width
                );
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, z as i32);
                match symbol {
                    '.' => {}
                    ',' => map.set_terrain(cell, TerrainKind::Gravel),
                    '%' => map.set_terrain(cell, TerrainKind::Marsh),
                    '~' => map.set_terrain(cell, TerrainKind::ShallowWater),
                    'W' => map.set_terrain(cell, TerrainKind::DeepWater),
                    '^' => map.set_terrain(cell, TerrainKind::Rock),
                    '#' => {
                        map.place_object(cell, WALL_LABEL, true)?;
                    }
                    'r' => {
                        map.place_object(cell, ROCK_CHUNK_LABEL, false)?;
                    }
                    't' => {
                        map.place_object(cell, TREE_LABEL, false)?;
                    }
                    '?' => map.set_fogged(cell, true),
                    'z' => {
                        let zone = *legacy_zone.get_or_insert_with(|| map.create_zone());
                        map.add_zone_cell(zone, cell)?;
                    }
                    other => anyhow::bail!("Unbekanntes Kartensymbol '{}' bei {}", other, cell),
                }
            }
        }

        log::debug!("Karte {}x{} aus ASCII geladen", map.width, map.height);
        Ok(map)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.z as usize * self.width as usize + cell.x as usize)
    }

    /// Setzt das Terrain einer Zelle (außerhalb der Karte ignoriert).
    pub fn set_terrain(&mut self, cell: Cell, terrain: TerrainKind) {
        if let Some(i) = self.index(cell) {
            self.terrain[i] = terrain;
        }
    }

    /// Setzt den Nebel-Zustand einer Zelle.
    pub fn set_fogged(&mut self, cell: Cell, fogged: bool) {
        if let Some(i) = self.index(cell) {
            self.fog[i] = fogged;
        }
    }

    /// Setzt ein endgültiges Bestandsobjekt (kein Handle).
    pub fn place_object(
        &mut self,
        cell: Cell,
        label: &str,
        wall_like: bool,
    ) -> Result<ObjectId, GridError> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        self.occupants.entry(cell).or_default().push(Occupant {
            id,
            label: label.to_owned(),
            wall_like,
        });
        self.object_cells.insert(id, cell);
        Ok(id)
    }

    /// Legt einen neuen, leeren Bereich an.
    pub fn define_area(&mut self) -> AreaId {
        let id = AreaId(self.next_area_id);
        self.next_area_id += 1;
        self.areas.insert(id, HashSet::new());
        id
    }

    /// Existiert das Objekt noch?
    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.object_cells.contains_key(&id)
    }

    /// Ist das Objekt noch vorläufig (Handle bei einer Sitzung)?
    pub fn is_provisional(&self, id: ObjectId) -> bool {
        self.provisional.contains(&id)
    }

    /// Anzahl aller Objekte auf der Karte.
    pub fn object_count(&self) -> usize {
        self.object_cells.len()
    }

    /// Anzahl vorläufiger Objekte.
    pub fn provisional_count(&self) -> usize {
        self.provisional.len()
    }

    /// Alle bisher zerstörten Objekt-IDs in Reihenfolge.
    pub fn destroyed_objects(&self) -> &[ObjectId] {
        &self.destroyed
    }

    /// Anzahl der Zonen.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    fn ensure_zone(&self, zone: ZoneId) -> Result<(), GridError> {
        if self.zones.contains_key(&zone) {
            Ok(())
        } else {
            Err(GridError::UnknownZone(zone))
        }
    }
}

impl GridQuery for GridMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn occupants_at(&self, cell: Cell) -> &[Occupant] {
        self.occupants.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    fn terrain_at(&self, cell: Cell) -> TerrainKind {
        self.index(cell)
            .map(|i| self.terrain[i])
            .unwrap_or_default()
    }

    fn zone_at(&self, cell: Cell) -> Option<ZoneId> {
        self.zone_index.get(&cell).copied()
    }

    fn is_fogged(&self, cell: Cell) -> bool {
        self.index(cell).map(|i| self.fog[i]).unwrap_or(false)
    }
}

impl GridStore for GridMap {
    fn spawn_object(
        &mut self,
        cell: Cell,
        label: &str,
        wall_like: bool,
    ) -> Result<OwnedObject, GridError> {
        let id = self.place_object(cell, label, wall_like)?;
        self.provisional.insert(id);
        Ok(OwnedObject::issue(id, cell))
    }

    fn destroy_object(&mut self, object: OwnedObject) -> Result<(), GridError> {
        let id = object.id();
        let Some(cell) = self.object_cells.get(&id).copied() else {
            return Err(GridError::UnknownObject(id));
        };
        if !self.provisional.remove(&id) {
            return Err(GridError::AlreadyCommitted(id));
        }
        self.object_cells.remove(&id);
        if let Some(list) = self.occupants.get_mut(&cell) {
            list.retain(|o| o.id != id);
            if list.is_empty() {
                self.occupants.remove(&cell);
            }
        }
        self.destroyed.push(id);
        Ok(())
    }

    fn commit_object(&mut self, object: OwnedObject) -> Result<ObjectId, GridError> {
        let id = object.id();
        if !self.object_cells.contains_key(&id) {
            return Err(GridError::UnknownObject(id));
        }
        if !self.provisional.remove(&id) {
            return Err(GridError::AlreadyCommitted(id));
        }
        Ok(id)
    }

    fn create_zone(&mut self) -> ZoneId {
        let id = ZoneId(self.next_zone_id);
        self.next_zone_id += 1;
        self.zones.insert(id, IndexSet::new());
        id
    }

    fn delete_zone(&mut self, zone: ZoneId) -> Result<(), GridError> {
        let cells = self
            .zones
            .shift_remove(&zone)
            .ok_or(GridError::UnknownZone(zone))?;
        for cell in cells {
            self.zone_index.remove(&cell);
        }
        Ok(())
    }

    fn zone_cells(&self, zone: ZoneId) -> Option<&IndexSet<Cell>> {
        self.zones.get(&zone)
    }

    fn add_zone_cell(&mut self, zone: ZoneId, cell: Cell) -> Result<bool, GridError> {
        self.ensure_zone(zone)?;
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        match self.zone_index.get(&cell) {
            Some(&owner) if owner == zone => return Ok(false),
            Some(&owner) => return Err(GridError::CellInOtherZone { cell, zone: owner }),
            None => {}
        }
        self.zone_index.insert(cell, zone);
        if let Some(cells) = self.zones.get_mut(&zone) {
            cells.insert(cell);
        }
        Ok(true)
    }

    fn remove_zone_cell(&mut self, zone: ZoneId, cell: Cell) -> Result<bool, GridError> {
        let cells = self
            .zones
            .get_mut(&zone)
            .ok_or(GridError::UnknownZone(zone))?;
        if !cells.shift_remove(&cell) {
            return Ok(false);
        }
        self.zone_index.remove(&cell);
        Ok(true)
    }

    fn set_zone_cells(&mut self, zone: ZoneId, cells: IndexSet<Cell>) -> Result<(), GridError> {
        self.ensure_zone(zone)?;
        for &cell in &cells {
            if !self.in_bounds(cell) {
                return Err(GridError::OutOfBounds(cell));
            }
            if let Some(&owner) = self.zone_index.get(&cell) {
                if owner != zone {
                    return Err(GridError::CellInOtherZone { cell, zone: owner });
                }
            }
        }
        let previous = self.zones.insert(zone, cells.clone()).unwrap_or_default();
        for cell in previous {
            self.zone_index.remove(&cell);
        }
        for cell in cells {
            self.zone_index.insert(cell, zone);
        }
        Ok(())
    }

    fn designations_at(&self, cell: Cell) -> &[DesignationTag] {
        self.designations
            .get(&cell)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn add_designation(&mut self, cell: Cell, tag: &DesignationTag) -> Result<bool, GridError> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        let tags = self.designations.entry(cell).or_default();
        if tags.contains(tag) {
            return Ok(false);
        }
        tags.push(tag.clone());
        Ok(true)
    }

    fn remove_designation(&mut self, cell: Cell, tag: &DesignationTag) -> DesignationRemoval {
        let Some(tags) = self.designations.get_mut(&cell) else {
            return DesignationRemoval::NotFound;
        };
        let Some(pos) = tags.iter().position(|t| t == tag) else {
            return DesignationRemoval::NotFound;
        };
        tags.remove(pos);
        if tags.is_empty() {
            self.designations.remove(&cell);
        }
        DesignationRemoval::Removed
    }

    fn clear_designations(&mut self, cell: Cell) -> usize {
        self.designations
            .remove(&cell)
            .map(|tags| tags.len())
            .unwrap_or(0)
    }

    fn has_area(&self, area: AreaId) -> bool {
        self.areas.contains_key(&area)
    }

    fn area_contains(&self, area: AreaId, cell: Cell) -> bool {
        self.areas
            .get(&area)
            .is_some_and(|cells| cells.contains(&cell))
    }

    fn set_area_membership(
        &mut self,
        area: AreaId,
        cell: Cell,
        member: bool,
    ) -> Result<bool, GridError> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        let cells = self
            .areas
            .get_mut(&area)
            .ok_or(GridError::UnknownArea(area))?;
        Ok(if member {
            cells.insert(cell)
        } else {
            cells.remove(&cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ascii_reads_terrain_objects_and_fog() {
        let map = GridMap::from_ascii(&["#.r", "W?t", "zz^"]).expect("Karte gültig");

        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert!(map.occupants_at(Cell::new(0, 0))[0].wall_like);
        assert_eq!(map.occupants_at(Cell::new(2, 0))[0].label, ROCK_CHUNK_LABEL);
        assert_eq!(map.terrain_at(Cell::new(0, 1)), TerrainKind::DeepWater);
        assert!(map.is_fogged(Cell::new(1, 1)));
        assert_eq!(map.terrain_at(Cell::new(2, 2)), TerrainKind::Rock);
        let zone = map.zone_at(Cell::new(0, 2)).expect("Bestandszone");
        assert_eq!(map.zone_at(Cell::new(1, 2)), Some(zone));
        assert_eq!(map.zone_cells(zone).map(|c| c.len()), Some(2));
    }

    #[test]
    fn from_ascii_rejects_ragged_rows_and_unknown_symbols() {
        assert!(GridMap::from_ascii(&["...", ".."]).is_err());
        assert!(GridMap::from_ascii(&["..x"]).is_err());
        assert!(GridMap::from_ascii::<&str>(&[]).is_err());
    }

    #[test]
    fn destroy_consumes_handle_and_logs_once() {
        let mut map = GridMap::new(4, 4);
        let obj = map
            .spawn_object(Cell::new(1, 1), WALL_LABEL, true)
            .expect("spawn");
        let id = obj.id();

        map.destroy_object(obj).expect("erste Zerstörung");

        assert!(!map.contains_object(id));
        assert_eq!(map.destroyed_objects(), &[id]);
        // Ein gefälschtes zweites Handle wird abgewiesen, nicht doppelt zerstört
        let forged = OwnedObject::issue(id, Cell::new(1, 1));
        assert_eq!(map.destroy_object(forged), Err(GridError::UnknownObject(id)));
        assert_eq!(map.destroyed_objects().len(), 1);
    }

    #[test]
    fn committed_object_can_not_be_destroyed_via_handle() {
        let mut map = GridMap::new(4, 4);
        let obj = map.spawn_object(Cell::new(0, 0), WALL_LABEL, true).unwrap();
        let id = map.commit_object(obj).unwrap();
        assert!(!map.is_provisional(id));

        let forged = OwnedObject::issue(id, Cell::new(0, 0));
        assert_eq!(
            map.destroy_object(forged),
            Err(GridError::AlreadyCommitted(id))
        );
        assert!(map.contains_object(id));
    }

    #[test]
    fn zone_cells_are_exclusive_between_zones() {
        let mut map = GridMap::new(4, 4);
        let a = map.create_zone();
        let b = map.create_zone();
        assert_eq!(map.add_zone_cell(a, Cell::new(1, 1)), Ok(true));
        assert_eq!(map.add_zone_cell(a, Cell::new(1, 1)), Ok(false));
        assert_eq!(
            map.add_zone_cell(b, Cell::new(1, 1)),
            Err(GridError::CellInOtherZone {
                cell: Cell::new(1, 1),
                zone: a
            })
        );
    }

    #[test]
    fn set_zone_cells_replaces_index() {
        let mut map = GridMap::new(4, 4);
        let zone = map.create_zone();
        map.add_zone_cell(zone, Cell::new(0, 0)).unwrap();
        map.add_zone_cell(zone, Cell::new(1, 0)).unwrap();

        let mut replacement = IndexSet::new();
        replacement.insert(Cell::new(3, 3));
        map.set_zone_cells(zone, replacement).unwrap();

        assert_eq!(map.zone_at(Cell::new(0, 0)), None);
        assert_eq!(map.zone_at(Cell::new(3, 3)), Some(zone));
    }

    #[test]
    fn designations_are_removed_by_tag() {
        let mut map = GridMap::new(2, 2);
        let mine = DesignationTag::new("abbauen");
        let haul = DesignationTag::new("tragen");
        let cell = Cell::new(1, 1);
        map.add_designation(cell, &mine).unwrap();
        map.add_designation(cell, &haul).unwrap();

        assert_eq!(map.remove_designation(cell, &mine), DesignationRemoval::Removed);
        assert_eq!(map.remove_designation(cell, &mine), DesignationRemoval::NotFound);
        assert_eq!(map.designations_at(cell), &[haul]);
    }
}
