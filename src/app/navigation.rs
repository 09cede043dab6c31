//! Navigierbare Listen für Hindernisse, Lücken und Zonenteile.
//!
//! Die Sitzung kennt keine Ausgabe; `build_session_list` liest ihren
//! Zustand und erzeugt eine benannte Liste, die über einen
//! `NavigationSink` veröffentlicht wird.

use super::segment::EditCategory;
use super::session::PlacementSession;
use crate::core::Cell;
use crate::shared::SessionOptions;
use serde::Serialize;
use std::collections::HashSet;

/// Art eines Listeneintrags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavItemKind {
    /// Blockierte Zelle
    Obstacle,
    /// Blockierte Zelle auf dem Rand eines Einschlusses
    Gap,
    /// Ankerzelle eines Zonenteils
    Region,
}

/// Ein anspringbarer Eintrag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Zielzelle
    pub cell: Cell,
    /// Anzeigename
    pub label: String,
    /// Art des Eintrags
    pub kind: NavItemKind,
}

/// Benannte, geordnete Liste von Einträgen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigableList {
    /// Listenname
    pub name: String,
    /// Einträge in Anzeigereihenfolge
    pub items: Vec<NavItem>,
}

impl NavigableList {
    /// Sortiert stabil nach Manhattan-Distanz zu `from`.
    pub fn sort_by_distance(&mut self, from: Cell) {
        self.items.sort_by_key(|item| item.cell.manhattan_distance(from));
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gibt `true` zurück, wenn die Liste leer ist.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Empfänger für navigierbare Listen (Screenreader-Menü, Testprotokoll, …).
pub trait NavigationSink {
    /// Ersetzt die aktuelle Liste.
    fn publish_navigable_list(&mut self, list: NavigableList);

    /// Entfernt die aktuelle Liste.
    fn clear_navigable_list(&mut self);
}

/// Speicherinterner Empfänger mit Vor/Zurück-Blättern.
#[derive(Debug, Clone, Default)]
pub struct NavigationBoard {
    list: Option<NavigableList>,
    index: Option<usize>,
}

impl NavigationBoard {
    /// Erstellt ein leeres Board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuell veröffentlichte Liste.
    pub fn list(&self) -> Option<&NavigableList> {
        self.list.as_ref()
    }

    /// Aktuell fokussierter Eintrag.
    pub fn current(&self) -> Option<&NavItem> {
        let index = self.index?;
        self.list.as_ref()?.items.get(index)
    }

    /// Springt zum nächsten Eintrag (nach dem letzten wieder zum ersten).
    pub fn next_item(&mut self) -> Option<&NavItem> {
        let len = self.list.as_ref().map_or(0, NavigableList::len);
        if len == 0 {
            return None;
        }
        self.index = Some(match self.index {
            Some(i) => (i + 1) % len,
            None => 0,
        });
        self.current()
    }

    /// Springt zum vorherigen Eintrag (vor dem ersten zum letzten).
    pub fn previous_item(&mut self) -> Option<&NavItem> {
        let len = self.list.as_ref().map_or(0, NavigableList::len);
        if len == 0 {
            return None;
        }
        self.index = Some(match self.index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
        self.current()
    }
}

impl NavigationSink for NavigationBoard {
    fn publish_navigable_list(&mut self, list: NavigableList) {
        log::debug!("Liste '{}' mit {} Einträgen veröffentlicht", list.name, list.len());
        self.list = Some(list);
        self.index = None;
    }

    fn clear_navigable_list(&mut self) {
        self.list = None;
        self.index = None;
    }
}

/// Baut die Navigationsliste der laufenden Prüfung.
///
/// Bei zerfallener Zielzone steht je Zonenteil ein Anker vorne und die
/// Liste trägt den Zonenteil-Namen. `None`, wenn keine Prüfung läuft oder
/// nichts anzuspringen ist.
pub fn build_session_list(
    session: &PlacementSession,
    options: &SessionOptions,
    cursor: Cell,
) -> Option<NavigableList> {
    let category = session.category()?;

    let mut items = Vec::new();
    let split = category.is_zone() && session.regions().len() > 1;
    if split {
        for (i, region) in session.regions().iter().enumerate() {
            let Some(&anchor) = region.first() else {
                continue;
            };
            items.push(NavItem {
                cell: anchor,
                label: format!("Zonenteil {} ({} Zellen)", i + 1, region.len()),
                kind: NavItemKind::Region,
            });
        }
    }

    let gap_cells: HashSet<Cell> = if options.include_gaps_in_navigation
        && category == EditCategory::ObjectPlacement
    {
        session
            .enclosures()
            .iter()
            .flat_map(|e| e.gaps.iter().map(|g| g.cell))
            .collect()
    } else {
        HashSet::new()
    };
    items.extend(session.obstacles().map(|obstacle| NavItem {
        cell: obstacle.cell,
        label: obstacle.label.clone(),
        kind: if gap_cells.contains(&obstacle.cell) {
            NavItemKind::Gap
        } else {
            NavItemKind::Obstacle
        },
    }));

    if items.is_empty() {
        return None;
    }

    let name = if split {
        &options.region_list_name
    } else {
        &options.obstacle_list_name
    };
    let mut list = NavigableList {
        name: name.clone(),
        items,
    };
    if options.sort_navigation_by_distance {
        list.sort_by_distance(cursor);
    }
    Some(list)
}

/// Veröffentlicht die Liste der Prüfung oder leert den Empfänger.
///
/// Gibt die Anzahl der veröffentlichten Einträge zurück.
pub fn publish_session<S: NavigationSink + ?Sized>(
    sink: &mut S,
    session: &PlacementSession,
    options: &SessionOptions,
    cursor: Cell,
) -> usize {
    match build_session_list(session, options, cursor) {
        Some(list) => {
            let len = list.len();
            sink.publish_navigable_list(list);
            len
        }
        None => {
            sink.clear_navigable_list();
            0
        }
    }
}
