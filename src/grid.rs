//! Fast per-tick index over the map, zone grid, and occupancy.
//!
//! `GridIndex` is rebuilt from the snapshot once per tick and answers every
//! spatial predicate in O(1): bounds, walkability, zone ownership, item and
//! enemy occupancy, and border membership. Border cells (own-territory cells
//! with a walkable orthogonal neighbor outside own territory) are precomputed
//! up front so the defender logic can iterate them cheaply.

use crate::game_state::{TeamGameState, TileType};
use crate::location::Location;
use bitflags::bitflags;
use fnv::FnvHashSet;
use log::warn;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const NONE = 0;
        const WALL = 1;
        const ITEM = 2;
        const ENEMY = 4;
    }
}

/// Zone ownership of a cell relative to the evaluating team.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Zone {
    Own,
    Enemy,
    Neutral,
}

/// Neighbor offsets for 4-directional (cardinal) movement.
pub const NEIGHBORS_4: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Row-major storage for one value per map cell.
#[derive(Clone)]
pub struct GridArray<T: Copy> {
    width: usize,
    data: Vec<T>,
}

impl<T: Copy> GridArray<T> {
    pub fn new(width: usize, height: usize, initial: T) -> Self {
        GridArray {
            width,
            data: vec![initial; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        let index = y * self.width + x;
        &self.data[index]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let index = y * self.width + x;
        &mut self.data[index]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }
}

/// Read-mostly spatial index for one tick. Only the ITEM occupancy bits
/// change after construction (through the context's local-effect step).
pub struct GridIndex {
    width: u16,
    height: u16,
    flags: GridArray<CellFlags>,
    zones: GridArray<Zone>,
    border: Vec<Location>,
    border_set: FnvHashSet<Location>,
}

impl GridIndex {
    /// Build the index from a snapshot. Malformed snapshots (oversized maps,
    /// short tile or zone rows, out-of-range entity positions) are clamped:
    /// missing tile data reads as WALL, missing zone data as neutral, and
    /// out-of-range positions are ignored.
    pub fn build(state: &TeamGameState) -> GridIndex {
        let width = state.map.width.min(256) as u16;
        let height = state.map.height.min(256) as u16;
        if width as u32 != state.map.width || height as u32 != state.map.height {
            warn!(
                "map {}x{} exceeds the supported 256x256 range, clamping",
                state.map.width, state.map.height
            );
        }

        let mut flags = GridArray::new(width as usize, height as usize, CellFlags::NONE);
        let mut zones = GridArray::new(width as usize, height as usize, Zone::Neutral);
        let mut clamped_tiles = false;
        let mut clamped_zones = false;

        for x in 0..width as usize {
            let tile_column = state.map.tiles.get(x);
            let zone_column = state.team_zone_grid.get(x);

            for y in 0..height as usize {
                match tile_column.and_then(|column| column.get(y)) {
                    Some(TileType::Wall) => flags.set(x, y, CellFlags::WALL),
                    Some(_) => {}
                    None => {
                        clamped_tiles = true;
                        flags.set(x, y, CellFlags::WALL);
                    }
                }

                let zone = match zone_column.and_then(|column| column.get(y)) {
                    Some(owner) if owner.is_empty() => Zone::Neutral,
                    Some(owner) if *owner == state.current_team_id => Zone::Own,
                    Some(_) => Zone::Enemy,
                    None => {
                        clamped_zones = true;
                        Zone::Neutral
                    }
                };
                zones.set(x, y, zone);
            }
        }

        if clamped_tiles {
            warn!("tile grid shorter than map dimensions, missing cells read as WALL");
        }
        if clamped_zones {
            warn!("zone grid shorter than map dimensions, missing cells read as neutral");
        }

        let mut index = GridIndex {
            width,
            height,
            flags,
            zones,
            border: Vec::new(),
            border_set: FnvHashSet::default(),
        };

        for item in &state.items {
            if index.in_bounds(item.position) {
                index.set_item(item.position);
            }
        }
        for enemy in &state.other_characters {
            if enemy.alive && index.in_bounds(enemy.position) {
                let (x, y) = (enemy.position.x() as usize, enemy.position.y() as usize);
                let cell = *index.flags.get(x, y) | CellFlags::ENEMY;
                index.flags.set(x, y, cell);
            }
        }

        index.compute_border();
        index
    }

    /// A border cell is a walkable own-territory cell with at least one
    /// walkable orthogonal neighbor outside own territory.
    fn compute_border(&mut self) {
        for loc in self.locations() {
            if !self.walkable(loc) || self.zone_of(loc) != Zone::Own {
                continue;
            }
            let on_border = NEIGHBORS_4.iter().any(|&(dx, dy)| {
                loc.step(dx, dy)
                    .map(|next| self.walkable(next) && self.zone_of(next) != Zone::Own)
                    .unwrap_or(false)
            });
            if on_border {
                self.border.push(loc);
                self.border_set.insert(loc);
            }
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        (loc.x() as u16) < self.width && (loc.y() as u16) < self.height
    }

    #[inline]
    pub fn flags_at(&self, loc: Location) -> CellFlags {
        *self.flags.get(loc.x() as usize, loc.y() as usize)
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn walkable(&self, loc: Location) -> bool {
        self.in_bounds(loc) && !self.flags_at(loc).contains(CellFlags::WALL)
    }

    /// Walkable and not occupied by a living enemy. This is the passability
    /// predicate used when an agent wants route control.
    #[inline]
    pub fn passable(&self, loc: Location) -> bool {
        self.in_bounds(loc)
            && !self
                .flags_at(loc)
                .intersects(CellFlags::WALL | CellFlags::ENEMY)
    }

    /// Zone ownership; out-of-bounds cells read as neutral.
    #[inline]
    pub fn zone_of(&self, loc: Location) -> Zone {
        if self.in_bounds(loc) {
            *self.zones.get(loc.x() as usize, loc.y() as usize)
        } else {
            Zone::Neutral
        }
    }

    #[inline]
    pub fn is_own(&self, loc: Location) -> bool {
        self.zone_of(loc) == Zone::Own
    }

    #[inline]
    pub fn is_enemy_zone(&self, loc: Location) -> bool {
        self.zone_of(loc) == Zone::Enemy
    }

    #[inline]
    pub fn has_item(&self, loc: Location) -> bool {
        self.in_bounds(loc) && self.flags_at(loc).contains(CellFlags::ITEM)
    }

    pub fn set_item(&mut self, loc: Location) {
        if self.in_bounds(loc) {
            let (x, y) = (loc.x() as usize, loc.y() as usize);
            let cell = *self.flags.get(x, y) | CellFlags::ITEM;
            self.flags.set(x, y, cell);
        }
    }

    pub fn clear_item(&mut self, loc: Location) {
        if self.in_bounds(loc) {
            let (x, y) = (loc.x() as usize, loc.y() as usize);
            let cell = *self.flags.get(x, y) - CellFlags::ITEM;
            self.flags.set(x, y, cell);
        }
    }

    /// All in-bounds orthogonal neighbors.
    pub fn neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        NEIGHBORS_4
            .iter()
            .filter_map(move |&(dx, dy)| loc.step(dx, dy))
            .filter(move |&next| self.in_bounds(next))
    }

    pub fn walkable_neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        self.neighbors(loc).filter(move |&next| self.walkable(next))
    }

    pub fn passable_neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        self.neighbors(loc).filter(move |&next| self.passable(next))
    }

    /// Precomputed border cells, in row-major construction order.
    pub fn border_cells(&self) -> &[Location] {
        &self.border
    }

    #[inline]
    pub fn is_border(&self, loc: Location) -> bool {
        self.border_set.contains(&loc)
    }

    /// Every in-bounds location, row-major.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let (width, height) = (self.width as u32, self.height as u32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Location::from_coords(x, y)))
    }
}
