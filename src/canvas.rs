//! Sparse editor canvas: cell → tile store plus the terrain neighbour
//! classifier.
//!
//! The canvas is an infinite grid; only painted cells exist. Painting a
//! terrain kind into a cell can change the auto-tiling of every cell that
//! touches it, so each paint rescans the 3×3 block around the edited cell
//! and recomputes those cells' neighbour tags from scratch.

use std::collections::HashMap;

use crate::catalog::{Catalog, KindCategory, KindId};
use crate::error::EditorError;

/// One grid-aligned coordinate in the infinite world. Screen-space y
/// grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        CellCoord { x, y }
    }

    fn shifted(self, dx: i32, dy: i32) -> Self {
        CellCoord {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Compass direction toward a neighbouring cell.
///
/// The canonical order below (N, S, W, E, then diagonals) is a rendering
/// lookup key: the tags of a tile's terrain neighbours, joined in this
/// order, name the sprite that matches the tile's surroundings. Reordering
/// the variants would silently break every terrain sprite lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North, // up in screen space, (0, -1)
    South,
    West,
    East,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All eight directions in canonical order.
    pub const CANONICAL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Grid offset of the neighbouring cell in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Short tag used in terrain sprite keys. Tags are joined with `_`,
    /// so `North` + `East` ("N_E") can never collide with `NorthEast`
    /// ("NE").
    pub fn tag(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::West => "W",
            Direction::East => "E",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

/// Sprite key of a tile with no terrain neighbours; also the fallback
/// sprite when no sprite matches a computed key.
pub const ISOLATED_KEY: &str = "X";

/// Contents of one painted cell.
///
/// Categories layer freely (a cell can hold terrain, water, a coin and an
/// enemy at once) but coin and enemy are single-slot: repainting replaces
/// the variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasTile {
    pub has_terrain: bool, // the only field the neighbour classifier reads
    pub has_water: bool,
    pub coin: Option<u8>,
    pub enemy: Option<u8>,
    /// Directions of terrain neighbours, canonical order. Derived state:
    /// recomputed by the classifier, never edited by hand.
    pub terrain_neighbours: Vec<Direction>,
}

impl CanvasTile {
    fn apply(&mut self, category: KindCategory) {
        match category {
            KindCategory::Terrain => self.has_terrain = true,
            KindCategory::Water => self.has_water = true,
            KindCategory::Coin(variant) => self.coin = Some(variant),
            KindCategory::Enemy(variant) => self.enemy = Some(variant),
        }
    }

    /// Sprite lookup key for this tile's terrain surroundings.
    pub fn terrain_key(&self) -> String {
        if self.terrain_neighbours.is_empty() {
            return ISOLATED_KEY.to_string();
        }
        self.terrain_neighbours
            .iter()
            .map(|d| d.tag())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Sparse map from cell coordinate to painted tile.
///
/// Owns its tiles exclusively; neighbour relations are recomputed by
/// coordinate, never stored as links. There is no erase tool, so tiles are
/// created and mutated but never removed.
#[derive(Debug, Clone)]
pub struct Canvas {
    tiles: HashMap<CellCoord, CanvasTile>,
    catalog: Catalog,
}

impl Canvas {
    /// Empty canvas painting kinds out of `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Canvas {
            tiles: HashMap::new(),
            catalog,
        }
    }

    /// Paint `kind` into `cell`, creating the tile if the cell is empty,
    /// then reclassify the 3×3 block around it.
    ///
    /// An out-of-catalog `kind` is a configuration error and fails fast.
    pub fn paint(&mut self, cell: CellCoord, kind: KindId) -> Result<(), EditorError> {
        let category = self.catalog.category_of(kind)?;
        self.tiles.entry(cell).or_default().apply(category);
        self.reclassify_around(cell);
        Ok(())
    }

    /// Tile at `cell`, if painted.
    pub fn get(&self, cell: CellCoord) -> Option<&CanvasTile> {
        self.tiles.get(&cell)
    }

    /// Number of painted cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when nothing has been painted yet.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All painted cells. Iteration order is unspecified; painted tiles
    /// occupy distinct cells, so draw order does not matter.
    pub fn iter(&self) -> impl Iterator<Item = (&CellCoord, &CanvasTile)> {
        self.tiles.iter()
    }

    /// Recompute `terrain_neighbours` for every existing cell in the 3×3
    /// block centered on `cell`. Painting terrain at `cell` changes the
    /// adjacency of up to eight surrounding cells at once, so the whole
    /// cluster is rescanned, not just the edited cell.
    fn reclassify_around(&mut self, cell: CellCoord) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let n = cell.shifted(dx, dy);
                if !self.tiles.contains_key(&n) {
                    continue;
                }
                let tags = self.classify(n);
                if let Some(tile) = self.tiles.get_mut(&n) {
                    tile.terrain_neighbours = tags;
                }
            }
        }
    }

    /// Directions around `cell` whose neighbour exists and has terrain,
    /// in canonical order. Only `has_terrain` counts; water, coins and
    /// enemies are invisible to adjacency.
    fn classify(&self, cell: CellCoord) -> Vec<Direction> {
        Direction::CANONICAL
            .iter()
            .copied()
            .filter(|dir| {
                let (dx, dy) = dir.offset();
                self.tiles
                    .get(&cell.shifted(dx, dy))
                    .map_or(false, |t| t.has_terrain)
            })
            .collect()
    }
}
