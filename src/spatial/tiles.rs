//! Hexagonal tile coordinates and cube-distance geometry
//!
//! Tiles live on an axial hex lattice with 8-bit coordinates. Each tile has
//! six potential neighbors; offsets that leave the 8-bit range simply do not
//! exist, so the lattice never wraps around.

use std::fmt;

/// Axial offsets of the six hex neighbors in E, NE, NW, W, SW, SE order
pub const HEX_OFFSETS: [(i16, i16); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// A cell position on the axial hex lattice
///
/// Equality and hashing use both coordinates, so a `Tile` can key hash maps
/// directly without packing tricks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    x: u8,
    y: u8,
}

impl Tile {
    /// Create a tile at the given axial coordinates
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Axial `q` coordinate
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Axial `r` coordinate
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Both coordinates packed into one comparable key, `x` in the high byte
    pub const fn key(self) -> u16 {
        ((self.x as u16) << 8) | self.y as u16
    }

    /// The tile displaced by an axial offset, if it stays inside the lattice
    pub fn offset(self, dx: i16, dy: i16) -> Option<Self> {
        let x = u8::try_from(i16::from(self.x) + dx).ok()?;
        let y = u8::try_from(i16::from(self.y) + dy).ok()?;
        Some(Self { x, y })
    }

    /// Lattice positions adjacent to this tile, in `HEX_OFFSETS` order
    pub fn around(self) -> impl Iterator<Item = Self> {
        HEX_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// Hex distance in cube coordinates: `(|dx| + |dy| + |dx + dy|) / 2`
    pub const fn distance(self, other: Self) -> u16 {
        let dx = self.x as i32 - other.x as i32;
        let dy = self.y as i32 - other.y as i32;
        ((dx.abs() + dy.abs() + (dx + dy).abs()) / 2) as u16
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One input triple: a tile position and its point value
///
/// A point value of 0 marks the start tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRecord {
    /// Lattice position
    pub tile: Tile,
    /// Points collected when the tile is entered
    pub point: u8,
}

impl TileRecord {
    /// Create a record from raw coordinates and point value
    pub const fn new(x: u8, y: u8, point: u8) -> Self {
        Self {
            tile: Tile::new(x, y),
            point,
        }
    }
}
