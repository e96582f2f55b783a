//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (inclusive) for freshly drawn lineage ids.
pub const MAX_LINEAGE_ID: u32 = 1_000_000;

/// Identifier grouping an organism with its descendants.
///
/// Offspring inherit their parent's id unchanged; organisms created without a
/// parent draw a fresh one. Lineage is a bookkeeping label only, kinship is
/// decided by genome equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineageId(pub u32);

impl LineageId {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=MAX_LINEAGE_ID))
    }
}

impl fmt::Display for LineageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an organism in the world registry.
///
/// Handles are issued in strictly increasing order and never reused, so
/// ordering by handle is the same as ordering by registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring position one step along `direction`.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }
}

/// Compass heading. Discriminants run clockwise from north in 45° steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    const CLOCKWISE: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset in grid coordinates (y grows downward).
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Heading for an arbitrary index, wrapped modulo 8.
    pub fn from_index(index: usize) -> Self {
        Self::CLOCKWISE[index % 8]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Rotate counter-clockwise by `steps` × 45°.
    pub fn left(&self, steps: usize) -> Self {
        Self::from_index(self.index() + 8 - steps % 8)
    }

    /// Rotate clockwise by `steps` × 45°.
    pub fn right(&self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % 8)
    }

    pub fn all() -> [Direction; 8] {
        Self::CLOCKWISE
    }
}

/// Metabolic type of an organism, fixed at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Photosynthetic,
    Predator,
}

impl CellType {
    /// Whether holding more than the energy cap is fatal for this type.
    pub fn dies_from_excess(&self) -> bool {
        matches!(self, CellType::Photosynthetic)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Photosynthetic => write!(f, "photosynthetic"),
            CellType::Predator => write!(f, "predator"),
        }
    }
}
