//! Core types for the intersection simulation
//!
//! Time, identifiers and the compass directions feeding the intersection.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Simulated time in whole seconds since midnight of the simulated day
pub type SimTime = u64;

pub const SECONDS_PER_HOUR: SimTime = 60 * 60;
pub const SECONDS_PER_DAY: SimTime = SECONDS_PER_HOUR * 24;

/// A globally unique vehicle number, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four approaches feeding the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Start order of the per-direction processes
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }

    /// The approach whose entry is blocked while a vehicle from `self`
    /// occupies the shared circulating segment of a roundabout
    pub fn downstream(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Single-letter code used in the trip file
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A pair of opposing approaches that share a green phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    EastWest,
    NorthSouth,
}

impl Axis {
    /// Approaches on this axis, in service order
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::EastWest => [Direction::East, Direction::West],
            Axis::NorthSouth => [Direction::North, Direction::South],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::EastWest => write!(f, "EW"),
            Axis::NorthSouth => write!(f, "NS"),
        }
    }
}

/// One value per approach, indexed by [`Direction`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerDirection<T> {
    values: [T; 4],
}

impl<T> PerDirection<T> {
    pub fn new(north: T, south: T, east: T, west: T) -> Self {
        Self {
            values: [north, south, east, west],
        }
    }

    pub fn map_values<U>(self, f: impl FnMut(T) -> U) -> PerDirection<U> {
        PerDirection {
            values: self.values.map(f),
        }
    }

    /// Iterate `(direction, value)` pairs in N, S, E, W order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<Direction> for PerDirection<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.values[direction.index()]
    }
}

impl<T> IndexMut<Direction> for PerDirection<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.values[direction.index()]
    }
}
