use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance, in cells, between an obstacle and the line it is sensed from
pub const SENSOR_OFFSET: i32 = 2;

/// Facing direction of an obstacle (or a sensing coordinate derived from one)
///
/// North points towards y = 0, matching the row order the grid is printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn letter(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Unit step (dx, dy) pointing the way this direction faces
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Direction {
    type Error = GridError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'N' => Ok(Direction::North),
            'S' => Ok(Direction::South),
            'E' => Ok(Direction::East),
            'W' => Ok(Direction::West),
            other => Err(GridError::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::try_from(c),
            _ => Err(GridError::InvalidDirection(s.to_string())),
        }
    }
}

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Calculate Euclidean distance squared (avoid sqrt when only comparing).
    /// Saturates at `u64::MAX` for points at opposite corners of the i32 range.
    pub fn distance_squared(&self, other: &Position) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        (dx * dx).saturating_add(dy * dy)
    }

    /// Calculate Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = f64::from(self.x.abs_diff(other.x));
        let dy = f64::from(self.y.abs_diff(other.y));
        dx.hypot(dy)
    }

    /// Number of diagonal-capable unit steps between the two positions
    pub fn chebyshev(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A grid coordinate with an optional facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub direction: Option<Direction>,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y, direction: None }
    }

    pub fn facing(x: i32, y: i32, direction: Direction) -> Self {
        Cell {
            x,
            y,
            direction: Some(direction),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Coordinates from which an obstacle at (x, y) facing `direction` can be sensed.
///
/// The three cells form a line `SENSOR_OFFSET` away on the facing side, one cell
/// either side of the obstacle's axis. Nothing is clipped to grid bounds here.
pub fn visible_coordinates(x: i32, y: i32, direction: Direction) -> [Cell; 3] {
    match direction {
        Direction::North | Direction::South => {
            let (_, dy) = direction.delta();
            let row = y + dy * SENSOR_OFFSET;
            [
                Cell::facing(x - 1, row, direction),
                Cell::facing(x, row, direction),
                Cell::facing(x + 1, row, direction),
            ]
        }
        Direction::East | Direction::West => {
            let (dx, _) = direction.delta();
            let col = x + dx * SENSOR_OFFSET;
            [
                Cell::facing(col, y - 1, direction),
                Cell::facing(col, y, direction),
                Cell::facing(col, y + 1, direction),
            ]
        }
    }
}
