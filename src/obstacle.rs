use crate::geometry::{self, Cell, Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier handed out by an `IdAllocator`; always > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing obstacle ids starting at 1. Ids are never reused.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    pub fn next_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next);
        self.next += 1;
        id
    }

    /// Id the next call to `next_id` will return
    pub fn peek(&self) -> ObstacleId {
        ObstacleId(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A directional obstacle. Immutable once constructed.
///
/// Equality is structural over (x, y, direction); the id is ignored, so two
/// obstacles built separately for the same spot compare equal.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Obstacle {
    x: i32,
    y: i32,
    direction: Direction,
    id: ObstacleId,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, direction: Direction, ids: &mut IdAllocator) -> Self {
        Obstacle {
            x,
            y,
            direction,
            id: ids.next_id(),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn cell(&self) -> Cell {
        Cell::facing(self.x, self.y, self.direction)
    }

    /// Structural comparison, independent of id
    pub fn same_as(&self, other: &Obstacle) -> bool {
        self.x == other.x && self.y == other.y && self.direction == other.direction
    }

    pub fn visible_coordinates(&self) -> [Cell; 3] {
        geometry::visible_coordinates(self.x, self.y, self.direction)
    }
}

impl PartialEq for Obstacle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Obstacle {} at ({}, {}) facing {}",
            self.id, self.x, self.y, self.direction
        )
    }
}
