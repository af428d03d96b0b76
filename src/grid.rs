use crate::error::GridError;
use crate::geometry::{Direction, Position};
use crate::obstacle::{IdAllocator, Obstacle};
use tracing::{debug, warn};

/// Size of the robot car, in cells, that must fit in front of an obstacle
pub const ROBOT_FOOTPRINT: i32 = 3;

/// Why an obstacle was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    InsufficientClearance,
    /// A different obstacle already sits on that cell
    CellOccupied,
}

/// Outcome of `Grid::add_obstacle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Admitted,
    AlreadyExists,
    Rejected(Rejection),
}

impl Placement {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Placement::Admitted)
    }
}

/// Rectangular grid holding the placed obstacles
///
/// x runs over columns `0..width`, y over rows `0..height`, with row 0 at the top.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    /// Robot footprint used by the clearance check
    pub footprint: i32,
    obstacles: Vec<Obstacle>,
    ids: IdAllocator,
}

impl Grid {
    /// Create an empty grid using the default robot footprint
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::with_footprint(width, height, ROBOT_FOOTPRINT)
    }

    pub fn with_footprint(width: i32, height: i32, footprint: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if footprint <= 0 {
            return Err(GridError::InvalidFootprint(footprint));
        }
        Ok(Grid {
            width,
            height,
            footprint,
            obstacles: Vec::new(),
            ids: IdAllocator::new(),
        })
    }

    /// Build an obstacle with the next id from this grid's allocator.
    /// The obstacle is not placed; pass it to `add_obstacle`.
    pub fn new_obstacle(&mut self, x: i32, y: i32, direction: Direction) -> Obstacle {
        Obstacle::new(x, y, direction, &mut self.ids)
    }

    /// Convenience for `new_obstacle` followed by `add_obstacle`
    pub fn place(&mut self, x: i32, y: i32, direction: Direction) -> Placement {
        let obstacle = self.new_obstacle(x, y, direction);
        self.add_obstacle(obstacle)
    }

    /// Check if (x, y) lies inside the grid
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Check there is room on the obstacle's facing side for the robot to sit
    pub fn has_space_for_obstacle(&self, obstacle: &Obstacle) -> bool {
        match obstacle.direction() {
            Direction::North => obstacle.y() >= self.footprint,
            Direction::South => obstacle.y() < self.height - self.footprint,
            Direction::East => obstacle.x() < self.width - self.footprint,
            Direction::West => obstacle.x() >= self.footprint,
        }
    }

    /// Admit the obstacle if it is in bounds, has clearance and its cell is free.
    /// Nothing changes unless the result is `Placement::Admitted`.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Placement {
        let placement = self.check_placement(&obstacle);
        match placement {
            Placement::Admitted => {
                debug!("placed {}", obstacle);
                self.obstacles.push(obstacle);
            }
            Placement::AlreadyExists => {
                warn!(
                    "obstacle at ({}, {}) facing {} already exists",
                    obstacle.x(),
                    obstacle.y(),
                    obstacle.direction()
                );
            }
            Placement::Rejected(reason) => {
                warn!(
                    "obstacle at ({}, {}) facing {} cannot be added: {:?}",
                    obstacle.x(),
                    obstacle.y(),
                    obstacle.direction(),
                    reason
                );
            }
        }
        placement
    }

    fn check_placement(&self, obstacle: &Obstacle) -> Placement {
        if !self.is_valid_position(obstacle.x(), obstacle.y()) {
            return Placement::Rejected(Rejection::OutOfBounds);
        }
        if !self.has_space_for_obstacle(obstacle) {
            return Placement::Rejected(Rejection::InsufficientClearance);
        }
        match self.obstacle_at(obstacle.x(), obstacle.y()) {
            Some(existing) if existing.same_as(obstacle) => Placement::AlreadyExists,
            Some(_) => Placement::Rejected(Rejection::CellOccupied),
            None => Placement::Admitted,
        }
    }

    /// Placed obstacles in the order they were admitted
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle_at(&self, x: i32, y: i32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.x() == x && o.y() == y)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.is_valid_position(position.x, position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Grid::new(5, -1).is_err());
    }

    #[test]
    fn test_rejects_non_positive_footprint() {
        assert!(matches!(
            Grid::with_footprint(20, 20, -5),
            Err(GridError::InvalidFootprint(-5))
        ));
        assert!(matches!(
            Grid::with_footprint(20, 20, 0),
            Err(GridError::InvalidFootprint(0))
        ));
    }

    #[test]
    fn test_huge_footprint_leaves_no_room() {
        let mut grid = Grid::with_footprint(20, 20, i32::MAX).unwrap();
        for direction in Direction::ALL {
            assert_eq!(
                grid.place(5, 5, direction),
                Placement::Rejected(Rejection::InsufficientClearance)
            );
        }
        assert!(grid.obstacles().is_empty());
    }

    #[test]
    fn test_clearance_follows_footprint() {
        let mut grid = Grid::with_footprint(20, 20, 1).unwrap();
        assert!(grid.place(0, 1, Direction::North).is_admitted());
        assert!(grid.place(18, 5, Direction::East).is_admitted());
        assert_eq!(
            grid.place(19, 7, Direction::East),
            Placement::Rejected(Rejection::InsufficientClearance)
        );
        assert_eq!(
            grid.place(0, 0, Direction::North),
            Placement::Rejected(Rejection::InsufficientClearance)
        );
    }

    #[test]
    fn test_valid_position() {
        let grid = Grid::new(20, 10).unwrap();
        assert!(grid.is_valid_position(0, 0));
        assert!(grid.is_valid_position(19, 9));
        assert!(!grid.is_valid_position(20, 0));
        assert!(!grid.is_valid_position(0, 10));
        assert!(!grid.is_valid_position(-1, 3));
    }

    #[test]
    fn test_clearance_per_direction() {
        let mut grid = Grid::new(20, 20).unwrap();

        let north_ok = grid.new_obstacle(5, 3, Direction::North);
        let north_bad = grid.new_obstacle(5, 2, Direction::North);
        assert!(grid.has_space_for_obstacle(&north_ok));
        assert!(!grid.has_space_for_obstacle(&north_bad));

        let south_ok = grid.new_obstacle(5, 16, Direction::South);
        let south_bad = grid.new_obstacle(5, 17, Direction::South);
        assert!(grid.has_space_for_obstacle(&south_ok));
        assert!(!grid.has_space_for_obstacle(&south_bad));

        let east_ok = grid.new_obstacle(16, 5, Direction::East);
        let east_bad = grid.new_obstacle(17, 5, Direction::East);
        assert!(grid.has_space_for_obstacle(&east_ok));
        assert!(!grid.has_space_for_obstacle(&east_bad));

        let west_ok = grid.new_obstacle(3, 5, Direction::West);
        let west_bad = grid.new_obstacle(2, 5, Direction::West);
        assert!(grid.has_space_for_obstacle(&west_ok));
        assert!(!grid.has_space_for_obstacle(&west_bad));
    }

    #[test]
    fn test_origin_facing_north_rejected() {
        let mut grid = Grid::new(20, 20).unwrap();
        let obstacle = grid.new_obstacle(0, 0, Direction::North);
        assert!(!grid.has_space_for_obstacle(&obstacle));
        assert_eq!(
            grid.add_obstacle(obstacle),
            Placement::Rejected(Rejection::InsufficientClearance)
        );
        assert!(grid.obstacles().is_empty());
    }

    #[test]
    fn test_out_of_bounds_rejected_before_clearance() {
        let mut grid = Grid::new(10, 10).unwrap();
        assert_eq!(
            grid.place(12, 5, Direction::West),
            Placement::Rejected(Rejection::OutOfBounds)
        );
    }

    #[test]
    fn test_duplicate_is_idempotent() {
        let mut grid = Grid::new(20, 20).unwrap();
        let obstacle = grid.new_obstacle(5, 5, Direction::North);
        assert_eq!(grid.add_obstacle(obstacle), Placement::Admitted);
        assert_eq!(grid.add_obstacle(obstacle), Placement::AlreadyExists);
        assert_eq!(grid.obstacles().len(), 1);

        // a separately built twin is a duplicate as well
        assert_eq!(grid.place(5, 5, Direction::North), Placement::AlreadyExists);
        assert_eq!(grid.obstacles().len(), 1);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut grid = Grid::new(20, 20).unwrap();
        assert!(grid.place(5, 5, Direction::North).is_admitted());
        assert_eq!(
            grid.place(5, 5, Direction::East),
            Placement::Rejected(Rejection::CellOccupied)
        );
        assert_eq!(grid.obstacles().len(), 1);
    }

    #[test]
    fn test_obstacles_keep_admission_order() {
        let mut grid = Grid::new(20, 20).unwrap();
        grid.place(15, 15, Direction::East);
        grid.place(5, 5, Direction::North);
        let coords: Vec<_> = grid.obstacles().iter().map(|o| (o.x(), o.y())).collect();
        assert_eq!(coords, vec![(15, 15), (5, 5)]);
        assert!(grid.obstacles()[0].id() < grid.obstacles()[1].id());
    }
}
