use crate::config::Config;
use crate::error::GridError;
use crate::geometry::{Direction, Position};
use crate::grid::{Grid, Placement, ROBOT_FOOTPRINT};
use crate::robot::Robot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid size, obstacles and robot start, as stored in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_footprint")]
    pub footprint: i32,
    pub robot: Position,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

/// Obstacle as written in a scenario file; the direction is a single letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: i32,
    pub y: i32,
    pub direction: String,
}

impl ObstacleSpec {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        ObstacleSpec {
            x,
            y,
            direction: direction.to_string(),
        }
    }
}

/// A grid and robot ready for planning, plus how each listed obstacle fared
#[derive(Debug)]
pub struct Built {
    pub grid: Grid,
    pub robot: Robot,
    pub placements: Vec<Placement>,
}

fn default_footprint() -> i32 {
    ROBOT_FOOTPRINT
}

impl Scenario {
    /// 20x20 grid, one obstacle facing north at (5, 5), one facing east at
    /// (15, 15), robot starting at (1, 18)
    pub fn demo() -> Self {
        Scenario {
            width: 20,
            height: 20,
            footprint: ROBOT_FOOTPRINT,
            robot: Position::new(1, 18),
            obstacles: vec![
                ObstacleSpec::new(5, 5, Direction::North),
                ObstacleSpec::new(15, 15, Direction::East),
            ],
        }
    }

    /// Empty grid sized and seeded from configuration
    pub fn from_config(config: &Config) -> Self {
        Scenario {
            width: config.grid.width,
            height: config.grid.height,
            footprint: config.grid.footprint,
            robot: Position::new(config.robot.start_x, config.robot.start_y),
            obstacles: Vec::new(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let json = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&json)?;
        Ok(scenario)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parse every direction, then place obstacles in file order.
    ///
    /// A malformed direction fails the whole build; rejected placements do not.
    pub fn build(&self) -> Result<Built, GridError> {
        let directions = self
            .obstacles
            .iter()
            .map(|spec| spec.direction.parse::<Direction>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut grid = Grid::with_footprint(self.width, self.height, self.footprint)?;
        let placements = self
            .obstacles
            .iter()
            .zip(directions)
            .map(|(spec, direction)| grid.place(spec.x, spec.y, direction))
            .collect();

        Ok(Built {
            grid,
            robot: Robot::new(self.robot.x, self.robot.y),
            placements,
        })
    }
}
