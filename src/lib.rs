pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod obstacle;
pub mod planner;
pub mod render;
pub mod robot;
pub mod run_log;
pub mod scenario;

pub use error::GridError;
pub use geometry::{visible_coordinates, Cell, Direction, Position};
pub use grid::{Grid, Placement, Rejection};
pub use obstacle::{IdAllocator, Obstacle, ObstacleId};
pub use planner::{PlanEvent, PlanOutcome, PlanReport, PlannerConfig, Strategy, VisitPlanner};
pub use robot::Robot;
