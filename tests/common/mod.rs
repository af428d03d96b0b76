#![allow(dead_code)]

use gridvisit::{Direction, Grid, Position, Robot};
use gridvisit::render::{format_path, render_with_path};

/// Build a grid and place every obstacle, panicking if one is turned away
pub fn grid_with(width: i32, height: i32, obstacles: &[(i32, i32, Direction)]) -> Grid {
    let mut grid = Grid::new(width, height).expect("valid grid size");
    for &(x, y, direction) in obstacles {
        let placement = grid.place(x, y, direction);
        assert!(
            placement.is_admitted(),
            "obstacle ({}, {}, {}) not admitted: {:?}",
            x,
            y,
            direction,
            placement
        );
    }
    grid
}

/// Visualize the robot's path on the grid (printed by tests for debugging)
pub fn visualize_run(grid: &Grid, robot: &Robot) -> String {
    format!(
        "\nPath: {}\nLength: {} steps\n\n{}",
        format_path(robot.path()),
        robot.steps(),
        render_with_path(grid, robot)
    )
}

/// Every consecutive pair of path entries differs by at most one on each axis
pub fn assert_unit_steps(path: &[Position]) {
    for pair in path.windows(2) {
        assert!(
            (pair[1].x - pair[0].x).abs() <= 1 && (pair[1].y - pair[0].y).abs() <= 1,
            "jump from {} to {}",
            pair[0],
            pair[1]
        );
        assert_ne!(pair[0], pair[1], "robot stood still at {}", pair[0]);
    }
}
