use crate::geometry::Position;
use crate::grid::Grid;
use crate::robot::Robot;
use std::collections::HashSet;

/// Text picture of the grid, one row per line, cells separated by spaces.
///
/// Obstacles show their facing letter, the robot shows `R`, free cells `.`.
pub fn render_grid(grid: &Grid, robot: Option<&Robot>) -> String {
    render(grid, robot, &HashSet::new())
}

/// Like `render_grid`, with cells the robot has passed through marked `*`
pub fn render_with_path(grid: &Grid, robot: &Robot) -> String {
    let path: HashSet<Position> = robot.path().iter().copied().collect();
    render(grid, Some(robot), &path)
}

fn render(grid: &Grid, robot: Option<&Robot>, path: &HashSet<Position>) -> String {
    let mut result = String::new();

    for y in 0..grid.height {
        for x in 0..grid.width {
            let pos = Position::new(x, y);
            let symbol = if let Some(obstacle) = grid.obstacle_at(x, y) {
                obstacle.direction().letter()
            } else if robot.map_or(false, |r| r.position() == pos) {
                'R'
            } else if path.contains(&pos) {
                '*'
            } else {
                '.'
            };
            result.push(symbol);
            result.push(' ');
        }
        result.push('\n');
    }

    result
}

/// "(x, y) -> (x, y) -> ..." listing of a path
pub fn format_path(path: &[Position]) -> String {
    path.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
