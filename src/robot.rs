use crate::geometry::Position;

/// Point robot moving over the grid in unit steps
///
/// The path starts with the initial position and gains one entry per move.
#[derive(Clone, Debug)]
pub struct Robot {
    pub x: i32,
    pub y: i32,
    path: Vec<Position>,
}

impl Robot {
    pub fn new(x: i32, y: i32) -> Self {
        Robot {
            x,
            y,
            path: vec![Position::new(x, y)],
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Move by the given offset and record the new position
    pub fn move_by(&mut self, delta_x: i32, delta_y: i32) {
        self.x += delta_x;
        self.y += delta_y;
        self.path.push(self.position());
    }

    /// Take one step towards the target, at most one cell on each axis.
    /// Returns false (and does not move) when already there.
    pub fn step_toward(&mut self, target: Position) -> bool {
        let delta_x = target.x.cmp(&self.x) as i32;
        let delta_y = target.y.cmp(&self.y) as i32;
        if delta_x == 0 && delta_y == 0 {
            return false;
        }
        self.move_by(delta_x, delta_y);
        true
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of moves made so far
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }
}
