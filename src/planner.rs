//! Greedy visitation planner.
//!
//! Drives the robot to a sensing coordinate of every obstacle on the grid.
//! Each outer pass walks the unvisited obstacles; for each one the nearest
//! in-range, safe sensing coordinate is chosen and the robot steps there
//! one cell at a time (diagonals count as one step). No obstacle avoidance
//! is done on the way and the resulting tour is not optimal.

use crate::geometry::{Cell, Position};
use crate::grid::Grid;
use crate::obstacle::{Obstacle, ObstacleId};
use crate::robot::Robot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, info, warn};

/// Sensing coordinates further than this from the robot are ignored
pub const DEFAULT_MAX_DISTANCE: f64 = 20.0;

/// Outer passes allowed before a run is cut off
pub const DEFAULT_MAX_PASSES: usize = 1000;

/// How the next obstacle is picked within a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Walk obstacles in grid order and head for each one that has a usable
    /// candidate, as soon as it is found
    #[default]
    LocalGreedy,
    /// Rank every unvisited obstacle by its best candidate and visit only the
    /// nearest one per pass
    GlobalPriority,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub max_distance: f64,
    pub strategy: Strategy,
    /// `None` lets an unreachable run go on until it stalls
    pub max_passes: Option<usize>,
    /// Discard sensing coordinates that fall outside the grid
    pub require_in_bounds: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            max_distance: DEFAULT_MAX_DISTANCE,
            strategy: Strategy::default(),
            max_passes: Some(DEFAULT_MAX_PASSES),
            require_in_bounds: false,
        }
    }
}

/// A sensing coordinate chosen for an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub target: Cell,
    pub distance: f64,
}

/// Progress notifications emitted while a run is in flight
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlanEvent {
    Targeted {
        obstacle: ObstacleId,
        target: Cell,
        distance: f64,
    },
    Moved {
        position: Position,
    },
    Visited {
        obstacle: ObstacleId,
        position: Position,
    },
    PassCompleted {
        pass: usize,
        visited_this_pass: usize,
    },
    Finished {
        outcome: PlanOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// Every obstacle was visited
    Complete,
    /// A whole pass went by without visiting anything; the listed obstacles
    /// have no candidate within range that passes the safety check
    Stalled { unvisited: Vec<ObstacleId> },
    /// `max_passes` ran out first
    PassLimit { unvisited: Vec<ObstacleId> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub obstacle: ObstacleId,
    pub target: Cell,
    pub steps: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub outcome: PlanOutcome,
    /// Visits in the order they happened
    pub visits: Vec<Visit>,
    pub passes: usize,
    /// Robot moves made during this run
    pub steps: usize,
}

impl PlanReport {
    pub fn is_complete(&self) -> bool {
        self.outcome == PlanOutcome::Complete
    }
}

/// True when the obstacle's cell lies outside the 3x3 block centred on the robot
pub fn is_safe(robot: Position, obstacle: &Obstacle) -> bool {
    for rx in robot.x - 1..=robot.x + 1 {
        for ry in robot.y - 1..=robot.y + 1 {
            if rx == obstacle.x() && ry == obstacle.y() {
                return false;
            }
        }
    }
    true
}

/// Nearest usable sensing coordinate of `obstacle` as seen from `robot`.
///
/// Candidates are scanned in `visible_coordinates` order and only a strictly
/// shorter distance replaces the current best, so ties keep the earlier one.
pub fn best_candidate(
    grid: &Grid,
    obstacle: &Obstacle,
    robot: Position,
    config: &PlannerConfig,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for cell in obstacle.visible_coordinates() {
        if config.require_in_bounds && !grid.contains(cell.position()) {
            continue;
        }

        let distance = robot.distance(&cell.position());
        let closer = best.map_or(true, |b| distance < b.distance);
        if distance <= config.max_distance && closer && is_safe(robot, obstacle) {
            best = Some(Candidate {
                target: cell,
                distance,
            });
        }
    }

    best
}

/// Entry in the global-priority queue
#[derive(Debug)]
struct Ranked {
    index: usize,
    candidate: Candidate,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .candidate
            .distance
            .partial_cmp(&self.candidate.distance)
            .unwrap_or(Ordering::Equal)
            // Tie-breaker: earlier obstacles in grid order win
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Per-run bookkeeping; dropped when the run ends
struct RunState {
    visited: Vec<bool>,
    visited_count: usize,
    visits: Vec<Visit>,
}

impl RunState {
    fn new(obstacle_count: usize) -> Self {
        RunState {
            visited: vec![false; obstacle_count],
            visited_count: 0,
            visits: Vec::new(),
        }
    }

    fn mark(&mut self, index: usize, visit: Visit) {
        debug_assert!(!self.visited[index], "obstacle visited twice");
        self.visited[index] = true;
        self.visited_count += 1;
        self.visits.push(visit);
    }

    fn unvisited(&self, obstacles: &[Obstacle]) -> Vec<ObstacleId> {
        obstacles
            .iter()
            .zip(&self.visited)
            .filter(|(_, &seen)| !seen)
            .map(|(o, _)| o.id())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisitPlanner {
    config: PlannerConfig,
}

impl VisitPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        VisitPlanner { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Visit every obstacle on the grid, moving `robot` along the way
    pub fn run(&self, grid: &Grid, robot: &mut Robot) -> PlanReport {
        self.run_with(grid, robot, |_| {})
    }

    /// Same as `run`, reporting progress through `on_event`
    pub fn run_with<F>(&self, grid: &Grid, robot: &mut Robot, mut on_event: F) -> PlanReport
    where
        F: FnMut(&PlanEvent),
    {
        let obstacles = grid.obstacles();
        let mut state = RunState::new(obstacles.len());
        let steps_before = robot.steps();
        let mut passes = 0;

        info!(
            "planning visits to {} obstacles from {} ({:?})",
            obstacles.len(),
            robot.position(),
            self.config.strategy
        );

        let outcome = loop {
            if state.visited_count == obstacles.len() {
                break PlanOutcome::Complete;
            }
            if let Some(limit) = self.config.max_passes {
                if passes >= limit {
                    let unvisited = state.unvisited(obstacles);
                    warn!("pass limit {} reached with {} obstacles unvisited", limit, unvisited.len());
                    break PlanOutcome::PassLimit { unvisited };
                }
            }

            passes += 1;
            let before = state.visited_count;
            match self.config.strategy {
                Strategy::LocalGreedy => {
                    self.local_greedy_pass(grid, robot, &mut state, &mut on_event)
                }
                Strategy::GlobalPriority => {
                    self.global_priority_pass(grid, robot, &mut state, &mut on_event)
                }
            }
            let visited_this_pass = state.visited_count - before;
            debug!("pass {} visited {} obstacles", passes, visited_this_pass);
            on_event(&PlanEvent::PassCompleted {
                pass: passes,
                visited_this_pass,
            });

            if visited_this_pass == 0 {
                let unvisited = state.unvisited(obstacles);
                warn!("no reachable target for obstacles {:?}", unvisited);
                break PlanOutcome::Stalled { unvisited };
            }
        };

        if outcome == PlanOutcome::Complete {
            info!("all obstacles visited");
        }
        on_event(&PlanEvent::Finished {
            outcome: outcome.clone(),
        });

        PlanReport {
            outcome,
            visits: state.visits,
            passes,
            steps: robot.steps() - steps_before,
        }
    }

    fn local_greedy_pass<F>(&self, grid: &Grid, robot: &mut Robot, state: &mut RunState, on_event: &mut F)
    where
        F: FnMut(&PlanEvent),
    {
        for (index, obstacle) in grid.obstacles().iter().enumerate() {
            if state.visited[index] {
                continue;
            }
            // Evaluated from wherever the previous visit in this pass left the robot
            if let Some(candidate) = best_candidate(grid, obstacle, robot.position(), &self.config) {
                self.visit(index, obstacle, candidate, robot, state, on_event);
            }
        }
    }

    fn global_priority_pass<F>(&self, grid: &Grid, robot: &mut Robot, state: &mut RunState, on_event: &mut F)
    where
        F: FnMut(&PlanEvent),
    {
        let obstacles = grid.obstacles();
        let origin = robot.position();

        let mut queue: BinaryHeap<Ranked> = obstacles
            .iter()
            .enumerate()
            .filter(|(index, _)| !state.visited[*index])
            .filter_map(|(index, obstacle)| {
                best_candidate(grid, obstacle, origin, &self.config)
                    .map(|candidate| Ranked { index, candidate })
            })
            .collect();

        if let Some(Ranked { index, candidate }) = queue.pop() {
            self.visit(index, &obstacles[index], candidate, robot, state, on_event);
        }
    }

    fn visit<F>(
        &self,
        index: usize,
        obstacle: &Obstacle,
        candidate: Candidate,
        robot: &mut Robot,
        state: &mut RunState,
        on_event: &mut F,
    ) where
        F: FnMut(&PlanEvent),
    {
        info!(
            "obstacle {} -> target ({}, {}) at distance {:.2}",
            obstacle.id(),
            candidate.target.x,
            candidate.target.y,
            candidate.distance
        );
        on_event(&PlanEvent::Targeted {
            obstacle: obstacle.id(),
            target: candidate.target,
            distance: candidate.distance,
        });

        let target = candidate.target.position();
        let mut steps = 0;
        while robot.step_toward(target) {
            steps += 1;
            debug!("moved to {}", robot.position());
            on_event(&PlanEvent::Moved {
                position: robot.position(),
            });
        }

        info!("visited obstacle {} at {} after {} steps", obstacle.id(), target, steps);
        on_event(&PlanEvent::Visited {
            obstacle: obstacle.id(),
            position: target,
        });
        state.mark(
            index,
            Visit {
                obstacle: obstacle.id(),
                target: candidate.target,
                steps,
            },
        );
    }
}
