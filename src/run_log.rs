use crate::error::GridError;
use crate::planner::{PlanEvent, PlanOutcome};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Planner event with timestamp
#[derive(Clone, Debug, Serialize)]
pub struct LoggedEvent {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub event: PlanEvent,
}

/// Records planner events as they happen, for replay or inspection after a run
pub struct RunLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl RunLog {
    pub fn new() -> Self {
        RunLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: &PlanEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event: event.clone(),
        });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Outcome recorded by the last `Finished` event, if the run got that far
    pub fn outcome(&self) -> Option<&PlanOutcome> {
        self.events.iter().rev().find_map(|logged| match &logged.event {
            PlanEvent::Finished { outcome } => Some(outcome),
            _ => None,
        })
    }

    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut visits = 0;
        let mut passes = 0;

        for logged in &self.events {
            match logged.event {
                PlanEvent::Moved { .. } => moves += 1,
                PlanEvent::Visited { .. } => visits += 1,
                PlanEvent::PassCompleted { .. } => passes += 1,
                _ => {}
            }
        }

        let outcome = match self.outcome() {
            Some(PlanOutcome::Complete) => "complete".to_string(),
            Some(PlanOutcome::Stalled { unvisited }) => format!("stalled ({} unvisited)", unvisited.len()),
            Some(PlanOutcome::PassLimit { unvisited }) => {
                format!("pass limit ({} unvisited)", unvisited.len())
            }
            None => "unfinished".to_string(),
        };

        let duration = self.events.last().map_or(0, |e| e.timestamp_ms);

        format!(
            "Run Duration: {}ms\n\
             Total Events: {}\n\
             Passes: {}, Visits: {}, Moves: {}\n\
             Outcome: {}",
            duration,
            self.events.len(),
            passes,
            visits,
            moves,
            outcome
        )
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}
