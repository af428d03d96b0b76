use crate::error::GridError;
use crate::planner::{PlannerConfig, Strategy, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_PASSES};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub robot: RobotSettings,
    #[serde(default)]
    pub planner: PlannerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct GridSettings {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_footprint")]
    pub footprint: i32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RobotSettings {
    #[serde(default = "default_start_x")]
    pub start_x: i32,
    #[serde(default = "default_start_y")]
    pub start_y: i32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PlannerSettings {
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
    #[serde(default)]
    pub strategy: Strategy,
    /// 0 disables the cap
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    #[serde(default)]
    pub require_in_bounds: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub enable_run_log: bool,
    #[serde(default = "default_run_log_path")]
    pub run_log_path: String,
}

// Default values
fn default_width() -> i32 { 20 }
fn default_height() -> i32 { 20 }
fn default_footprint() -> i32 { crate::grid::ROBOT_FOOTPRINT }
fn default_start_x() -> i32 { 1 }
fn default_start_y() -> i32 { 18 }
fn default_max_distance() -> f64 { DEFAULT_MAX_DISTANCE }
fn default_max_passes() -> usize { DEFAULT_MAX_PASSES }
fn default_filter() -> String { "gridvisit=info".to_string() }
fn default_run_log_path() -> String { "run_log.json".to_string() }

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            footprint: default_footprint(),
        }
    }
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            start_x: default_start_x(),
            start_y: default_start_y(),
        }
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_distance: default_max_distance(),
            strategy: Strategy::default(),
            max_passes: default_max_passes(),
            require_in_bounds: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_run_log: false,
            run_log_path: default_run_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            robot: RobotSettings::default(),
            planner: PlannerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl PlannerSettings {
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            max_distance: self.max_distance,
            strategy: self.strategy,
            max_passes: (self.max_passes > 0).then_some(self.max_passes),
            require_in_bounds: self.require_in_bounds,
        }
    }
}

impl Config {
    /// Result of `load_from(CONFIG_FILE)`, falling back to defaults when the
    /// file is missing or broken
    pub fn resolve(loaded: Result<Self, GridError>) -> Self {
        match loaded {
            Ok(config) => {
                info!("loaded configuration from {}", CONFIG_FILE);
                config
            }
            Err(GridError::Io(_)) => {
                info!("no {} found, using default configuration", CONFIG_FILE);
                Config::default()
            }
            Err(e) => {
                warn!("failed to parse {}: {}", CONFIG_FILE, e);
                warn!("using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GridError> {
        Ok(toml::from_str(contents)?)
    }
}
