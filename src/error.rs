use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("invalid direction {0:?}, use 'N', 'S', 'E' or 'W'")]
    InvalidDirection(String),
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("robot footprint must be positive, got {0}")]
    InvalidFootprint(i32),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),
}
