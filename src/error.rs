//! Error types surfaced at the core's boundary

use std::fmt;

use crate::sim::GamePhase;

/// Invalid arena or grid configuration. Fatal at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rows or columns of the brick grid are zero
    InvalidGrid { rows: u32, columns: u32 },
    /// A dimension that must be positive and finite is not
    InvalidDimension { field: &'static str, value: f32 },
    /// Geometry is internally inconsistent (e.g. paddle wider than arena)
    Inconsistent(String),
    /// Config document could not be parsed
    Parse(String),
    /// A resumed match state does not fit the config it is resumed under
    StateMismatch(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGrid { rows, columns } => {
                write!(f, "Invalid brick grid: {} rows x {} columns", rows, columns)
            }
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "Invalid dimension: {} = {}", field, value)
            }
            ConfigError::Inconsistent(msg) => write!(f, "Inconsistent geometry: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::StateMismatch(msg) => write!(f, "State does not match config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

/// Rejected lifecycle command. Recoverable; the match state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `start` was issued without a non-blank player name
    EmptyPlayerName,
    /// The command is not accepted in the current phase
    InvalidPhase {
        command: &'static str,
        phase: GamePhase,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPlayerName => write!(f, "Please enter your name"),
            ValidationError::InvalidPhase { command, phase } => {
                write!(f, "Cannot {} while {:?}", command, phase)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
