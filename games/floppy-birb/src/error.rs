//! Error types for field setup and the game as a whole.

use mango_engine::EngineError;
use thiserror::Error;

/// A configuration value that makes the obstacle field impossible to build.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("obstacle count must be positive")]
    EmptyField,

    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    #[error("left boundary {left} is right of right boundary {right}")]
    InvalidBoundaries { left: f32, right: f32 },

    #[error("step must be positive, got {0}")]
    InvalidStep(f32),

    #[error("scale range [{min}, {max}] is empty or negative")]
    InvalidScaleRange { min: f32, max: f32 },

    #[error("half gap must be positive, got {0}")]
    InvalidHalfGap(f32),

    #[error("obstacle width must be positive, got {0}")]
    InvalidWidth(f32),

    /// The bottom obstacle would get a non-positive scale for the largest top draw.
    #[error("gap budget {budget} leaves no room below a top scale of {max}")]
    GapBudgetTooSmall { budget: f32, max: f32 },

    /// No top scale in the range can be taken from the budget without rounding.
    #[error("scale range [{min}, {max}] has no value that splits budget {budget} exactly")]
    InexactScaleRange { min: f32, max: f32, budget: f32 },

    #[error("fixed timestep must be positive, got {0}")]
    InvalidTimestep(f32),
}

/// Anything that can stop the game from being built or stepped.
#[derive(Error, Debug)]
pub enum BirbError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("malformed configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}
