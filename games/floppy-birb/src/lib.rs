//! Floppy Birb: a side-scrolling obstacle run built on `mango-engine`.
//!
//! A fixed pool of obstacle pairs scrolls left and is recycled past the
//! right end of the line; touching any obstacle restarts the course.

pub mod config;
pub mod error;
pub mod game;
pub mod obstacles;
pub mod player;

pub use config::{BirbConfig, Boundaries, FieldConfig, PlayerConfig, ScaleRange};
pub use error::{BirbError, ConfigError};
pub use game::{BirbEntity, FloppyBirb, OBSTACLES_CONTROLLER, PLAYER};
pub use obstacles::controller::{ObstaclesController, PairEntities};
pub use obstacles::field::ObstacleField;
pub use obstacles::pair::{ObstacleHandle, ObstaclePair};
pub use obstacles::scale::{ScaleRandomizer, ScaleSplit};
pub use player::{JumpState, Player};
