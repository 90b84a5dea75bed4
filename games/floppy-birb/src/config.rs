//! Tunables for the obstacle field and the player.
//! Defaults reproduce the shipped level; every struct loads from JSON.

use glam::Vec2;
use mango_engine::{GameConfig, Key};
use serde::{Deserialize, Serialize};

use crate::error::{BirbError, ConfigError};
use crate::obstacles::scale::exact_range;

/// Inclusive range the top obstacle's vertical scale is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl ScaleRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Horizontal extent of the play area. Pairs left of `left` are recycled;
/// new fields start at `right`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub left: f32,
    pub right: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of pairs in the pool. Constant for the run.
    pub count: usize,
    /// Distance every pair moves left per fixed step.
    pub speed: f32,
    pub boundaries: Boundaries,
    /// Horizontal spacing between consecutive pairs.
    pub step: f32,
    pub scale_range: ScaleRange,
    /// Distance of each obstacle's center from the horizontal midline (top at +H, bottom at -H).
    pub half_gap: f32,
    /// Top plus bottom scale if the obstacles closed the gap completely.
    pub combined_scale: f32,
    /// Scale left open between the two obstacles of a pair.
    pub gap_margin: f32,
    /// Horizontal scale of every obstacle.
    pub obstacle_width: f32,
    /// Seed for the scale draws. Restarts replay it.
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 15,
            speed: 0.02,
            boundaries: Boundaries { left: -10.0, right: 10.0 },
            step: 1.5,
            scale_range: ScaleRange::new(4.0, 6.0),
            half_gap: 5.0,
            combined_scale: 10.0,
            gap_margin: 1.0,
            obstacle_width: 0.2,
            seed: 0x5eed_b14d,
        }
    }
}

impl FieldConfig {
    /// Conserved top + bottom scale of every pair.
    pub fn gap_budget(&self) -> f32 {
        self.combined_scale - self.gap_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        let Boundaries { left, right } = self.boundaries;
        if !left.is_finite() || !right.is_finite() || left > right {
            return Err(ConfigError::InvalidBoundaries { left, right });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        let ScaleRange { min, max } = self.scale_range;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidScaleRange { min, max });
        }
        if !self.half_gap.is_finite() || self.half_gap <= 0.0 {
            return Err(ConfigError::InvalidHalfGap(self.half_gap));
        }
        if !self.obstacle_width.is_finite() || self.obstacle_width <= 0.0 {
            return Err(ConfigError::InvalidWidth(self.obstacle_width));
        }
        let budget = self.gap_budget();
        if !budget.is_finite() || budget - max <= 0.0 {
            return Err(ConfigError::GapBudgetTooSmall { budget, max });
        }
        if exact_range(self.scale_range, budget).is_none() {
            return Err(ConfigError::InexactScaleRange { min, max, budget });
        }
        if self.step < self.speed {
            log::warn!(
                "obstacle step {} is shorter than per-tick speed {}; pairs may overlap",
                self.step,
                self.speed
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Impulse applied once per jump press.
    pub jump_impulse: Vec2,
    /// Where the player starts and where it is put back after a crash.
    pub spawn: Vec2,
    pub scale: Vec2,
    pub mass: f32,
    pub friction: f32,
    pub jump_key: Key,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            jump_impulse: Vec2::new(0.0, 0.65),
            spawn: Vec2::ZERO,
            scale: Vec2::splat(0.25),
            mass: 0.1,
            friction: 0.3,
            jump_key: Key::Space,
        }
    }
}

/// Whole-game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BirbConfig {
    pub engine: GameConfig,
    pub field: FieldConfig,
    pub player: PlayerConfig,
}

impl BirbConfig {
    /// Parse a configuration from a JSON string. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, BirbError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.engine.fixed_dt.is_finite() || self.engine.fixed_dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep(self.engine.fixed_dt));
        }
        self.field.validate()
    }
}
