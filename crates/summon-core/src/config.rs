//! Summoning configuration
//!
//! Every constant the placer uses lives here. The defaults are the
//! standard game values; a JSON file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable summoning constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummonConfig {
    /// Placement attempts before giving up
    pub placement_trials: u32,
    /// Attempts made at each scatter radius before widening by one
    pub trials_per_radius: u32,
    /// Added to the averaged summoner/dungeon depth for a summon draw
    pub depth_bonus: i32,
    /// Added to the dungeon depth for a shapechange draw
    pub shape_depth_bonus: i32,
    /// Awareness given to a called monster when it is woken
    pub call_awareness: i32,
    /// Slack added to the speed difference before dividing into hold turns
    pub hold_speed_slack: i32,
    /// Speed points per turn of hold
    pub hold_turn_divisor: i32,
}

impl Default for SummonConfig {
    fn default() -> Self {
        Self {
            placement_trials: 60,
            trials_per_radius: 15,
            depth_bonus: 5,
            shape_depth_bonus: 5,
            call_awareness: 100,
            hold_speed_slack: 9,
            hold_turn_divisor: 10,
        }
    }
}

impl SummonConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SummonConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placement_trials == 0 {
            return Err(ConfigError::Invalid {
                field: "placement_trials",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.trials_per_radius == 0 {
            return Err(ConfigError::Invalid {
                field: "trials_per_radius",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.hold_turn_divisor <= 0 {
            return Err(ConfigError::Invalid {
                field: "hold_turn_divisor",
                reason: format!("must be positive, got {}", self.hold_turn_divisor),
            });
        }
        Ok(())
    }

    /// Scatter radius for a zero-based placement trial
    pub fn scatter_radius(&self, trial: u32) -> i32 {
        (trial / self.trials_per_radius.max(1)) as i32 + 1
    }

    /// Draw depth for a summon by a monster of level `summoner_level`
    pub fn summon_depth(&self, player_depth: i32, summoner_level: i32) -> i32 {
        (player_depth + summoner_level) / 2 + self.depth_bonus
    }

    /// Turns a freshly summoned monster must be held so the player acts first
    pub fn hold_turns(&self, race_speed: i32, player_speed: i32) -> i32 {
        (race_speed + self.hold_speed_slack - player_speed)
            .checked_div(self.hold_turn_divisor)
            .unwrap_or(0)
    }
}
