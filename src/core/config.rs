//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::Deserialize;

use crate::core::error::{GameError, Result};

/// Configuration for the simulation systems
///
/// These values have been tuned against the standard theater map.
/// Changing them will affect pacing and balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === RECRUITMENT ===
    /// Gold cost to recruit a land unit (Legion or Sacred Band)
    pub land_gold_cost: u64,

    /// Local manpower drawn from a node when recruiting a land unit
    pub land_manpower_cost: u32,

    /// Gold cost to recruit a fleet
    ///
    /// Fleets are pricier than land units; they can only be laid down at
    /// ports and are the sole way across open sea.
    pub fleet_gold_cost: u64,

    /// Local manpower drawn from a node when crewing a fleet
    pub fleet_manpower_cost: u32,

    /// Strength every unit starts at and can never exceed
    pub unit_max_strength: f32,

    /// Training progress gained per tick (progress scale is 0-100)
    ///
    /// At 5.0, a freshly recruited unit is combat-ready after 20 ticks.
    pub training_rate: f32,

    // === MOVEMENT ===
    /// Movement progress gained per tick toward the next hop (scale 0-100)
    ///
    /// At 4.0, one hop takes 25 ticks. Movement and training share the
    /// 0-100 progress convention so the tick engine treats them uniformly.
    pub movement_rate: f32,

    // === COMBAT ===
    /// Strength the winner loses, divided by the winner's effective modifier
    pub winner_attrition: f32,

    /// Strength floor after a won battle; winners are never destroyed outright
    pub defeat_floor: f32,

    /// Strength multiplier for a fleet fighting inside a sea zone
    pub naval_multiplier: f32,

    /// Additive strength bonus per fortification level when the node's
    /// owner defends it (stacks additively with the naval multiplier)
    pub fortification_bonus: f32,

    // === FORTIFICATION ===
    /// Gold cost of raising a node's fortification by one level
    pub fortify_cost: u64,

    /// Highest fortification level a node can reach
    pub max_fortification: u8,

    // === CALENDAR ===
    /// Day-of-year on which winter begins
    pub winter_start_doy: u32,

    /// Length of winter in days; the window wraps across the year boundary
    ///
    /// At 330 + 75, winter covers days 330..365 and 0..40 of each year.
    pub winter_duration: u32,

    /// Day-of-year on which annual node income is collected
    pub autumn_doy: u32,

    /// Gold each faction earns per owned sea zone per day (trade routes)
    pub sea_trade_gold: u64,

    // === OPPONENT POLICY ===
    /// Days between AI decision rounds
    pub ai_interval_days: u64,

    /// Probability the AI recruits a fleet rather than a land unit at a port
    pub ai_fleet_chance: f32,

    /// Probability the AI sits still even after picking a move target
    pub ai_friction: f32,

    /// The AI stops recruiting at a node once this many units sit there
    pub ai_max_units_per_node: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Recruitment
            land_gold_cost: 80,
            land_manpower_cost: 400,
            fleet_gold_cost: 120,
            fleet_manpower_cost: 300,
            unit_max_strength: 100.0,
            training_rate: 5.0,

            // Movement
            movement_rate: 4.0,

            // Combat
            winner_attrition: 20.0,
            defeat_floor: 10.0,
            naval_multiplier: 1.5,
            fortification_bonus: 0.5,

            // Fortification
            fortify_cost: 150,
            max_fortification: 3,

            // Calendar
            winter_start_doy: 330,
            winter_duration: 75,
            autumn_doy: 270,
            sea_trade_gold: 2,

            // Opponent policy
            ai_interval_days: 20,
            ai_fleet_chance: 0.3,
            ai_friction: 0.4,
            ai_max_units_per_node: 2,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config override from a TOML file
    ///
    /// Missing fields keep their defaults.
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config override from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig =
            toml::from_str(content).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.training_rate <= 0.0 || self.movement_rate <= 0.0 {
            return Err(GameError::Config(
                "training and movement rates must be positive".into(),
            ));
        }

        if self.winter_duration == 0 || self.winter_duration >= 365 {
            return Err(GameError::Config(format!(
                "winter_duration ({}) must be in 1..365",
                self.winter_duration
            )));
        }

        if self.winter_start_doy >= 365 || self.autumn_doy >= 365 {
            return Err(GameError::Config(
                "calendar days must be < 365".into(),
            ));
        }

        if self.defeat_floor > self.unit_max_strength {
            return Err(GameError::Config(format!(
                "defeat_floor ({}) exceeds unit_max_strength ({})",
                self.defeat_floor, self.unit_max_strength
            )));
        }

        if !(0.0..=1.0).contains(&self.ai_fleet_chance) || !(0.0..=1.0).contains(&self.ai_friction)
        {
            return Err(GameError::Config(
                "AI probabilities must be within [0, 1]".into(),
            ));
        }

        if self.ai_interval_days == 0 {
            return Err(GameError::Config("ai_interval_days must be positive".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = SimulationConfig::parse_toml("land_gold_cost = 200\n").unwrap();
        assert_eq!(config.land_gold_cost, 200);
        // Untouched fields keep defaults
        assert_eq!(config.fortify_cost, 150);
    }

    #[test]
    fn test_invalid_winter_duration_rejected() {
        let result = SimulationConfig::parse_toml("winter_duration = 400\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let result = SimulationConfig::parse_toml("ai_friction = 1.5\n");
        assert!(result.is_err());
    }
}
