//! Combat configuration with documented constants
//!
//! All rule numbers the resolution engine consults are collected here so a
//! scenario can tune them from TOML without touching code.

use serde::{Deserialize, Serialize};

use crate::core::error::{CombatError, Result};

/// Configuration for hit resolution and piloting checks
///
/// Defaults follow the standard tabletop rules. Changing them alters how
/// quickly units lose components and how hard they are to keep upright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === PILOTING ===
    /// Base target number for a piloting skill roll
    pub piloting_base_target: i32,

    /// Added to the stand check when the unit has no arm actuators at all
    ///
    /// Applies to armless configurations and to units whose two arm
    /// locations are both destroyed. Replaces the per-arm penalty.
    pub no_arms_stand_penalty: i32,

    /// Added to the stand check for each destroyed arm location
    pub arm_destroyed_stand_penalty: i32,

    /// Added to the stand check for each destroyed leg location
    pub leg_destroyed_stand_penalty: i32,

    /// Added to any piloting roll for each destroyed gyro slot
    pub gyro_hit_penalty: i32,

    // === AIMED SHOTS ===
    /// Lowest 2d6 roll that lands an aimed shot on the chosen location
    pub aimed_shot_min_roll: u8,

    /// Highest 2d6 roll that lands an aimed shot on the chosen location
    pub aimed_shot_max_roll: u8,

    // === CRITICAL HITS ===
    /// 2d6 roll at or above which one critical slot is hit
    pub critical_roll_single: u8,

    /// 2d6 roll at or above which two critical slots are hit
    pub critical_roll_double: u8,

    /// 2d6 roll at or above which three slots are hit (or a limb is lost)
    pub critical_roll_triple: u8,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            piloting_base_target: 5,
            no_arms_stand_penalty: 4,
            arm_destroyed_stand_penalty: 2,
            leg_destroyed_stand_penalty: 5,
            gyro_hit_penalty: 3,

            aimed_shot_min_roll: 6,
            aimed_shot_max_roll: 8,

            // 8-9 one, 10-11 two, 12 three
            critical_roll_single: 8,
            critical_roll_double: 10,
            critical_roll_triple: 12,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, filling missing keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(2..=12).contains(&self.aimed_shot_min_roll)
            || !(2..=12).contains(&self.aimed_shot_max_roll)
            || self.aimed_shot_min_roll > self.aimed_shot_max_roll
        {
            return Err(CombatError::InvalidConfig(format!(
                "aimed shot window {}..={} must be an ordered range within 2..=12",
                self.aimed_shot_min_roll, self.aimed_shot_max_roll
            )));
        }

        if !(self.critical_roll_single < self.critical_roll_double
            && self.critical_roll_double <= self.critical_roll_triple)
        {
            return Err(CombatError::InvalidConfig(format!(
                "critical thresholds must ascend: {} < {} <= {}",
                self.critical_roll_single, self.critical_roll_double, self.critical_roll_triple
            )));
        }

        if self.no_arms_stand_penalty < 0
            || self.arm_destroyed_stand_penalty < 0
            || self.leg_destroyed_stand_penalty < 0
            || self.gyro_hit_penalty < 0
        {
            return Err(CombatError::InvalidConfig(
                "stand penalties must not be negative".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<CombatConfig> = OnceLock::new();

/// Get the global combat config (initializes with defaults if not set)
pub fn config() -> &'static CombatConfig {
    CONFIG.get_or_init(CombatConfig::default)
}

/// Set the global combat config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: CombatConfig) -> std::result::Result<(), CombatConfig> {
    CONFIG.set(config)
}
