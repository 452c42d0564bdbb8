//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be re-tuned from a
//! JSON file without recompiling. Missing fields fall back to defaults.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Cannon ===
    /// Seconds for one half sweep (0 -> PI)
    pub cannon_sweep_secs: f32,
    /// Distance from the cannon pivot to the muzzle
    pub cannon_length: f32,

    // === Balls ===
    pub ball_radius: f32,
    pub shoot_speed: f32,
    /// A ball is removed once its bounce count exceeds this
    pub max_bounces: u32,
    /// Balls fired per shot while multi-mode is active
    pub multi_shot_count: u32,
    /// Delay between balls of a multi-mode burst
    pub multi_shot_interval: f32,

    // === Ammo ===
    pub max_ammo: u32,
    pub ammo_regen_secs: f32,

    // === Halos ===
    pub halo_radius: f32,
    pub halo_speed: f32,
    /// Lowest spawn heading, degrees
    pub halo_low_angle_deg: f32,
    /// Highest spawn heading, degrees
    pub halo_high_angle_deg: f32,
    pub halo_spawn_secs: f32,
    pub halo_spawn_rate_step: f32,
    pub halo_spawn_rate_max: f32,
    /// Halos on screen before a bomb may appear
    pub bomb_threshold: usize,
    /// One in N halos is a multiplier
    pub multiplier_odds: u32,

    // === Shields / life bar ===
    pub shield_count: usize,
    pub shield_y: f32,
    pub shield_first_x: f32,
    pub shield_spacing: f32,
    pub shield_half_width: f32,
    pub shield_half_height: f32,
    pub life_bar_y: f32,
    pub life_bar_half_height: f32,

    // === Power-ups ===
    pub power_up_radius: f32,
    pub power_up_speed: f32,
    pub shield_power_up_secs: f32,
    /// Score interval that triggers a multi-shot power-up
    pub multi_shot_score_step: u32,

    // === Trails ===
    pub trail_birth_rate: f32,
    pub trail_lifetime: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 320.0,
            field_height: 568.0,

            cannon_sweep_secs: 2.0,
            cannon_length: 40.0,

            ball_radius: 6.0,
            shoot_speed: 1000.0,
            max_bounces: 3,
            multi_shot_count: 5,
            multi_shot_interval: 0.1,

            max_ammo: 5,
            ammo_regen_secs: 1.0,

            halo_radius: 16.0,
            halo_speed: 100.0,
            halo_low_angle_deg: 200.0,
            halo_high_angle_deg: 340.0,
            halo_spawn_secs: 2.0,
            halo_spawn_rate_step: 0.01,
            halo_spawn_rate_max: 1.5,
            bomb_threshold: 4,
            multiplier_odds: 6,

            shield_count: 6,
            shield_y: 90.0,
            shield_first_x: 36.0,
            shield_spacing: 50.0,
            shield_half_width: 21.0,
            shield_half_height: 4.5,
            life_bar_y: 70.0,
            life_bar_half_height: 4.0,

            power_up_radius: 12.0,
            power_up_speed: 100.0,
            shield_power_up_secs: 15.0,
            multi_shot_score_step: 10,

            trail_birth_rate: 120.0,
            trail_lifetime: 0.3,
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read tuning file {}", path.display()))?;
        let tuning: Tuning = serde_json::from_str(&text)
            .with_context(|| format!("parse tuning file {}", path.display()))?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("cannon_sweep_secs", self.cannon_sweep_secs),
            ("ball_radius", self.ball_radius),
            ("shoot_speed", self.shoot_speed),
            ("halo_radius", self.halo_radius),
            ("halo_speed", self.halo_speed),
            ("halo_spawn_rate_max", self.halo_spawn_rate_max),
            ("power_up_radius", self.power_up_radius),
            ("power_up_speed", self.power_up_speed),
            ("trail_lifetime", self.trail_lifetime),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                bail!("tuning field `{name}` must be positive (got {value})");
            }
        }
        // Repeating timers shorter than one tick would fire many times per step
        let intervals = [
            ("ammo_regen_secs", self.ammo_regen_secs),
            ("halo_spawn_secs", self.halo_spawn_secs),
            ("shield_power_up_secs", self.shield_power_up_secs),
            ("multi_shot_interval", self.multi_shot_interval),
        ];
        for (name, value) in intervals {
            if !(value >= SIM_DT) {
                bail!("tuning field `{name}` must be at least one tick ({SIM_DT:.4}s, got {value})");
            }
        }
        if !(self.halo_spawn_rate_step >= 0.0) {
            bail!(
                "tuning field `halo_spawn_rate_step` must not be negative (got {})",
                self.halo_spawn_rate_step
            );
        }
        if self.max_ammo == 0 {
            bail!("tuning field `max_ammo` must be at least 1");
        }
        if self.multi_shot_count == 0 {
            bail!("tuning field `multi_shot_count` must be at least 1");
        }
        if self.multiplier_odds == 0 {
            bail!("tuning field `multiplier_odds` must be at least 1");
        }
        if self.multi_shot_score_step == 0 {
            bail!("tuning field `multi_shot_score_step` must be at least 1");
        }
        if self.halo_high_angle_deg < self.halo_low_angle_deg {
            bail!("tuning field `halo_high_angle_deg` is below `halo_low_angle_deg`");
        }
        Ok(())
    }

    /// X coordinate of shield slot `slot`
    pub fn shield_x(&self, slot: usize) -> f32 {
        self.shield_first_x + self.shield_spacing * slot as f32
    }
}
