//! Space Cannon - A ball cannon arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (cannon, balls, halos, contacts, scene)
//! - `runner`: Fixed timestep game loop driver
//! - `persistence`: JSON storage for scores and settings
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue mixing from scene events
//! - `ui`: HUD text derived from the scene

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the driver will account for
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Unit vector pointing along `angle` (radians, 0 = +x, counter-clockwise)
#[inline]
pub fn radians_to_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Uniform float in `[low, high)`, tolerating an empty range
#[inline]
pub fn random_in_range<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high <= low {
        return low;
    }
    rng.random_range(low..high)
}
