//! Halos (targets), shields, life bar and power-ups

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Halo variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HaloKind {
    #[default]
    Normal,
    /// Raises the point value when shot
    Multiplier,
    /// Takes every other halo with it when shot, every shield when it lands
    Bomb,
}

/// A falling target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Halo {
    pub id: u32,
    pub kind: HaloKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// One shield block guarding the life bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: u32,
    /// Slot index along the bottom of the field
    pub slot: usize,
    pub pos: Vec2,
    pub half_size: Vec2,
}

/// The bar that ends the game when a halo reaches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeBar {
    pub y: f32,
    pub half_height: f32,
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores one destroyed shield
    Shield,
    /// Enables multi-mode
    MultiShot,
}

/// A power-up drifting across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}
