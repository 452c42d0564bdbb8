//! The sweeping cannon

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::radians_to_vector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    pub pos: Vec2,
    /// Current aim (radians, 0 = right, PI = left)
    pub angle: f32,
    /// Seconds into the current sweep cycle
    pub clock: f32,
    pub sweep_secs: f32,
    pub length: f32,
}

impl Cannon {
    pub fn new(pos: Vec2, sweep_secs: f32, length: f32) -> Self {
        Self {
            pos,
            angle: 0.0,
            clock: 0.0,
            sweep_secs,
            length,
        }
    }

    /// Advance the back-and-forth sweep (triangle wave over 0..PI)
    pub fn advance(&mut self, dt: f32) {
        let period = self.sweep_secs * 2.0;
        self.clock = (self.clock + dt) % period;
        let t = self.clock / self.sweep_secs;
        let phase = if t <= 1.0 { t } else { 2.0 - t };
        self.angle = phase * PI;
    }

    pub fn direction(&self) -> Vec2 {
        radians_to_vector(self.angle)
    }

    /// Where balls leave the barrel
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.direction() * self.length
    }
}
