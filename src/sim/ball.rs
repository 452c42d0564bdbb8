//! Cannon balls

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::trail::Trail;

/// A ball fired from the cannon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Wall bounces so far
    pub bounces: u32,
    pub trail: Trail,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, trail: Trail) -> Self {
        let mut ball = Self {
            id,
            pos,
            vel,
            radius,
            bounces: 0,
            trail,
        };
        ball.update_trail();
        ball
    }

    /// Move the trail emitter onto the ball (call once per frame after physics)
    pub fn update_trail(&mut self) {
        self.trail.position = self.pos;
    }

    /// Take the trail out of the ball so it can fade after the ball is gone
    pub fn detach_trail(self) -> Trail {
        let mut trail = self.trail;
        trail.stop();
        trail
    }
}
