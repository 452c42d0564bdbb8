//! Particle trail emitter that follows a ball
//!
//! Particles are emitted at the emitter position and stay where they were
//! born (world space), so a moving emitter leaves a streak behind it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single trail particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailParticle {
    pub pos: Vec2,
    /// Seconds since birth
    pub age: f32,
}

/// Hard cap on live particles per emitter
pub const MAX_TRAIL_PARTICLES: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    pub position: Vec2,
    /// Particles per second (0 = stopped)
    pub birth_rate: f32,
    /// Seconds each particle lives
    pub lifetime: f32,
    pub particles: Vec<TrailParticle>,
    /// Fractional particle carried to the next advance
    #[serde(skip)]
    pending: f32,
}

impl Trail {
    pub fn new(position: Vec2, birth_rate: f32, lifetime: f32) -> Self {
        Self {
            position,
            birth_rate,
            lifetime,
            particles: Vec::new(),
            pending: 0.0,
        }
    }

    /// Stop emitting; live particles keep aging out
    pub fn stop(&mut self) {
        self.birth_rate = 0.0;
        self.pending = 0.0;
    }

    pub fn is_emitting(&self) -> bool {
        self.birth_rate > 0.0
    }

    /// Stopped and every particle expired
    pub fn is_finished(&self) -> bool {
        !self.is_emitting() && self.particles.is_empty()
    }

    /// Age particles and emit new ones at the current position
    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.age += dt;
        }
        let lifetime = self.lifetime;
        self.particles.retain(|p| p.age < lifetime);

        if self.is_emitting() {
            self.pending += self.birth_rate * dt;
            while self.pending >= 1.0 {
                self.pending -= 1.0;
                if self.particles.len() >= MAX_TRAIL_PARTICLES {
                    self.particles.remove(0);
                }
                self.particles.push(TrailParticle {
                    pos: self.position,
                    age: 0.0,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_at_birth_rate() {
        let mut trail = Trail::new(Vec2::ZERO, 60.0, 1.0);
        for _ in 0..10 {
            trail.advance(1.0 / 60.0);
        }
        // Float accumulation may drop the last fractional particle
        assert!((9..=10).contains(&trail.particles.len()));
    }

    #[test]
    fn test_stopped_trail_fades_out() {
        let mut trail = Trail::new(Vec2::ZERO, 60.0, 0.2);
        trail.advance(0.1);
        assert!(!trail.particles.is_empty());
        trail.stop();
        trail.advance(0.25);
        assert!(trail.is_finished());
    }

    #[test]
    fn test_particle_cap() {
        let mut trail = Trail::new(Vec2::ZERO, 10_000.0, 10.0);
        trail.advance(1.0);
        assert_eq!(trail.particles.len(), MAX_TRAIL_PARTICLES);
    }
}
