//! Fixed timestep simulation tick
//!
//! Core game loop that advances the scene deterministically.

use super::body::ContactHandler;
use super::physics;
use super::scene::Scene;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the cannon (tap on the play field)
    pub shoot: bool,
    /// Pause toggle
    pub pause: bool,
    /// Menu play button
    pub play: bool,
    /// Menu music button
    pub toggle_music: bool,
    /// Idle/demo mode - AI fires when a halo is lined up
    pub idle_mode: bool,
}

/// Advance the scene by one fixed timestep
pub fn tick(scene: &mut Scene, input: &TickInput, dt: f32) {
    if input.pause {
        scene.toggle_pause();
    }
    if input.toggle_music {
        scene.toggle_music();
    }
    if input.play {
        scene.press_play();
    }

    scene.menu.update(dt);

    // Nothing gameplay-affecting moves while paused
    if scene.game_paused {
        return;
    }

    scene.time_ticks += 1;
    scene.cannon.advance(dt);

    if !scene.game_over && (input.shoot || (input.idle_mode && halo_lined_up(scene))) {
        scene.did_shoot = true;
    }

    scene.run_timers(dt);

    for contact in physics::step(scene, dt) {
        scene.did_begin_contact(contact);
    }

    scene.did_simulate_physics(dt);

    // Ensure deterministic ordering
    scene.normalize_order();
}

/// True when a ball fired now would meet some halo
///
/// Leads each halo by the ball's travel time and checks the angle between
/// the barrel and the predicted position against the halo's apparent size.
pub fn halo_lined_up(scene: &Scene) -> bool {
    if scene.ammo == 0 {
        return false;
    }
    let muzzle = scene.cannon.muzzle();
    let aim = scene.cannon.direction();
    let speed = scene.tuning.shoot_speed;

    scene.halos.iter().any(|halo| {
        if halo.pos.y > scene.tuning.field_height {
            return false;
        }
        let travel = (halo.pos - muzzle).length() / speed;
        let predicted = halo.pos + halo.vel * travel;
        let to_target = predicted - muzzle;
        let dist = to_target.length();
        if dist < 1e-3 {
            return true;
        }
        let tolerance = (halo.radius / dist).atan();
        aim.angle_to(to_target).abs() <= tolerance
    })
}
