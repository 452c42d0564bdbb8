//! The game scene: owns every entity and reacts to contacts
//!
//! The scene is an explicit context object. Nothing here reads global state;
//! the driver passes it to `tick` each step and drains its events afterwards.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::body::{Body, Contact, ContactHandler};
use super::cannon::Cannon;
use super::collision::in_frame;
use super::events::GameEvent;
use super::halo::{Halo, HaloKind, LifeBar, PowerUp, PowerUpKind, Shield};
use super::menu::Menu;
use super::trail::Trail;
use crate::tuning::Tuning;
use crate::{radians_to_vector, random_in_range};

/// Countdown state for the scene's repeating actions
#[derive(Debug, Clone, Default)]
pub struct Timers {
    /// Seconds accumulated toward the next ammo refill
    pub ammo_regen: f32,
    /// Progress toward the next halo spawn (scaled by spawn rate)
    pub halo_spawn: f32,
    /// Halo spawn speed-up factor
    pub halo_spawn_rate: f32,
    /// Seconds accumulated toward the next shield power-up
    pub shield_power_up: f32,
    /// Balls still to fire in the current multi-mode burst
    pub burst_remaining: u32,
    /// Seconds until the next burst ball
    pub burst_timer: f32,
}

impl Timers {
    fn fresh() -> Self {
        Self {
            halo_spawn_rate: 1.0,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub ammo: u32,
    pub score: u32,
    /// Points awarded per halo hit
    pub point_value: u32,
    pub multi_mode: bool,
    pub game_paused: bool,
    pub game_over: bool,
    pub cannon: Cannon,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    /// Trails of removed balls, fading out
    pub fading_trails: Vec<Trail>,
    pub halos: Vec<Halo>,
    pub shields: Vec<Shield>,
    /// Destroyed shields waiting to be restored by a power-up
    pub shield_pool: Vec<Shield>,
    pub life_bar: Option<LifeBar>,
    pub power_ups: Vec<PowerUp>,
    pub menu: Menu,
    pub timers: Timers,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// A shot requested this step, fired after physics
    pub did_shoot: bool,
    /// New balls emit trails
    pub trails: bool,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Scene {
    /// Create a scene sitting in the menu, waiting for the first game
    pub fn new(seed: u64, tuning: Tuning, top_score: u32, play_music: bool) -> Self {
        let cannon = Cannon::new(
            Vec2::new(tuning.field_width * 0.5, 0.0),
            tuning.cannon_sweep_secs,
            tuning.cannon_length,
        );
        let mut scene = Self {
            ammo: tuning.max_ammo,
            seed,
            score: 0,
            point_value: 1,
            multi_mode: false,
            game_paused: false,
            game_over: true,
            cannon,
            balls: Vec::new(),
            fading_trails: Vec::new(),
            halos: Vec::new(),
            shields: Vec::new(),
            shield_pool: Vec::new(),
            life_bar: None,
            power_ups: Vec::new(),
            menu: Menu::new(top_score, play_music),
            timers: Timers::fresh(),
            time_ticks: 0,
            did_shoot: false,
            trails: true,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        scene.build_defenses();
        scene
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Place a full row of shields and a fresh life bar
    fn build_defenses(&mut self) {
        self.shields.clear();
        self.shield_pool.clear();
        for slot in 0..self.tuning.shield_count {
            let id = self.next_entity_id();
            self.shields.push(Shield {
                id,
                slot,
                pos: Vec2::new(self.tuning.shield_x(slot), self.tuning.shield_y),
                half_size: Vec2::new(self.tuning.shield_half_width, self.tuning.shield_half_height),
            });
        }
        self.life_bar = Some(LifeBar {
            y: self.tuning.life_bar_y,
            half_height: self.tuning.life_bar_half_height,
        });
    }

    /// Start a new play session
    pub fn new_game(&mut self) {
        self.balls.clear();
        self.fading_trails.clear();
        self.halos.clear();
        self.power_ups.clear();
        self.build_defenses();

        self.ammo = self.tuning.max_ammo;
        self.score = 0;
        self.point_value = 1;
        self.multi_mode = false;
        self.game_paused = false;
        self.game_over = false;
        self.did_shoot = false;
        self.timers = Timers::fresh();

        self.menu.hide();
        log::info!("New game started (seed {})", self.seed);
        self.emit(GameEvent::GameStarted);
    }

    /// Menu play button
    pub fn press_play(&mut self) -> bool {
        if !self.menu.touchable || !self.game_over {
            log::debug!("Play ignored (menu not touchable or game running)");
            return false;
        }
        self.new_game();
        true
    }

    /// Menu music button
    pub fn toggle_music(&mut self) -> Option<bool> {
        if !self.menu.touchable {
            return None;
        }
        let playing = self.menu.toggle_music();
        self.emit(GameEvent::MusicToggled(playing));
        Some(playing)
    }

    /// Pause or resume; ignored while the menu is up
    pub fn set_paused(&mut self, paused: bool) {
        if self.game_over || self.game_paused == paused {
            return;
        }
        self.game_paused = paused;
        log::info!("Game {}", if paused { "paused" } else { "resumed" });
        self.emit(GameEvent::Paused(paused));
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.game_paused);
    }

    /// Fire from the cannon if there is ammo
    pub fn shoot(&mut self) {
        if self.game_over || self.game_paused {
            return;
        }
        if self.ammo == 0 {
            log::debug!("Click - out of ammo");
            return;
        }
        self.ammo -= 1;
        self.fire_ball();

        if self.multi_mode {
            if self.timers.burst_remaining == 0 {
                self.timers.burst_timer = self.tuning.multi_shot_interval;
            }
            // Overlapping bursts queue up behind each other
            self.timers.burst_remaining += self.tuning.multi_shot_count.saturating_sub(1);
            if self.ammo == 0 {
                self.set_multi_mode(false);
                self.ammo = self.tuning.max_ammo;
            }
        }
    }

    /// Spawn one ball at the muzzle, heading along the barrel
    pub fn fire_ball(&mut self) {
        let id = self.next_entity_id();
        let dir = self.cannon.direction();
        let pos = self.cannon.muzzle();
        let birth_rate = if self.trails { self.tuning.trail_birth_rate } else { 0.0 };
        let trail = Trail::new(pos, birth_rate, self.tuning.trail_lifetime);
        self.balls.push(Ball::new(
            id,
            pos,
            dir * self.tuning.shoot_speed,
            self.tuning.ball_radius,
            trail,
        ));
        self.emit(GameEvent::Shot { ball_id: id });
    }

    fn set_multi_mode(&mut self, on: bool) {
        if self.multi_mode != on {
            self.multi_mode = on;
            log::debug!("Multi-mode {}", if on { "on" } else { "off" });
            self.emit(GameEvent::MultiModeChanged(on));
        }
    }

    fn set_point_value(&mut self, value: u32) {
        let value = value.max(1);
        if self.point_value != value {
            self.point_value = value;
            self.emit(GameEvent::PointValueChanged(value));
        }
    }

    /// Drop a new halo in from above the top edge
    pub fn spawn_halo(&mut self) {
        let t = &self.tuning;
        let (radius, speed, width, height) = (t.halo_radius, t.halo_speed, t.field_width, t.field_height);
        let (low, high) = (t.halo_low_angle_deg.to_radians(), t.halo_high_angle_deg.to_radians());
        let odds = t.multiplier_odds;

        let heading = random_in_range(&mut self.rng, low, high);
        let x = random_in_range(&mut self.rng, radius, width - radius);

        let has_bomb = self.halos.iter().any(|h| h.kind == HaloKind::Bomb);
        let kind = if self.halos.len() >= self.tuning.bomb_threshold && !has_bomb {
            HaloKind::Bomb
        } else if self.rng.random_ratio(1, odds) {
            HaloKind::Multiplier
        } else {
            HaloKind::Normal
        };

        let id = self.next_entity_id();
        self.halos.push(Halo {
            id,
            kind,
            pos: Vec2::new(x, height + radius),
            vel: radians_to_vector(heading) * speed,
            radius,
        });
        log::debug!("Spawned {:?} halo {} at x={:.1}", kind, id, x);
    }

    /// Shield power-up enters from the left
    pub fn spawn_shield_power_up(&mut self) {
        let y = self.random_power_up_height();
        let radius = self.tuning.power_up_radius;
        let vel = Vec2::new(self.tuning.power_up_speed, 0.0);
        self.push_power_up(PowerUpKind::Shield, Vec2::new(-radius, y), vel);
    }

    /// Multi-shot power-up enters from the right
    pub fn spawn_multi_shot_power_up(&mut self) {
        let y = self.random_power_up_height();
        let radius = self.tuning.power_up_radius;
        let x = self.tuning.field_width + radius;
        let vel = Vec2::new(-self.tuning.power_up_speed, 0.0);
        self.push_power_up(PowerUpKind::MultiShot, Vec2::new(x, y), vel);
    }

    fn random_power_up_height(&mut self) -> f32 {
        let low = self.tuning.shield_y + 60.0;
        let high = self.tuning.field_height - 100.0;
        random_in_range(&mut self.rng, low, high)
    }

    fn push_power_up(&mut self, kind: PowerUpKind, pos: Vec2, vel: Vec2) {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            kind,
            pos,
            vel,
            radius: self.tuning.power_up_radius,
        });
        self.emit(GameEvent::PowerUpSpawned { kind });
    }

    /// Advance the repeating actions (ammo, spawns, bursts)
    pub fn run_timers(&mut self, dt: f32) {
        if self.game_over {
            return;
        }

        self.timers.ammo_regen += dt;
        while self.timers.ammo_regen >= self.tuning.ammo_regen_secs {
            self.timers.ammo_regen -= self.tuning.ammo_regen_secs;
            if !self.multi_mode && self.ammo < self.tuning.max_ammo {
                self.ammo += 1;
            }
        }

        self.timers.halo_spawn += dt * self.timers.halo_spawn_rate;
        if self.timers.halo_spawn >= self.tuning.halo_spawn_secs {
            self.timers.halo_spawn -= self.tuning.halo_spawn_secs;
            self.spawn_halo();
            self.timers.halo_spawn_rate = (self.timers.halo_spawn_rate
                + self.tuning.halo_spawn_rate_step)
                .min(self.tuning.halo_spawn_rate_max);
        }

        self.timers.shield_power_up += dt;
        if self.timers.shield_power_up >= self.tuning.shield_power_up_secs {
            self.timers.shield_power_up -= self.tuning.shield_power_up_secs;
            if !self.shield_pool.is_empty() {
                self.spawn_shield_power_up();
            }
        }

        if self.timers.burst_remaining > 0 {
            self.timers.burst_timer -= dt;
            if self.timers.burst_timer <= 0.0 {
                self.timers.burst_remaining -= 1;
                self.timers.burst_timer += self.tuning.multi_shot_interval;
                self.fire_ball();
            }
        }
    }

    /// Post-physics pass: deferred shot, frame cleanup, trail refresh
    pub fn did_simulate_physics(&mut self, dt: f32) {
        if self.did_shoot {
            self.did_shoot = false;
            self.shoot();
        }

        let (width, height) = (self.tuning.field_width, self.tuning.field_height);

        let (kept, gone): (Vec<Ball>, Vec<Ball>) = std::mem::take(&mut self.balls)
            .into_iter()
            .partition(|b| in_frame(b.pos, width, height));
        self.balls = kept;
        self.fading_trails.extend(gone.into_iter().map(Ball::detach_trail));

        for ball in &mut self.balls {
            ball.update_trail();
            ball.trail.advance(dt);
        }
        for trail in &mut self.fading_trails {
            trail.advance(dt);
        }
        self.fading_trails.retain(|t| !t.is_finished());

        self.halos.retain(|h| h.pos.y + h.radius >= 0.0);
        self.power_ups.retain(|p| {
            if p.vel.x >= 0.0 {
                p.pos.x - p.radius <= width
            } else {
                p.pos.x + p.radius >= 0.0
            }
        });
    }

    /// End the session and bring the menu back
    pub fn game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;

        for halo in std::mem::take(&mut self.halos) {
            self.emit(GameEvent::HaloDestroyed {
                pos: halo.pos,
                kind: halo.kind,
            });
        }
        for ball in std::mem::take(&mut self.balls) {
            self.fading_trails.push(ball.detach_trail());
        }
        self.power_ups.clear();
        let shields = std::mem::take(&mut self.shields);
        self.shield_pool.extend(shields);

        self.set_multi_mode(false);
        self.timers.burst_remaining = 0;
        self.did_shoot = false;

        let score = self.score;
        let new_top = self.menu.set_scores(score);
        let top_score = self.menu.top_score;
        self.menu.show();
        log::info!(
            "Game over - score {} (top {}){}",
            score,
            top_score,
            if new_top { " NEW TOP SCORE" } else { "" }
        );
        self.emit(GameEvent::GameOver {
            score,
            top_score,
            new_top,
        });
    }

    fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        let idx = self.balls.iter().position(|b| b.id == id)?;
        let ball = self.balls.remove(idx);
        Some(ball)
    }

    fn remove_halo(&mut self, id: u32) -> Option<Halo> {
        let idx = self.halos.iter().position(|h| h.id == id)?;
        Some(self.halos.remove(idx))
    }

    fn remove_power_up(&mut self, id: u32) -> Option<PowerUp> {
        let idx = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(idx))
    }

    fn destroy_shield(&mut self, id: u32) {
        if let Some(idx) = self.shields.iter().position(|s| s.id == id) {
            let shield = self.shields.remove(idx);
            self.emit(GameEvent::ShieldDestroyed { slot: shield.slot });
            self.shield_pool.push(shield);
        }
    }

    fn ball_hit_halo(&mut self, halo_id: u32, ball_id: u32) {
        if !self.halos.iter().any(|h| h.id == halo_id) || !self.balls.iter().any(|b| b.id == ball_id) {
            return;
        }
        let (Some(halo), Some(ball)) = (self.remove_halo(halo_id), self.remove_ball(ball_id)) else {
            return;
        };
        self.fading_trails.push(ball.detach_trail());

        let before = self.score;
        self.score = self.score.saturating_add(self.point_value);
        self.emit(GameEvent::HaloDestroyed {
            pos: halo.pos,
            kind: halo.kind,
        });
        log::debug!("Halo {} hit by ball {} - score {}", halo_id, ball_id, self.score);

        match halo.kind {
            HaloKind::Normal => {}
            HaloKind::Multiplier => self.set_point_value(self.point_value.saturating_add(1)),
            HaloKind::Bomb => {
                for other in std::mem::take(&mut self.halos) {
                    self.emit(GameEvent::HaloDestroyed {
                        pos: other.pos,
                        kind: other.kind,
                    });
                }
            }
        }

        let step = self.tuning.multi_shot_score_step;
        let crossed = before / step != self.score / step;
        let pending = self.power_ups.iter().any(|p| p.kind == PowerUpKind::MultiShot);
        if crossed && !self.multi_mode && !pending {
            self.spawn_multi_shot_power_up();
        }
    }

    fn halo_hit_shield(&mut self, halo_id: u32, shield_id: u32) {
        if !self.shields.iter().any(|s| s.id == shield_id) {
            return;
        }
        let Some(halo) = self.remove_halo(halo_id) else {
            return;
        };
        self.emit(GameEvent::HaloDestroyed {
            pos: halo.pos,
            kind: halo.kind,
        });
        if halo.kind == HaloKind::Bomb {
            let ids: Vec<u32> = self.shields.iter().map(|s| s.id).collect();
            for id in ids {
                self.destroy_shield(id);
            }
        } else {
            self.destroy_shield(shield_id);
        }
    }

    fn halo_hit_life_bar(&mut self, halo_id: u32) {
        if self.life_bar.is_none() {
            return;
        }
        let Some(halo) = self.remove_halo(halo_id) else {
            return;
        };
        self.emit(GameEvent::HaloDestroyed {
            pos: halo.pos,
            kind: halo.kind,
        });
        self.life_bar = None;
        self.emit(GameEvent::LifeBarDestroyed);
        self.game_over();
    }

    fn ball_hit_edge(&mut self, ball_id: u32) {
        let max_bounces = self.tuning.max_bounces;
        let Some(ball) = self.balls.iter_mut().find(|b| b.id == ball_id) else {
            return;
        };
        ball.bounces += 1;
        let expired = ball.bounces > max_bounces;
        self.emit(GameEvent::Bounce { ball_id });

        if expired && let Some(ball) = self.remove_ball(ball_id) {
            self.fading_trails.push(ball.detach_trail());
            self.emit(GameEvent::BallExpired { ball_id });
            self.set_point_value(1);
        }
    }

    fn ball_hit_power_up(&mut self, ball_id: u32, power_up_id: u32) {
        if !self.balls.iter().any(|b| b.id == ball_id) {
            return;
        }
        let Some(power_up) = self.remove_power_up(power_up_id) else {
            return;
        };
        if let Some(ball) = self.remove_ball(ball_id) {
            self.fading_trails.push(ball.detach_trail());
        }

        match power_up.kind {
            PowerUpKind::Shield => {
                if self.shield_pool.is_empty() {
                    return;
                }
                let idx = self.rng.random_range(0..self.shield_pool.len());
                let shield = self.shield_pool.swap_remove(idx);
                let slot = shield.slot;
                self.shields.push(shield);
                self.shields.sort_by_key(|s| s.slot);
                self.emit(GameEvent::ShieldRestored { slot });
            }
            PowerUpKind::MultiShot => {
                self.set_multi_mode(true);
                self.ammo = self.tuning.max_ammo;
            }
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.halos.sort_by_key(|h| h.id);
        self.power_ups.sort_by_key(|p| p.id);
    }
}

impl ContactHandler for Scene {
    fn did_begin_contact(&mut self, contact: Contact) {
        if self.game_paused || self.game_over {
            return;
        }
        match (contact.first, contact.second) {
            (Body::Halo(halo), Body::Ball(ball)) => self.ball_hit_halo(halo, ball),
            (Body::Halo(_), Body::Edge(_)) => self.emit(GameEvent::Zap),
            (Body::Halo(halo), Body::Shield(shield)) => self.halo_hit_shield(halo, shield),
            (Body::Halo(halo), Body::LifeBar) => self.halo_hit_life_bar(halo),
            (Body::Ball(ball), Body::Edge(_)) => self.ball_hit_edge(ball),
            (Body::Ball(ball), Body::ShieldPowerUp(p) | Body::MultiShotPowerUp(p)) => {
                self.ball_hit_power_up(ball, p)
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Side;

    fn playing_scene() -> Scene {
        let mut scene = Scene::new(1234, Tuning::default(), 0, true);
        scene.new_game();
        scene.drain_events();
        scene
    }

    fn place_halo(scene: &mut Scene, kind: HaloKind, pos: Vec2) -> u32 {
        let id = scene.next_entity_id();
        scene.halos.push(Halo {
            id,
            kind,
            pos,
            vel: Vec2::new(0.0, -100.0),
            radius: scene.tuning.halo_radius,
        });
        id
    }

    #[test]
    fn test_new_scene_waits_in_menu() {
        let scene = Scene::new(1, Tuning::default(), 7, false);
        assert!(scene.game_over);
        assert!(scene.menu.touchable);
        assert_eq!(scene.menu.top_score, 7);
        assert_eq!(scene.shields.len(), 6);
        assert!(scene.life_bar.is_some());
    }

    #[test]
    fn test_new_game_resets_state() {
        let mut scene = playing_scene();
        scene.score = 40;
        scene.ammo = 0;
        scene.point_value = 3;
        scene.game_over();
        assert!(scene.menu.is_shown());

        assert!(scene.press_play());
        assert!(!scene.game_over);
        assert!(!scene.menu.touchable);
        assert_eq!(scene.ammo, 5);
        assert_eq!(scene.score, 0);
        assert_eq!(scene.point_value, 1);
        assert_eq!(scene.shields.len(), 6);
        assert!(scene.shield_pool.is_empty());
    }

    #[test]
    fn test_press_play_ignored_while_playing() {
        let mut scene = playing_scene();
        assert!(!scene.press_play());
    }

    #[test]
    fn test_shoot_consumes_ammo() {
        let mut scene = playing_scene();
        scene.shoot();
        assert_eq!(scene.ammo, 4);
        assert_eq!(scene.balls.len(), 1);
        assert!(matches!(scene.drain_events()[0], GameEvent::Shot { .. }));
    }

    #[test]
    fn test_shoot_without_ammo_does_nothing() {
        let mut scene = playing_scene();
        scene.ammo = 0;
        scene.shoot();
        assert_eq!(scene.ammo, 0);
        assert!(scene.balls.is_empty());
    }

    #[test]
    fn test_multi_mode_shot_starts_burst_and_refills() {
        let mut scene = playing_scene();
        scene.multi_mode = true;
        scene.ammo = 1;
        scene.shoot();
        assert_eq!(scene.balls.len(), 1);
        assert_eq!(scene.timers.burst_remaining, 4);
        assert!(!scene.multi_mode);
        assert_eq!(scene.ammo, 5);

        for _ in 0..60 {
            scene.run_timers(1.0 / 60.0);
        }
        assert_eq!(scene.timers.burst_remaining, 0);
        assert_eq!(scene.balls.len(), 5);
    }

    #[test]
    fn test_ball_hits_halo_scores() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        scene.point_value = 2;

        scene.did_begin_contact(Contact::new(Body::Ball(ball_id), Body::Halo(halo_id)));
        assert_eq!(scene.score, 2);
        assert!(scene.balls.is_empty());
        assert!(scene.halos.is_empty());
        assert_eq!(scene.fading_trails.len(), 1);
    }

    #[test]
    fn test_duplicate_contact_scores_once() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let a = place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        let b = place_halo(&mut scene, HaloKind::Normal, Vec2::new(110.0, 300.0));

        scene.did_begin_contact(Contact::new(Body::Halo(a), Body::Ball(ball_id)));
        scene.did_begin_contact(Contact::new(Body::Halo(b), Body::Ball(ball_id)));
        assert_eq!(scene.score, 1);
        assert_eq!(scene.halos.len(), 1);
    }

    #[test]
    fn test_multiplier_halo_raises_point_value() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let halo_id = place_halo(&mut scene, HaloKind::Multiplier, Vec2::new(100.0, 300.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Ball(ball_id)));
        assert_eq!(scene.score, 1);
        assert_eq!(scene.point_value, 2);
    }

    #[test]
    fn test_bomb_halo_clears_screen() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let bomb = place_halo(&mut scene, HaloKind::Bomb, Vec2::new(100.0, 300.0));
        place_halo(&mut scene, HaloKind::Normal, Vec2::new(200.0, 400.0));
        place_halo(&mut scene, HaloKind::Normal, Vec2::new(50.0, 450.0));

        scene.did_begin_contact(Contact::new(Body::Halo(bomb), Body::Ball(ball_id)));
        assert!(scene.halos.is_empty());
        assert_eq!(scene.score, 1);
    }

    #[test]
    fn test_crossing_score_step_spawns_multi_shot() {
        let mut scene = playing_scene();
        scene.score = 9;
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Ball(ball_id)));
        assert_eq!(scene.score, 10);
        assert_eq!(scene.power_ups.len(), 1);
        assert_eq!(scene.power_ups[0].kind, PowerUpKind::MultiShot);
    }

    #[test]
    fn test_bounce_limit_removes_ball_and_resets_points() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        scene.point_value = 4;
        let contact = Contact::new(Body::Ball(ball_id), Body::Edge(Side::Left));
        for _ in 0..3 {
            scene.did_begin_contact(contact);
        }
        assert_eq!(scene.balls[0].bounces, 3);
        assert_eq!(scene.point_value, 4);

        scene.did_begin_contact(contact);
        assert!(scene.balls.is_empty());
        assert_eq!(scene.point_value, 1);
    }

    #[test]
    fn test_halo_destroys_shield() {
        let mut scene = playing_scene();
        let shield_id = scene.shields[2].id;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(136.0, 100.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Shield(shield_id)));
        assert_eq!(scene.shields.len(), 5);
        assert_eq!(scene.shield_pool.len(), 1);
        assert!(scene.halos.is_empty());
    }

    #[test]
    fn test_bomb_destroys_all_shields() {
        let mut scene = playing_scene();
        let shield_id = scene.shields[0].id;
        let halo_id = place_halo(&mut scene, HaloKind::Bomb, Vec2::new(36.0, 100.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Shield(shield_id)));
        assert!(scene.shields.is_empty());
        assert_eq!(scene.shield_pool.len(), 6);
    }

    #[test]
    fn test_shield_power_up_restores_shield() {
        let mut scene = playing_scene();
        let shield_id = scene.shields[3].id;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(186.0, 100.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Shield(shield_id)));

        scene.spawn_shield_power_up();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let power_id = scene.power_ups[0].id;
        scene.did_begin_contact(Contact::new(Body::Ball(ball_id), Body::ShieldPowerUp(power_id)));
        assert_eq!(scene.shields.len(), 6);
        assert!(scene.shield_pool.is_empty());
        assert!(scene.power_ups.is_empty());
    }

    #[test]
    fn test_multi_shot_power_up_enables_multi_mode() {
        let mut scene = playing_scene();
        scene.ammo = 2;
        scene.spawn_multi_shot_power_up();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let power_id = scene.power_ups[0].id;
        scene.did_begin_contact(Contact::new(Body::Ball(ball_id), Body::MultiShotPowerUp(power_id)));
        assert!(scene.multi_mode);
        assert_eq!(scene.ammo, 5);
    }

    #[test]
    fn test_life_bar_hit_ends_game() {
        let mut scene = playing_scene();
        scene.score = 25;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(60.0, 80.0));
        place_halo(&mut scene, HaloKind::Normal, Vec2::new(200.0, 400.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::LifeBar));

        assert!(scene.game_over);
        assert!(scene.life_bar.is_none());
        assert!(scene.halos.is_empty());
        assert!(scene.menu.touchable);
        assert_eq!(scene.menu.score, 25);
        assert_eq!(scene.menu.top_score, 25);
        let events = scene.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 25,
            top_score: 25,
            new_top: true
        }));
    }

    #[test]
    fn test_paused_scene_ignores_contacts() {
        let mut scene = playing_scene();
        scene.shoot();
        let ball_id = scene.balls[0].id;
        let halo_id = place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        scene.set_paused(true);
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Ball(ball_id)));
        assert_eq!(scene.score, 0);
        assert_eq!(scene.halos.len(), 1);
    }

    #[test]
    fn test_pause_ignored_in_menu() {
        let mut scene = Scene::new(1, Tuning::default(), 0, false);
        scene.set_paused(true);
        assert!(!scene.game_paused);
    }

    #[test]
    fn test_music_toggle_needs_touchable_menu() {
        let mut scene = Scene::new(1, Tuning::default(), 0, true);
        assert_eq!(scene.toggle_music(), Some(false));
        scene.new_game();
        assert_eq!(scene.toggle_music(), None);
        assert!(!scene.menu.play_music);
    }

    #[test]
    fn test_bomb_spawns_once_threshold_reached() {
        let mut scene = playing_scene();
        for _ in 0..4 {
            place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        }
        scene.spawn_halo();
        assert_eq!(scene.halos.last().unwrap().kind, HaloKind::Bomb);
        scene.spawn_halo();
        assert_ne!(scene.halos.last().unwrap().kind, HaloKind::Bomb);
    }

    #[test]
    fn test_spawned_halo_heads_down() {
        let mut scene = playing_scene();
        for _ in 0..20 {
            scene.spawn_halo();
            let halo = scene.halos.last().unwrap();
            assert!(halo.vel.y < 0.0);
            assert!(halo.pos.y > scene.tuning.field_height);
            assert!(halo.pos.x >= halo.radius && halo.pos.x <= scene.tuning.field_width - halo.radius);
        }
    }

    #[test]
    fn test_ammo_regen_caps_and_pauses_in_multi_mode() {
        let mut scene = playing_scene();
        scene.ammo = 3;
        scene.run_timers(1.0);
        assert_eq!(scene.ammo, 4);
        scene.run_timers(5.0);
        assert_eq!(scene.ammo, 5);

        scene.ammo = 2;
        scene.multi_mode = true;
        scene.run_timers(3.0);
        assert_eq!(scene.ammo, 2);
    }

    #[test]
    fn test_overlapping_bursts_fire_every_ball() {
        let mut scene = playing_scene();
        scene.multi_mode = true;
        scene.shoot();
        scene.run_timers(1.0 / 60.0);
        scene.run_timers(1.0 / 60.0);
        scene.shoot();
        assert_eq!(scene.timers.burst_remaining, 8);

        for _ in 0..120 {
            scene.run_timers(1.0 / 60.0);
        }
        assert_eq!(scene.ammo, 3);
        assert_eq!(scene.balls.len(), 10);
    }

    #[test]
    fn test_trails_disabled_balls_emit_nothing() {
        let mut scene = playing_scene();
        scene.trails = false;
        scene.cannon.advance(1.0);
        scene.shoot();
        scene.did_simulate_physics(1.0 / 60.0);
        let trail = &scene.balls[0].trail;
        assert!(!trail.is_emitting());
        assert!(trail.particles.is_empty());
    }

    #[test]
    fn test_shield_power_up_every_fifteen_seconds() {
        let mut scene = playing_scene();
        let shield_id = scene.shields[0].id;
        scene.destroy_shield(shield_id);

        for _ in 0..14 {
            scene.run_timers(1.0);
        }
        assert!(!scene.power_ups.iter().any(|p| p.kind == PowerUpKind::Shield));
        scene.run_timers(1.0);
        let shields: Vec<_> = scene
            .power_ups
            .iter()
            .filter(|p| p.kind == PowerUpKind::Shield)
            .collect();
        assert_eq!(shields.len(), 1);
        assert!(shields[0].vel.x > 0.0);
    }

    #[test]
    fn test_no_shield_power_up_with_full_defenses() {
        let mut scene = playing_scene();
        for _ in 0..45 {
            scene.run_timers(1.0);
        }
        assert!(scene.shield_pool.is_empty());
        assert!(!scene.power_ups.iter().any(|p| p.kind == PowerUpKind::Shield));
    }

    fn score_one_halo(scene: &mut Scene) {
        scene.fire_ball();
        let ball_id = scene.balls.last().unwrap().id;
        let halo_id = place_halo(scene, HaloKind::Normal, Vec2::new(100.0, 300.0));
        scene.did_begin_contact(Contact::new(Body::Halo(halo_id), Body::Ball(ball_id)));
    }

    #[test]
    fn test_only_one_multi_shot_power_up_on_screen() {
        let mut scene = playing_scene();
        scene.score = 9;
        score_one_halo(&mut scene);
        assert_eq!(scene.power_ups.len(), 1);

        scene.score = 19;
        score_one_halo(&mut scene);
        assert_eq!(scene.score, 20);
        assert_eq!(scene.power_ups.len(), 1);
    }

    #[test]
    fn test_no_multi_shot_power_up_during_multi_mode() {
        let mut scene = playing_scene();
        scene.multi_mode = true;
        scene.score = 9;
        score_one_halo(&mut scene);
        assert_eq!(scene.score, 10);
        assert!(scene.power_ups.is_empty());
    }

    #[test]
    fn test_power_ups_removed_once_off_screen() {
        let mut scene = playing_scene();
        scene.spawn_shield_power_up();
        scene.spawn_multi_shot_power_up();
        scene.did_simulate_physics(1.0 / 60.0);
        assert_eq!(scene.power_ups.len(), 2, "entering power-ups are kept");

        let radius = scene.tuning.power_up_radius;
        let width = scene.tuning.field_width;
        for p in &mut scene.power_ups {
            p.pos.x = match p.kind {
                PowerUpKind::Shield => width + radius + 1.0,
                PowerUpKind::MultiShot => -radius - 1.0,
            };
        }
        scene.did_simulate_physics(1.0 / 60.0);
        assert!(scene.power_ups.is_empty());
    }

    #[test]
    fn test_halo_below_frame_removed() {
        let mut scene = playing_scene();
        let radius = scene.tuning.halo_radius;
        let kept = place_halo(&mut scene, HaloKind::Normal, Vec2::new(100.0, 0.0));
        place_halo(&mut scene, HaloKind::Normal, Vec2::new(200.0, -radius - 1.0));
        scene.did_simulate_physics(1.0 / 60.0);
        assert_eq!(scene.halos.len(), 1);
        assert_eq!(scene.halos[0].id, kept);
    }
}
