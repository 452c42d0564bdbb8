//! Fixed timestep game loop driver
//!
//! Owns the scene plus everything outside the simulation (audio, settings,
//! high scores, storage) and routes scene events to them.

use serde::Serialize;

use crate::audio::AudioManager;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{HighScores, now_timestamp};
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::sim::{GameEvent, Scene, TickInput, tick};
use crate::tuning::Tuning;

/// Outcome of one finished play session
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub score: u32,
    pub best_multiplier: u32,
    pub seconds: f32,
    /// Leaderboard rank reached, if any
    pub rank: Option<usize>,
    pub new_top: bool,
}

pub struct GameLoop {
    pub scene: Scene,
    pub audio: AudioManager,
    pub settings: Settings,
    pub high_scores: HighScores,
    storage: Box<dyn Storage>,
    input: TickInput,
    accumulator: f32,
    session_start_tick: u64,
    best_multiplier: u32,
    results: Vec<SessionResult>,
}

impl GameLoop {
    pub fn new(seed: u64, tuning: Tuning, storage: Box<dyn Storage>) -> Self {
        let settings = Settings::load(storage.as_ref());
        let high_scores = HighScores::load(storage.as_ref());
        let mut scene = Scene::new(seed, tuning, high_scores.top_score(), settings.play_music);
        scene.trails = settings.trails;
        log::info!(
            "Game initialized with seed: {} (top score {})",
            seed,
            high_scores.top_score()
        );
        Self {
            scene,
            audio: AudioManager::new(&settings),
            settings,
            high_scores,
            storage,
            input: TickInput::default(),
            accumulator: 0.0,
            session_start_tick: 0,
            best_multiplier: 1,
            results: Vec::new(),
        }
    }

    pub fn shoot(&mut self) {
        self.input.shoot = true;
    }

    pub fn pause(&mut self) {
        self.input.pause = true;
    }

    pub fn play(&mut self) {
        self.input.play = true;
    }

    pub fn toggle_music(&mut self) {
        self.input.toggle_music = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    pub fn results(&self) -> &[SessionResult] {
        &self.results
    }

    /// Run simulation ticks for `dt` seconds of wall time
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.scene, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.shoot = false;
            self.input.pause = false;
            self.input.play = false;
            self.input.toggle_music = false;

            self.route_events();
        }
    }

    fn route_events(&mut self) {
        for event in self.scene.drain_events() {
            self.audio.handle_event(&event);
            match event {
                GameEvent::GameStarted => {
                    self.session_start_tick = self.scene.time_ticks;
                    self.best_multiplier = 1;
                }
                GameEvent::PointValueChanged(value) => {
                    self.best_multiplier = self.best_multiplier.max(value);
                }
                GameEvent::MusicToggled(on) => {
                    self.settings.play_music = on;
                    if let Err(e) = self.settings.save(self.storage.as_mut()) {
                        log::warn!("Could not save settings: {e:#}");
                    }
                }
                GameEvent::GameOver { score, new_top, .. } => {
                    self.finish_session(score, new_top);
                }
                _ => {}
            }
        }
    }

    fn finish_session(&mut self, score: u32, new_top: bool) {
        let seconds = (self.scene.time_ticks - self.session_start_tick) as f32 * SIM_DT;
        let rank = self
            .high_scores
            .add_score(score, self.best_multiplier, seconds, now_timestamp());
        if let Some(rank) = rank {
            log::info!("Score {} placed #{} on the leaderboard", score, rank);
            if let Err(e) = self.high_scores.save(self.storage.as_mut()) {
                log::warn!("Could not save high scores: {e:#}");
            }
        }
        self.results.push(SessionResult {
            score,
            best_multiplier: self.best_multiplier,
            seconds,
            rank,
            new_top,
        });
    }
}
