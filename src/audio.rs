//! Audio cue mixing
//!
//! Scene events are turned into sound effect cues with an effective volume.
//! There is no output device here; the driver (or a test) consumes the cue
//! log and background music state.

use crate::settings::Settings;
use crate::sim::{GameEvent, HaloKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Cannon fired
    Laser,
    /// Halo destroyed
    Explosion,
    /// Bomb halo or life bar destroyed
    DeepExplosion,
    /// Ball hits a side wall
    Bounce,
    /// Halo hits a side wall
    Zap,
    /// Shield restored or multi-shot collected
    ShieldUp,
}

impl SoundEffect {
    /// Asset name of the sample
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Laser => "Laser.caf",
            SoundEffect::Explosion => "Explosion.caf",
            SoundEffect::DeepExplosion => "DeepExplosion.caf",
            SoundEffect::Bounce => "Bounce.caf",
            SoundEffect::Zap => "Zap.caf",
            SoundEffect::ShieldUp => "ShieldUp.caf",
        }
    }

    /// Cue for a scene event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot { .. } => Some(SoundEffect::Laser),
            GameEvent::HaloDestroyed {
                kind: HaloKind::Bomb,
                ..
            } => Some(SoundEffect::DeepExplosion),
            GameEvent::HaloDestroyed { .. } | GameEvent::ShieldDestroyed { .. } => {
                Some(SoundEffect::Explosion)
            }
            GameEvent::LifeBarDestroyed => Some(SoundEffect::DeepExplosion),
            GameEvent::Bounce { .. } => Some(SoundEffect::Bounce),
            GameEvent::Zap => Some(SoundEffect::Zap),
            GameEvent::ShieldRestored { .. } | GameEvent::MultiModeChanged(true) => {
                Some(SoundEffect::ShieldUp)
            }
            _ => None,
        }
    }
}

/// A cue that was played
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Default)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    played: Vec<Cue>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut audio = Self::default();
        audio.apply_settings(settings);
        audio
    }

    /// Pick up volume and music changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_music(settings.play_music);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Start or stop the background loop
    pub fn set_music(&mut self, on: bool) {
        if self.music_playing != on {
            log::debug!("Music {}", if on { "started" } else { "stopped" });
        }
        self.music_playing = on;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Volume of the music loop right now
    pub fn music_level(&self) -> f32 {
        if self.muted || !self.music_playing {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::trace!("Playing {} at {:.2}", effect.file_name(), volume);
        self.played.push(Cue { effect, volume });
    }

    /// React to one scene event
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let GameEvent::MusicToggled(on) = event {
            self.set_music(*on);
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Take the cues played since the last call
    pub fn drain_played(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Shot { ball_id: 1 }),
            Some(SoundEffect::Laser)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::HaloDestroyed {
                pos: Vec2::ZERO,
                kind: HaloKind::Bomb
            }),
            Some(SoundEffect::DeepExplosion)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::GameStarted), None);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.set_muted(true);
        audio.handle_event(&GameEvent::Zap);
        assert!(audio.drain_played().is_empty());
        assert_eq!(audio.music_level(), 0.0);
    }

    #[test]
    fn test_volume_and_music_toggle() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.handle_event(&GameEvent::Bounce { ball_id: 2 });
        let cues = audio.drain_played();
        assert_eq!(cues.len(), 1);
        assert!((cues[0].volume - 0.8).abs() < 1e-6);

        assert!(audio.music_playing());
        audio.handle_event(&GameEvent::MusicToggled(false));
        assert!(!audio.music_playing());
    }
}
