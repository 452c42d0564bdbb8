//! Menu overlay shown between play sessions
//!
//! Two states, switched only by `show()` and `hide()`. The overlay accepts
//! taps (play button, music toggle) only while it is touchable.

use serde::{Deserialize, Serialize};

/// Overlay visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    Hidden,
    Shown,
}

/// Seconds for the overlay fade in/out
pub const MENU_FADE_SECS: f32 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    /// Score of the last finished session
    pub score: u32,
    /// Best score seen so far
    pub top_score: u32,
    /// Whether the overlay reacts to taps
    pub touchable: bool,
    pub play_music: bool,
    pub state: MenuState,
    /// Presentation opacity (0 = gone, 1 = fully shown)
    pub fade: f32,
}

impl Menu {
    /// A menu that starts shown, as the game boots into it
    pub fn new(top_score: u32, play_music: bool) -> Self {
        Self {
            score: 0,
            top_score,
            touchable: true,
            play_music,
            state: MenuState::Shown,
            fade: 1.0,
        }
    }

    pub fn show(&mut self) {
        self.state = MenuState::Shown;
        self.touchable = true;
    }

    pub fn hide(&mut self) {
        self.state = MenuState::Hidden;
        self.touchable = false;
    }

    pub fn is_shown(&self) -> bool {
        self.state == MenuState::Shown
    }

    /// Flip the music flag, returning the new value
    pub fn toggle_music(&mut self) -> bool {
        self.play_music = !self.play_music;
        self.play_music
    }

    /// Record a finished session; returns true when the top score was beaten
    pub fn set_scores(&mut self, score: u32) -> bool {
        self.score = score;
        if score > self.top_score {
            self.top_score = score;
            true
        } else {
            false
        }
    }

    /// Move the fade toward the current state
    pub fn update(&mut self, dt: f32) {
        let step = dt / MENU_FADE_SECS;
        self.fade = match self.state {
            MenuState::Shown => (self.fade + step).min(1.0),
            MenuState::Hidden => (self.fade - step).max(0.0),
        };
    }
}
