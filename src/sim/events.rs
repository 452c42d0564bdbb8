//! Events emitted by the scene for the driver (audio, logging, persistence)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::halo::{HaloKind, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    GameOver {
        score: u32,
        top_score: u32,
        new_top: bool,
    },
    Paused(bool),
    MusicToggled(bool),
    Shot {
        ball_id: u32,
    },
    Bounce {
        ball_id: u32,
    },
    /// Ball removed for bouncing too often
    BallExpired {
        ball_id: u32,
    },
    /// Halo glanced off a side wall
    Zap,
    HaloDestroyed {
        pos: Vec2,
        kind: HaloKind,
    },
    ShieldDestroyed {
        slot: usize,
    },
    ShieldRestored {
        slot: usize,
    },
    LifeBarDestroyed,
    PowerUpSpawned {
        kind: PowerUpKind,
    },
    PointValueChanged(u32),
    MultiModeChanged(bool),
}
