//! HUD text derived from the scene

use crate::sim::Scene;

/// Everything the heads-up display shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub points_text: String,
    pub ammo: u32,
    pub max_ammo: u32,
    pub multi_mode: bool,
    pub paused: bool,
    /// Menu overlay lines, present while the menu is up
    pub menu_lines: Option<[String; 2]>,
}

impl Hud {
    pub fn from_scene(scene: &Scene) -> Self {
        let menu_lines = scene.menu.is_shown().then(|| {
            [
                format!("Score: {}", scene.menu.score),
                format!("Top: {}", scene.menu.top_score),
            ]
        });
        Self {
            score_text: format!("Score: {}", scene.score),
            points_text: format!("Points: x{}", scene.point_value),
            ammo: scene.ammo,
            max_ammo: scene.tuning.max_ammo,
            multi_mode: scene.multi_mode,
            paused: scene.game_paused,
            menu_lines,
        }
    }

    /// Ammo gauge, one pip per round
    pub fn ammo_gauge(&self) -> String {
        let full = self.ammo.min(self.max_ammo) as usize;
        let empty = self.max_ammo as usize - full;
        format!("{}{}", "●".repeat(full), "○".repeat(empty))
    }
}
