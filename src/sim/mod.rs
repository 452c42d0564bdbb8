//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod body;
pub mod cannon;
pub mod collision;
pub mod events;
pub mod halo;
pub mod menu;
pub mod physics;
pub mod scene;
pub mod tick;
pub mod trail;

pub use ball::Ball;
pub use body::{Body, Contact, ContactHandler, Side, category};
pub use cannon::Cannon;
pub use events::GameEvent;
pub use halo::{Halo, HaloKind, LifeBar, PowerUp, PowerUpKind, Shield};
pub use menu::{Menu, MenuState};
pub use scene::Scene;
pub use tick::{TickInput, halo_lined_up, tick};
pub use trail::Trail;
