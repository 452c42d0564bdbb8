//! Physics body identities and the contact queue entry
//!
//! Categories are ordered bits; a `Contact` always stores the body with the
//! lower category first so handlers can match on `(first, second)` pairs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Category bit masks
pub mod category {
    pub const HALO: u32 = 0x1 << 0;
    pub const BALL: u32 = 0x1 << 1;
    pub const EDGE: u32 = 0x1 << 2;
    pub const SHIELD: u32 = 0x1 << 3;
    pub const LIFE_BAR: u32 = 0x1 << 4;
    pub const SHIELD_UP: u32 = 0x1 << 5;
    pub const MULTI_UP: u32 = 0x1 << 6;
}

/// Which side wall was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Normal pointing back into the field
    pub fn normal(self) -> Vec2 {
        match self {
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
        }
    }
}

/// Reference to a body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Halo(u32),
    Ball(u32),
    Edge(Side),
    Shield(u32),
    LifeBar,
    ShieldPowerUp(u32),
    MultiShotPowerUp(u32),
}

impl Body {
    pub fn category(&self) -> u32 {
        match self {
            Body::Halo(_) => category::HALO,
            Body::Ball(_) => category::BALL,
            Body::Edge(_) => category::EDGE,
            Body::Shield(_) => category::SHIELD,
            Body::LifeBar => category::LIFE_BAR,
            Body::ShieldPowerUp(_) => category::SHIELD_UP,
            Body::MultiShotPowerUp(_) => category::MULTI_UP,
        }
    }
}

/// A contact between two bodies, reported once when it begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub first: Body,
    pub second: Body,
}

impl Contact {
    /// Build a contact with the lower category first
    pub fn new(a: Body, b: Body) -> Self {
        if a.category() <= b.category() {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Receiver of contact notifications
pub trait ContactHandler {
    fn did_begin_contact(&mut self, contact: Contact);
}
