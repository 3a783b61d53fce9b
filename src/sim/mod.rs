//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod effect;
pub mod lives;
pub mod rect;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod tick;

pub use effect::{Effect, EffectKind, HitContext, HitterTag};
pub use lives::{IconRow, LivesColor, LivesDisplay, LivesPanel, NumericReadout};
pub use rect::{CollisionResult, Rect, circle_rect_collision, reflect_velocity};
pub use registry::{Session, SpawnRequest};
pub use state::{
    Ball, BallKind, Brick, CameraFollow, GamePhase, GameState, Heart, Outcome, Paddle, TempPaddle,
};
pub use strategy::assign_effect;
pub use tick::{TickInput, tick};
