//! Brick effects: the catalog, the handlers, and the double combinator
//!
//! Every brick owns one `Effect`. When the brick is struck for the first
//! time the effect is applied exactly once (the hit dispatcher in the tick
//! guards this with the brick's destroyed flag). Handlers are side-effect
//! only: they adjust session counters and enqueue spawn requests; the
//! orchestrator materializes the entities.
//!
//! `Double` composes two sub-effects into one. Each sub-effect carries its
//! own baseline decrement, so the combinator credits one brick back: the
//! counter keeps tracking remaining distinct bricks no matter how deep the
//! composition nests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::{Session, SpawnRequest};

/// The fixed set of effect kinds and their numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    SplitPucks = 0,
    ExtraPaddle = 1,
    CameraShift = 2,
    ExtraLife = 3,
    Double = 4,
    Basic = 5,
}

impl EffectKind {
    /// Number of kinds participating in the random behavior roll
    /// (codes 0..=4; `Basic` only arrives via the coin flip or fallback)
    pub const BEHAVIOR_COUNT: u32 = 5;

    pub fn from_code(code: u32) -> Self {
        match code {
            0 => EffectKind::SplitPucks,
            1 => EffectKind::ExtraPaddle,
            2 => EffectKind::CameraShift,
            3 => EffectKind::ExtraLife,
            4 => EffectKind::Double,
            _ => EffectKind::Basic,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Tag of the entity that struck the brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitterTag {
    /// The main ball
    Ball,
    /// A split-off puck
    Puck,
    /// A paddle (main or temporary)
    Paddle,
}

/// Call arguments for an effect application
#[derive(Debug, Clone, Copy)]
pub struct HitContext {
    /// Center of the struck brick (spawn point for pickups and pucks)
    pub brick_center: Vec2,
    /// What hit the brick
    pub hitter: HitterTag,
}

/// A brick's reaction to being struck
///
/// `Double` owns two sub-effects; nesting is bounded at assignment time
/// (see `strategy`), not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Count the brick down and let it leave the field
    Basic,
    /// Basic, plus a temporary paddle while none is alive
    ExtraPaddle,
    /// Basic, plus a falling life pickup at the brick's center
    ExtraLife,
    /// Basic, plus a follow camera when the main ball struck the brick
    CameraShift,
    /// Basic, plus a pair of pucks at the brick's center
    SplitPucks,
    /// Both sub-effects in order, then one brick credited back
    Double(Box<Effect>, Box<Effect>),
}

impl Effect {
    /// Apply the effect to the session. Side effects only.
    pub fn apply(&self, ctx: &HitContext, session: &mut Session) {
        match self {
            Effect::Basic => session.brick_destroyed(),
            Effect::ExtraPaddle => {
                session.brick_destroyed();
                session.request(SpawnRequest::TempPaddle);
            }
            Effect::ExtraLife => {
                session.brick_destroyed();
                session.request(SpawnRequest::Heart(ctx.brick_center));
            }
            Effect::CameraShift => {
                session.brick_destroyed();
                // Pucks and paddles never attach the camera
                if ctx.hitter == HitterTag::Ball {
                    session.request(SpawnRequest::CameraFollow);
                }
            }
            Effect::SplitPucks => {
                session.brick_destroyed();
                session.request(SpawnRequest::Pucks(ctx.brick_center));
            }
            Effect::Double(first, second) => {
                first.apply(ctx, session);
                second.apply(ctx, session);
                session.brick_credited();
            }
        }
    }

    /// Nesting depth of `Double` wrappers (0 for any atomic effect)
    pub fn double_depth(&self) -> u32 {
        match self {
            Effect::Double(first, second) => {
                1 + first.double_depth().max(second.double_depth())
            }
            _ => 0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Basic => EffectKind::Basic,
            Effect::ExtraPaddle => EffectKind::ExtraPaddle,
            Effect::ExtraLife => EffectKind::ExtraLife,
            Effect::CameraShift => EffectKind::CameraShift,
            Effect::SplitPucks => EffectKind::SplitPucks,
            Effect::Double(_, _) => EffectKind::Double,
        }
    }
}
