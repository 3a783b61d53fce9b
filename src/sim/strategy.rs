//! Random effect assignment at level-build time
//!
//! Per brick: a coin flip picks the plain basic effect half the time;
//! otherwise a roll over the behavior codes decides, and a `Double` outcome
//! recursively rolls its two sub-effects. The nesting counter travels by
//! value through the recursion, so each branch counts from its own depth;
//! once a branch reaches the cap, a `Double` roll is replaced by a roll
//! over the four plain behaviors. This bounds nesting and guarantees
//! termination.
//!
//! All randomness comes through the caller's generator so a seeded run
//! assigns the same effects every time.

use rand::Rng;

use super::effect::{Effect, EffectKind};
use crate::consts::MAX_DOUBLE_DEPTH;

/// Pick an effect for one brick
pub fn assign_effect<R: Rng>(rng: &mut R) -> Effect {
    if rng.random_bool(0.5) {
        return Effect::Basic;
    }
    let code = rng.random_range(0..EffectKind::BEHAVIOR_COUNT);
    build(rng, code, 0)
}

fn build<R: Rng>(rng: &mut R, code: u32, depth: u32) -> Effect {
    match EffectKind::from_code(code) {
        EffectKind::SplitPucks => Effect::SplitPucks,
        EffectKind::ExtraPaddle => Effect::ExtraPaddle,
        EffectKind::CameraShift => Effect::CameraShift,
        EffectKind::ExtraLife => Effect::ExtraLife,
        EffectKind::Basic => Effect::Basic,
        EffectKind::Double => Effect::Double(
            Box::new(roll_sub(rng, depth + 1)),
            Box::new(roll_sub(rng, depth + 1)),
        ),
    }
}

/// Fresh roll for one sub-effect of a double
fn roll_sub<R: Rng>(rng: &mut R, depth: u32) -> Effect {
    let code = rng.random_range(0..EffectKind::BEHAVIOR_COUNT);
    if code == EffectKind::Double.code() && depth >= MAX_DOUBLE_DEPTH {
        // Cap reached: replace the double with a plain behavior roll
        let fallback = rng.random_range(0..EffectKind::Double.code());
        return build(rng, fallback, depth);
    }
    build(rng, code, depth)
}
