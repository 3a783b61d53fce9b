//! Session counters and the transient-entity spawn queue
//!
//! One `Session` per game session. Brick effects only ever touch this
//! struct: they adjust the counters and enqueue spawn requests, and the
//! orchestrator materializes the requests before its per-frame polling.
//! Counters clamp at their bounds instead of under/overflowing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LIVES, START_LIVES};

/// A spawn the orchestrator should materialize this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnRequest {
    /// A temporary paddle at board mid-height (subject to the singleton gate)
    TempPaddle,
    /// A falling life pickup at the given position
    Heart(Vec2),
    /// A pair of pucks at the given position
    Pucks(Vec2),
    /// Attach the follow camera to the main ball (if none is active)
    CameraFollow,
}

/// Shared session state: counters, the extra-paddle gate, pending spawns
///
/// Lives for the whole game session; a restart rebuilds it from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Remaining distinct bricks; zero means the field is cleared
    pub bricks_left: u32,
    /// Remaining lives, always in [0, MAX_LIVES]
    pub lives: u32,
    /// Whether a temporary paddle is currently alive
    pub extra_paddle_active: bool,
    /// Spawns queued by effects, drained once per frame
    pub pending: Vec<SpawnRequest>,
}

impl Session {
    pub fn new(brick_total: u32) -> Self {
        Self {
            bricks_left: brick_total,
            lives: START_LIVES,
            extra_paddle_active: false,
            pending: Vec::new(),
        }
    }

    /// One distinct brick left the field
    pub fn brick_destroyed(&mut self) {
        self.bricks_left = self.bricks_left.saturating_sub(1);
    }

    /// Credit one brick back (the double effect's counter adjustment)
    pub fn brick_credited(&mut self) {
        self.bricks_left += 1;
    }

    /// The ball left the board; clamped at zero
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// A life pickup was caught. Returns false when already at the cap;
    /// the pickup is still consumed in that case.
    pub fn gain_life(&mut self) -> bool {
        if self.lives < MAX_LIVES {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    pub fn request(&mut self, request: SpawnRequest) {
        self.pending.push(request);
    }

    /// Hand the queued spawns to the orchestrator, leaving the queue empty
    pub fn take_requests(&mut self) -> Vec<SpawnRequest> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session() {
        let session = Session::new(56);
        assert_eq!(session.bricks_left, 56);
        assert_eq!(session.lives, START_LIVES);
        assert!(!session.extra_paddle_active);
        assert!(session.pending.is_empty());
    }

    #[test]
    fn test_bricks_saturate_at_zero() {
        let mut session = Session::new(1);
        session.brick_destroyed();
        session.brick_destroyed();
        assert_eq!(session.bricks_left, 0);
    }

    #[test]
    fn test_gain_life_clamps_at_max() {
        let mut session = Session::new(1);
        assert!(session.gain_life());
        assert_eq!(session.lives, MAX_LIVES);
        // Cap reached: the catch is a no-op for the counter
        assert!(!session.gain_life());
        assert_eq!(session.lives, MAX_LIVES);
    }

    #[test]
    fn test_lose_life_clamps_at_zero() {
        let mut session = Session::new(1);
        for _ in 0..10 {
            session.lose_life();
        }
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_take_requests_empties_queue() {
        let mut session = Session::new(1);
        session.request(SpawnRequest::TempPaddle);
        session.request(SpawnRequest::CameraFollow);
        let taken = session.take_requests();
        assert_eq!(taken.len(), 2);
        assert!(session.pending.is_empty());
    }

    proptest! {
        /// Lives never leave [0, MAX_LIVES] under any catch/fall sequence
        #[test]
        fn lives_stay_in_bounds(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut session = Session::new(8);
            for gain in ops {
                if gain {
                    session.gain_life();
                } else {
                    session.lose_life();
                }
                prop_assert!(session.lives <= MAX_LIVES);
            }
        }
    }
}
