//! Game state and core simulation types
//!
//! Everything a session needs to be replayed deterministically lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::lives::LivesPanel;
use super::rect::Rect;
use super::registry::Session;
use super::strategy::assign_effect;
use crate::GameConfig;
use crate::board_center;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Terminal; the session waits for a restart-or-quit decision
    GameOver(Outcome),
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Distinguishes the main ball from split-off pucks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    Main,
    Puck,
}

/// A ball or puck entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Total bounces so far; the camera detach check reads the delta
    pub collisions: u32,
}

impl Ball {
    pub fn new(id: u32, kind: BallKind, pos: Vec2, vel: Vec2) -> Self {
        let radius = match kind {
            BallKind::Main => BALL_DIAMETER / 2.0,
            BallKind::Puck => BALL_DIAMETER * PUCK_SCALE / 2.0,
        };
        Self {
            id,
            kind,
            pos,
            vel,
            radius,
            collisions: 0,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size / 2.0)
    }
}

/// A second paddle with a limited hit budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempPaddle {
    pub paddle: Paddle,
    /// Qualifying hits left before retirement
    pub hits_left: u32,
}

impl TempPaddle {
    /// Spawn at board mid-height with the full budget
    pub fn new() -> Self {
        Self {
            paddle: Paddle::at(board_center()),
            hits_left: TEMP_PADDLE_HITS,
        }
    }

    /// A ball or puck bounced off this paddle
    pub fn register_hit(&mut self) {
        self.hits_left = self.hits_left.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.hits_left == 0
    }
}

impl Default for TempPaddle {
    fn default() -> Self {
        Self::new()
    }
}

/// A destructible brick carrying one effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    pub effect: Effect,
    /// Set when the effect has fired; guards against double application
    pub destroyed: bool,
}

/// A falling life pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set on contact with the main paddle, polled by the orchestrator
    pub caught: bool,
}

impl Heart {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, HEART_FALL_SPEED),
            caught: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(HEART_SIZE / 2.0))
    }
}

/// Follow camera attached to the main ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraFollow {
    /// Tracks the ball's position each frame
    pub focus: Vec2,
    pub zoom: f32,
    /// Ball collision total when the camera attached
    pub collisions_at_attach: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG; strategy assignment and velocity signs draw from it
    pub rng: Pcg32,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub temp_paddle: Option<TempPaddle>,
    pub ball: Ball,
    pub pucks: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub hearts: Vec<Heart>,
    pub camera: Option<CameraFollow>,
    /// Counters and the pending spawn queue
    pub session: Session,
    pub lives_ui: LivesPanel,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session: full brick grid, centered ball, all
    /// counters at their starting values.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut next_id = 1;
        let bricks = build_grid(&config, &mut rng, &mut next_id);

        let ball_vel = random_diagonal(&mut rng, BALL_AXIS_SPEED);
        let ball = Ball::new(0, BallKind::Main, board_center(), ball_vel);

        let paddle = Paddle::at(Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT - PADDLE_MARGIN));

        let session = Session::new(config.brick_total());
        let lives_ui = LivesPanel::new(session.lives);

        log::info!(
            "new session: seed {seed}, {}x{} grid, {} bricks",
            config.cols,
            config.rows,
            bricks.len()
        );

        Self {
            seed,
            rng,
            config,
            phase: GamePhase::Playing,
            time_ticks: 0,
            paddle,
            temp_paddle: None,
            ball,
            pucks: Vec::new(),
            bricks,
            hearts: Vec::new(),
            camera: None,
            session,
            lives_ui,
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put the ball back at board center with a fresh random diagonal
    /// velocity (after it fell out the bottom)
    pub fn reset_ball(&mut self) {
        self.ball.pos = board_center();
        self.ball.vel = random_diagonal(&mut self.rng, BALL_AXIS_SPEED);
    }
}

/// A diagonal velocity of fixed per-axis magnitude, each sign chosen
/// independently at random
pub fn random_diagonal<R: Rng>(rng: &mut R, axis_speed: f32) -> Vec2 {
    let x = if rng.random_bool(0.5) { axis_speed } else { -axis_speed };
    let y = if rng.random_bool(0.5) { axis_speed } else { -axis_speed };
    Vec2::new(x, y)
}

/// Lay out the brick grid under the top wall and assign each brick an
/// effect
fn build_grid(config: &GameConfig, rng: &mut Pcg32, next_id: &mut u32) -> Vec<Brick> {
    let cols = config.cols;
    let rows = config.rows;
    let usable = BOARD_WIDTH - 2.0 * WALL_WIDTH;
    let brick_width = (usable - BRICK_PADDING * (cols as f32 - 1.0)) / cols as f32;

    let mut bricks = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = WALL_WIDTH + col as f32 * (brick_width + BRICK_PADDING);
            let y = WALL_WIDTH + row as f32 * (BRICK_HEIGHT + BRICK_PADDING);
            let rect = Rect::from_top_left(Vec2::new(x, y), Vec2::new(brick_width, BRICK_HEIGHT));
            let id = *next_id;
            *next_id += 1;
            bricks.push(Brick {
                id,
                rect,
                effect: assign_effect(rng),
                destroyed: false,
            });
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_state_grid() {
        let state = GameState::new(test_config(), 1);
        assert_eq!(state.bricks.len(), (DEFAULT_COLS * DEFAULT_ROWS) as usize);
        assert_eq!(state.session.bricks_left, DEFAULT_COLS * DEFAULT_ROWS);
        assert!(state.bricks.iter().all(|b| !b.destroyed));

        // All bricks fit between the side walls
        for brick in &state.bricks {
            assert!(brick.rect.min().x >= WALL_WIDTH - 0.01);
            assert!(brick.rect.max().x <= BOARD_WIDTH - WALL_WIDTH + 0.01);
        }
    }

    #[test]
    fn test_ball_launches_diagonally() {
        let state = GameState::new(test_config(), 2);
        assert_eq!(state.ball.pos, board_center());
        assert_eq!(state.ball.vel.x.abs(), BALL_AXIS_SPEED);
        assert_eq!(state.ball.vel.y.abs(), BALL_AXIS_SPEED);
    }

    #[test]
    fn test_reset_ball_rerandomizes_velocity() {
        let mut state = GameState::new(test_config(), 3);
        state.ball.pos = Vec2::new(10.0, BOARD_HEIGHT + 40.0);
        state.reset_ball();
        assert_eq!(state.ball.pos, board_center());
        assert_eq!(state.ball.vel.x.abs(), BALL_AXIS_SPEED);
        assert_eq!(state.ball.vel.y.abs(), BALL_AXIS_SPEED);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = GameState::new(test_config(), 77);
        let b = GameState::new(test_config(), 77);
        for (x, y) in a.bricks.iter().zip(&b.bricks) {
            assert_eq!(x.effect, y.effect);
        }
        assert_eq!(a.ball.vel, b.ball.vel);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(test_config(), 4);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
        assert!(state.bricks.iter().all(|brick| brick.id < a));
    }

    #[test]
    fn test_temp_paddle_budget() {
        let mut tp = TempPaddle::new();
        assert!(!tp.expired());
        for _ in 0..TEMP_PADDLE_HITS {
            tp.register_hit();
        }
        assert!(tp.expired());
        // Saturates, never wraps
        tp.register_hit();
        assert_eq!(tp.hits_left, 0);
    }
}
