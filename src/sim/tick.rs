//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame: paddle input, ball and puck
//! motion with collision response (brick effects fire here, exactly once
//! per brick), then the per-frame polling ladder that retires transient
//! entities and decides win or loss. Once the phase is terminal the state
//! freezes until the session is rebuilt.

use super::effect::{Effect, HitContext, HitterTag};
use super::rect::{Rect, circle_rect_collision, reflect_velocity};
use super::registry::SpawnRequest;
use super::state::{
    Ball, BallKind, Brick, CameraFollow, GamePhase, GameState, Heart, Outcome, Paddle, TempPaddle,
    random_diagonal,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle direction: -1 left, 0 hold, +1 right
    pub dir: f32,
    /// Let the simulation steer the paddle itself (headless/demo runs)
    pub autopilot: bool,
    /// Debug: clear the brick field, forcing the win path
    pub clear_bricks: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Terminal phases freeze the world until the session is rebuilt
    if matches!(state.phase, GamePhase::GameOver(_)) {
        return;
    }

    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        input.dir = autopilot_dir(state);
    }
    let input = &input;

    if input.clear_bricks {
        log::debug!("debug input: clearing {} bricks", state.session.bricks_left);
        state.session.bricks_left = 0;
        for brick in &mut state.bricks {
            brick.destroyed = true;
        }
    }

    // Both paddles obey the same input
    move_paddle(&mut state.paddle, input.dir, dt);
    if let Some(tp) = &mut state.temp_paddle {
        move_paddle(&mut tp.paddle, input.dir, dt);
    }

    // Ball and puck motion; brick hits collect here so the effects run
    // after the borrow of the entity arrays ends
    let mut hits: Vec<(Effect, HitContext)> = Vec::new();
    {
        let GameState {
            ball,
            pucks,
            bricks,
            paddle,
            temp_paddle,
            ..
        } = state;
        step_ball(ball, dt, paddle, temp_paddle, bricks, &mut hits);
        for puck in pucks.iter_mut() {
            step_ball(puck, dt, paddle, temp_paddle, bricks, &mut hits);
        }
    }

    // Each hit is a brick whose destroyed flag just flipped: apply its
    // effect exactly once, strictly before this frame's polling
    for (effect, ctx) in hits {
        effect.apply(&ctx, &mut state.session);
    }
    state.bricks.retain(|b| !b.destroyed);

    // Hearts fall; only the main paddle may catch them
    let paddle_rect = state.paddle.rect();
    for heart in &mut state.hearts {
        heart.pos += heart.vel * dt;
        if !heart.caught && paddle_rect.intersects(&heart.rect()) {
            heart.caught = true;
        }
    }

    // Camera tracks the ball while attached
    if let Some(cam) = &mut state.camera {
        cam.focus = state.ball.pos;
    }

    // Materialize the spawns queued by this frame's effects
    drain_spawn_requests(state);

    // --- per-frame polling, in the order the checks must observe ---

    // Ball out the bottom: lose a life, relaunch from center
    let ball_fell = state.ball.pos.y > BOARD_HEIGHT;
    if ball_fell {
        state.session.lose_life();
        state.reset_ball();
        log::info!("ball lost; {} lives remain", state.session.lives);
    }

    if let Some(outcome) = terminal_outcome(state, ball_fell) {
        state.phase = GamePhase::GameOver(outcome);
        state.lives_ui.refresh(state.session.lives);
        log::info!("session over: {outcome:?}");
        return;
    }

    // Temporary paddle expiry clears the spawn gate
    if state.temp_paddle.as_ref().is_some_and(TempPaddle::expired) {
        state.temp_paddle = None;
        state.session.extra_paddle_active = false;
        log::debug!("temporary paddle retired");
    }

    // Camera detaches a fixed number of ball collisions after attaching
    if let Some(cam) = &state.camera {
        if state.ball.collisions - cam.collisions_at_attach >= CAMERA_HIT_SPAN {
            state.camera = None;
            log::debug!("camera released");
        }
    }

    // Pucks that left the board are gone for good
    state.pucks.retain(|p| p.pos.y <= BOARD_HEIGHT);

    // Caught hearts convert to lives (clamped); missed ones fall away
    let GameState {
        hearts, session, ..
    } = state;
    hearts.retain(|heart| {
        if heart.caught {
            if session.gain_life() {
                log::debug!("extra life caught; {} lives", session.lives);
            } else {
                log::debug!("heart caught at full lives");
            }
            false
        } else {
            heart.pos.y <= BOARD_HEIGHT
        }
    });

    // Both displays mirror the counter
    state.lives_ui.refresh(state.session.lives);
}

/// Move a ball one step and resolve wall, paddle, and brick contacts
fn step_ball(
    ball: &mut Ball,
    dt: f32,
    paddle: &Paddle,
    temp_paddle: &mut Option<TempPaddle>,
    bricks: &mut [Brick],
    hits: &mut Vec<(Effect, HitContext)>,
) {
    ball.pos += ball.vel * dt;

    // Side and top walls reflect; the bottom edge is open
    let min_x = WALL_WIDTH + ball.radius;
    let max_x = BOARD_WIDTH - WALL_WIDTH - ball.radius;
    if ball.pos.x < min_x && ball.vel.x < 0.0 {
        ball.pos.x = min_x;
        ball.vel.x = -ball.vel.x;
        ball.collisions += 1;
    } else if ball.pos.x > max_x && ball.vel.x > 0.0 {
        ball.pos.x = max_x;
        ball.vel.x = -ball.vel.x;
        ball.collisions += 1;
    }
    let min_y = WALL_WIDTH + ball.radius;
    if ball.pos.y < min_y && ball.vel.y < 0.0 {
        ball.pos.y = min_y;
        ball.vel.y = -ball.vel.y;
        ball.collisions += 1;
    }

    // Main paddle
    bounce_off(ball, &paddle.rect());

    // Temporary paddle; each qualifying bounce spends one hit of its budget
    if let Some(tp) = temp_paddle {
        if bounce_off(ball, &tp.paddle.rect()) {
            tp.register_hit();
        }
    }

    // Bricks: first live contact wins; the destroyed flag keeps the
    // effect from firing again for later colliders
    for brick in bricks.iter_mut() {
        if brick.destroyed {
            continue;
        }
        let contact = circle_rect_collision(ball.pos, ball.radius, &brick.rect);
        if contact.hit {
            if ball.vel.dot(contact.normal) < 0.0 {
                ball.vel = reflect_velocity(ball.vel, contact.normal);
            }
            ball.pos += contact.normal * contact.penetration;
            ball.collisions += 1;

            brick.destroyed = true;
            let hitter = match ball.kind {
                BallKind::Main => HitterTag::Ball,
                BallKind::Puck => HitterTag::Puck,
            };
            hits.push((
                brick.effect.clone(),
                HitContext {
                    brick_center: brick.rect.center,
                    hitter,
                },
            ));
            break;
        }
    }
}

/// Bounce a ball off a paddle rect. Returns whether contact happened.
fn bounce_off(ball: &mut Ball, rect: &Rect) -> bool {
    let contact = circle_rect_collision(ball.pos, ball.radius, rect);
    if !contact.hit {
        return false;
    }
    // Only reflect when moving into the surface, so a ball grazing along
    // the paddle does not get stuck flipping every frame
    if ball.vel.dot(contact.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, contact.normal);
    }
    ball.pos += contact.normal * contact.penetration;
    ball.collisions += 1;
    true
}

fn move_paddle(paddle: &mut Paddle, dir: f32, dt: f32) {
    let dir = dir.clamp(-1.0, 1.0);
    paddle.pos.x += dir * PADDLE_SPEED * dt;
    let half = paddle.size.x / 2.0;
    paddle.pos.x = paddle
        .pos
        .x
        .clamp(WALL_WIDTH + half, BOARD_WIDTH - WALL_WIDTH - half);
}

/// Steering for headless/demo runs: track the ball on its way down, drift
/// toward a falling heart otherwise
fn autopilot_dir(state: &GameState) -> f32 {
    let target = if state.ball.vel.y < 0.0 {
        state
            .hearts
            .iter()
            .find(|h| !h.caught)
            .map(|h| h.pos.x)
            .unwrap_or(state.ball.pos.x)
    } else {
        // Lead the ball a little toward where it is heading
        state.ball.pos.x + state.ball.vel.x * 0.25
    };
    let delta = target - state.paddle.pos.x;
    if delta.abs() > 4.0 { delta.signum() } else { 0.0 }
}

/// Materialize the spawn requests effects queued this frame
fn drain_spawn_requests(state: &mut GameState) {
    for request in state.session.take_requests() {
        match request {
            SpawnRequest::TempPaddle => {
                // Single global gate: at most one temporary paddle, ever
                if !state.session.extra_paddle_active {
                    state.session.extra_paddle_active = true;
                    state.temp_paddle = Some(TempPaddle::new());
                    log::debug!("temporary paddle spawned");
                }
            }
            SpawnRequest::Heart(pos) => {
                let id = state.next_entity_id();
                state.hearts.push(Heart::new(id, pos));
                log::debug!("life pickup falling from {pos}");
            }
            SpawnRequest::Pucks(pos) => {
                for _ in 0..PUCK_COUNT {
                    let id = state.next_entity_id();
                    let vel = random_diagonal(&mut state.rng, BALL_AXIS_SPEED);
                    state.pucks.push(Ball::new(id, BallKind::Puck, pos, vel));
                }
                log::debug!("{PUCK_COUNT} pucks split from {pos}");
            }
            SpawnRequest::CameraFollow => {
                if state.camera.is_none() {
                    state.camera = Some(CameraFollow {
                        focus: state.ball.pos,
                        zoom: CAMERA_ZOOM,
                        collisions_at_attach: state.ball.collisions,
                    });
                    log::debug!("camera attached to the ball");
                }
            }
        }
    }
}

/// Terminal check. Loss takes precedence when both land in one frame.
fn terminal_outcome(state: &GameState, ball_fell: bool) -> Option<Outcome> {
    let mut outcome = None;
    if state.session.bricks_left == 0 {
        outcome = Some(Outcome::Won);
    }
    if ball_fell && state.session.lives == 0 {
        outcome = Some(Outcome::Lost);
    }
    outcome
}
