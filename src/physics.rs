//! Ball integration, collision and scoring for one fixed simulation step.

use crate::court::{
    BALL_SPAWN_X, BALL_SPAWN_Y, COURT_HEIGHT, COURT_WIDTH, MAX_BOUNCE_ANGLE, SERVE_SPEED_X,
    SERVE_SPEED_Y, SPEED_INCREMENT,
};
use crate::player::{Player, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The singleton ball, broadcast verbatim inside every `state` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            x: BALL_SPAWN_X,
            y: BALL_SPAWN_Y,
            vx: SERVE_SPEED_X,
            vy: SERVE_SPEED_Y,
        }
    }

    /// Return to center and serve horizontally at `dir` (sign picks the
    /// side served toward). Vertical speed is fixed, never randomized.
    pub fn reset(&mut self, dir: f64) {
        self.x = BALL_SPAWN_X;
        self.y = BALL_SPAWN_Y;
        self.vx = dir;
        self.vy = SERVE_SPEED_Y;
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the ball one fixed step against the live paddle set.
/// Mutates player scores when a goal line is crossed.
pub fn step(ball: &mut Ball, players: &mut HashMap<u32, Player>) {
    ball.x += ball.vx;
    ball.y += ball.vy;

    // Top/bottom wall reflection. Sign flip only: the position is left
    // where it landed, so the ball may transiently sit outside the court.
    if ball.y < 0.0 || ball.y > COURT_HEIGHT {
        ball.vy = -ball.vy;
    }

    for p in players.values() {
        let hit = ball.x < p.x + p.width / 2.0
            && ball.x > p.x - p.width / 2.0
            && ball.y < p.y + p.height / 2.0
            && ball.y > p.y - p.height / 2.0;
        if hit {
            // Speed boost first: each component grows by a fixed increment
            // without changing its sign.
            ball.vx += if ball.vx > 0.0 {
                SPEED_INCREMENT
            } else {
                -SPEED_INCREMENT
            };
            ball.vy += if ball.vy > 0.0 {
                SPEED_INCREMENT
            } else {
                -SPEED_INCREMENT
            };

            // Outgoing angle depends on where the ball struck the paddle:
            // center returns flat, edges deflect up to MAX_BOUNCE_ANGLE.
            // The pre-collision vy is discarded by the recompute.
            let t = (ball.y - p.y) / (p.height / 2.0);
            let angle = t * MAX_BOUNCE_ANGLE;

            let speed = ball.vx.hypot(ball.vy);
            let dir = if ball.vx > 0.0 { 1.0 } else { -1.0 };
            ball.vx = speed * angle.cos() * -dir;
            ball.vy = speed * angle.sin();
        }
    }

    // Goal lines. Serve goes toward the side that conceded.
    if ball.x < 0.0 {
        award_point(players, Side::Right);
        ball.reset(-SERVE_SPEED_X);
    }
    if ball.x > COURT_WIDTH {
        award_point(players, Side::Left);
        ball.reset(SERVE_SPEED_X);
    }
}

/// No-op when the scoring side has no paddle (mid-disconnect race); the
/// caller still resets the ball.
fn award_point(players: &mut HashMap<u32, Player>, side: Side) {
    if let Some(p) = players.values_mut().find(|p| p.side() == side) {
        p.score += 1;
    }
}
