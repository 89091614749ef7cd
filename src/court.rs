//! Playfield geometry and serve constants.
//!
//! These numbers are part of the wire contract: the browser client renders
//! against the same values, so changing any of them breaks compatibility.

pub const COURT_WIDTH: f64 = 800.0;
pub const COURT_HEIGHT: f64 = 600.0;

pub const PADDLE_WIDTH: f64 = 20.0;
pub const PADDLE_HEIGHT: f64 = 1000.0;
pub const PADDLE_LEFT_X: f64 = 50.0;
pub const PADDLE_RIGHT_X: f64 = 750.0;
pub const PADDLE_SPAWN_Y: f64 = 300.0;

pub const BALL_SPAWN_X: f64 = 400.0;
pub const BALL_SPAWN_Y: f64 = 300.0;
/// Horizontal serve speed; the sign picks the side served toward.
pub const SERVE_SPEED_X: f64 = 4.0;
pub const SERVE_SPEED_Y: f64 = 3.0;

/// Added to each velocity component on every paddle hit.
pub const SPEED_INCREMENT: f64 = 0.5;
/// Maximum deflection off a paddle edge (60 degrees).
pub const MAX_BOUNCE_ANGLE: f64 = std::f64::consts::FRAC_PI_3;
