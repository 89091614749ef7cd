use crate::court::{
    COURT_WIDTH, PADDLE_HEIGHT, PADDLE_LEFT_X, PADDLE_RIGHT_X, PADDLE_SPAWN_Y, PADDLE_WIDTH,
};
use serde::{Deserialize, Serialize};

/// Which half of the court a paddle defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn paddle_x(self) -> f64 {
        match self {
            Side::Left => PADDLE_LEFT_X,
            Side::Right => PADDLE_RIGHT_X,
        }
    }
}

/// Paddle state, broadcast verbatim inside every `state` frame.
///
/// Only `y` is writable by the owning client; `x`, the dimensions and the
/// score are set by the server alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub score: u32,
}

impl Player {
    pub fn new(side: Side) -> Self {
        Self {
            x: side.paddle_x(),
            y: PADDLE_SPAWN_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            score: 0,
        }
    }

    /// Side is derived from the fixed paddle x. The goal test awards a
    /// point by which half of the court a paddle sits in.
    pub fn side(&self) -> Side {
        if self.x < COURT_WIDTH / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_spawns_on_its_side() {
        let left = Player::new(Side::Left);
        assert_eq!(left.x, 50.0);
        assert_eq!(left.y, 300.0);
        assert_eq!(left.width, 20.0);
        assert_eq!(left.height, 1000.0);
        assert_eq!(left.score, 0);

        let right = Player::new(Side::Right);
        assert_eq!(right.x, 750.0);
    }

    #[test]
    fn side_is_derived_from_x() {
        assert_eq!(Player::new(Side::Left).side(), Side::Left);
        assert_eq!(Player::new(Side::Right).side(), Side::Right);
    }
}
