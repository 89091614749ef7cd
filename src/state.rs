//! Central game state owned by the game loop task: session registry,
//! match activation and the per-tick step entry point.

use crate::court::SERVE_SPEED_X;
use crate::physics::{self, Ball};
use crate::player::{Player, Side};
use crate::protocol::StateMsg;
use std::collections::HashMap;
use tracing::info;

/// A match holds exactly two paddles.
pub const MAX_PLAYERS: usize = 2;

pub struct GameState {
    players: HashMap<u32, Player>,
    ball: Ball,
    /// True exactly while two players are present; recomputed on every
    /// membership change. The ball only advances while active.
    active: bool,
    next_player_id: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            ball: Ball::new(),
            active: false,
            next_player_id: 1,
        }
    }

    /// Admit a connection. Returns `None` when the match is full; the
    /// caller must signal `full` and drop the connection. The first
    /// admitted player takes the left side, the next one the right.
    pub fn add_player(&mut self) -> Option<(u32, Player)> {
        if self.players.len() >= MAX_PLAYERS {
            return None;
        }

        let side = if self.players.is_empty() {
            Side::Left
        } else {
            Side::Right
        };
        let id = self.next_player_id;
        self.next_player_id += 1;

        let player = Player::new(side);
        self.players.insert(id, player.clone());

        if self.players.len() == MAX_PLAYERS {
            self.active = true;
            info!("Second player admitted, match is live");
        }
        Some((id, player))
    }

    /// Remove a player. Halts the match and resets the ball no matter
    /// which side left; the serve direction on disconnect is always +x,
    /// the same as after a left-side goal.
    pub fn remove_player(&mut self, id: u32) {
        if self.players.remove(&id).is_some() {
            self.active = false;
            self.ball.reset(SERVE_SPEED_X);
        }
    }

    /// Overwrite a paddle's y. Unknown senders are ignored. The value is
    /// taken as-is: collision geometry tolerates out-of-bounds paddles.
    pub fn set_paddle_y(&mut self, id: u32, y: f64) {
        if let Some(player) = self.players.get_mut(&id) {
            player.y = y;
        }
    }

    /// One fixed simulation step. Does nothing until the match is live.
    pub fn step(&mut self) {
        if !self.active {
            return;
        }
        physics::step(&mut self.ball, &mut self.players);
    }

    /// Snapshot for broadcasting. Pure read: repeated calls with no
    /// intervening step produce identical payloads.
    pub fn snapshot(&self) -> StateMsg {
        StateMsg {
            players: self.players.clone(),
            ball: self.ball.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.get(&id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
