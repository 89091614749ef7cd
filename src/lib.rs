//! Authoritative server for a two-player paddle-and-ball game.
//!
//! The game loop task owns the canonical state and advances it on a
//! fixed 60 Hz step; WebSocket handlers feed it commands and relay its
//! state broadcasts. This module exposes the server components for use
//! in tests and binaries.

pub mod config;
pub mod court;
pub mod game_loop;
pub mod physics;
pub mod player;
pub mod protocol;
pub mod state;
pub mod ws;
