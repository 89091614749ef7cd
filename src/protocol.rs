//! Wire messages. Frames are JSON text with a `type` tag carrying the
//! event names the browser client already speaks: `move`, `full`, `state`.

use crate::physics::Ball;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// === Server -> Client ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMsg {
    /// The match already has two players. Sent once, then the connection
    /// is closed by the server.
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "state")]
    State(StateMsg),
}

/// Full snapshot, broadcast identically to every client after each
/// scheduler pass. Players are keyed by their connection id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMsg {
    // JSON object keys are strings, and the internally tagged `ServerMsg`
    // buffers its content, so serde_json's built-in string->integer key
    // conversion doesn't apply here; parse the keys back manually.
    #[serde(deserialize_with = "u32_keyed_map")]
    pub players: HashMap<u32, Player>,
    pub ball: Ball,
}

fn u32_keyed_map<'de, D>(deserializer: D) -> Result<HashMap<u32, Player>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = HashMap::<String, Player>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| k.parse::<u32>().map(|k| (k, v)).map_err(serde::de::Error::custom))
        .collect()
}

// === Client -> Server ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMsg {
    /// Target y-coordinate for the sender's paddle. Forwarded to the
    /// game loop without range validation.
    #[serde(rename = "move")]
    Move { y: f64 },
}
