use crate::config::ServerConfig;
use crate::protocol::StateMsg;
use crate::state::GameState;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Commands from client connections to the game loop
pub enum GameCommand {
    /// Ask for a seat. Replies with the assigned player id, or `None`
    /// when the match is full.
    Join {
        response: oneshot::Sender<Option<u32>>,
    },
    Leave {
        id: u32,
    },
    Move {
        id: u32,
        y: f64,
    },
}

/// Broadcasts from game loop to all clients
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    State(StateMsg),
}

/// Converts wall-clock time into a whole number of fixed simulation steps.
///
/// `advance` walks the internal clock forward in exact frame multiples, so
/// simulation time never drifts against the timer driving it: a late
/// invocation yields a burst of catch-up steps rather than one longer step,
/// and a partial frame is carried to the next call.
pub struct FixedTimestep {
    frame: Duration,
    last: Instant,
}

impl FixedTimestep {
    pub fn new(tick_rate_hz: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / tick_rate_hz as f64),
            last: now,
        }
    }

    /// Whole number of fixed steps elapsed since the previous call.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let mut steps = 0;
        while now.duration_since(self.last) >= self.frame {
            self.last += self.frame;
            steps += 1;
        }
        steps
    }
}

/// Run the main game loop. Owns all game state; every mutation funnels
/// through this task, which keeps the simulation single-writer.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    config: ServerConfig,
) {
    let mut state = GameState::new();

    let tick_duration = Duration::from_secs_f64(1.0 / config.tick_rate_hz as f64);
    let mut tick_interval = tokio::time::interval(tick_duration);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut timestep = FixedTimestep::new(config.tick_rate_hz, Instant::now());

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                for _ in 0..timestep.advance(Instant::now()) {
                    state.step();
                }
                // One snapshot per timer pass, even when no step ran.
                let _ = broadcast_tx.send(GameBroadcast::State(state.snapshot()));
            }

            Some(cmd) = cmd_rx.recv() => {
                match cmd {
                    GameCommand::Join { response } => {
                        let admitted = state.add_player().map(|(id, _)| id);
                        match admitted {
                            Some(id) => tracing::info!("Player {} joined", id),
                            None => tracing::info!("Connection rejected, match is full"),
                        }
                        if response.send(admitted).is_err() {
                            // The handler died mid-handshake and will never
                            // send Leave for an id it never learned. Release
                            // the seat here or it stays claimed forever.
                            if let Some(id) = admitted {
                                state.remove_player(id);
                                tracing::info!(
                                    "Player {} dropped during join, seat released",
                                    id
                                );
                            }
                        }
                    }
                    GameCommand::Leave { id } => {
                        state.remove_player(id);
                        tracing::info!("Player {} left", id);
                    }
                    GameCommand::Move { id, y } => {
                        state.set_paddle_y(id, y);
                    }
                }
            }

            else => break,
        }
    }

    tracing::info!("Game loop ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A connection that dies between sending Join and awaiting the reply
    /// must not leave a ghost player holding a seat.
    #[tokio::test]
    async fn join_with_dropped_reply_channel_frees_the_seat() {
        let (game_tx, game_rx) = mpsc::channel::<GameCommand>(16);
        let (broadcast_tx, _) = broadcast::channel::<GameBroadcast>(16);
        tokio::spawn(run_game_loop(
            game_rx,
            broadcast_tx,
            ServerConfig::default(),
        ));

        // Handler future dropped before the reply arrives.
        let (dead_tx, dead_rx) = oneshot::channel();
        drop(dead_rx);
        game_tx
            .send(GameCommand::Join { response: dead_tx })
            .await
            .unwrap();

        // Commands are processed in order, so both seats must still be
        // claimable by real connections afterwards.
        for seat in 0..2 {
            let (resp_tx, resp_rx) = oneshot::channel();
            game_tx
                .send(GameCommand::Join { response: resp_tx })
                .await
                .unwrap();
            assert!(
                resp_rx.await.unwrap().is_some(),
                "seat {} should be free after the aborted join",
                seat
            );
        }

        // And the match really is full now: a third live join is rejected.
        let (resp_tx, resp_rx) = oneshot::channel();
        game_tx
            .send(GameCommand::Join { response: resp_tx })
            .await
            .unwrap();
        assert!(resp_rx.await.unwrap().is_none());
    }

    fn frame() -> Duration {
        Duration::from_secs_f64(1.0 / 60.0)
    }

    #[test]
    fn no_steps_before_a_full_frame_elapses() {
        let start = Instant::now();
        let mut ts = FixedTimestep::new(60, start);

        assert_eq!(ts.advance(start), 0);
        assert_eq!(ts.advance(start + frame() / 2), 0);
    }

    #[test]
    fn one_step_per_frame() {
        let start = Instant::now();
        let mut ts = FixedTimestep::new(60, start);

        assert_eq!(ts.advance(start + frame()), 1);
        assert_eq!(ts.advance(start + frame()), 0, "frame already consumed");
        assert_eq!(ts.advance(start + frame() * 2), 1);
    }

    #[test]
    fn stall_produces_a_catch_up_burst() {
        let start = Instant::now();
        let mut ts = FixedTimestep::new(60, start);

        assert_eq!(ts.advance(start + frame() * 10), 10);
        assert_eq!(ts.advance(start + frame() * 10), 0);
    }

    #[test]
    fn partial_frames_carry_over() {
        let start = Instant::now();
        let mut ts = FixedTimestep::new(60, start);

        // 2.5 frames: two steps now, the half frame is carried.
        assert_eq!(ts.advance(start + frame() * 5 / 2), 2);
        assert_eq!(ts.advance(start + frame() * 3), 1);
    }
}
