use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::game_loop::{GameBroadcast, GameCommand};
use crate::protocol::{ClientMsg, ServerMsg};

/// Shared app state passed to each WebSocket handler
#[derive(Clone)]
pub struct AppState {
    pub game_tx: mpsc::Sender<GameCommand>,
    pub broadcast_tx: broadcast::Sender<GameBroadcast>,
}

/// HTTP handler for WebSocket upgrade
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let (mut sink, mut stream) = socket.split();

    // Ask the game loop for a seat
    let (resp_tx, resp_rx) = oneshot::channel();
    if app_state
        .game_tx
        .send(GameCommand::Join { response: resp_tx })
        .await
        .is_err()
    {
        tracing::error!("Failed to send Join command");
        return;
    }

    let my_id = match resp_rx.await {
        Ok(Some(id)) => id,
        Ok(None) => {
            // Match is full: tell the client once, then force the
            // connection closed.
            if let Ok(json) = serde_json::to_string(&ServerMsg::Full) {
                let _ = sink.send(Message::Text(json.into())).await;
            }
            let _ = sink.send(Message::Close(None)).await;
            return;
        }
        Err(_) => {
            tracing::error!("Failed to receive join reply");
            return;
        }
    };

    tracing::info!("Player {} connected", my_id);

    // Subscribe to broadcasts
    let mut broadcast_rx = app_state.broadcast_tx.subscribe();

    loop {
        tokio::select! {
            // Client -> Server
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Malformed frames are dropped without an error
                        // surfaced to the client.
                        if let Ok(ClientMsg::Move { y }) = serde_json::from_str::<ClientMsg>(&text) {
                            let _ = app_state
                                .game_tx
                                .send(GameCommand::Move { id: my_id, y })
                                .await;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {} // Ignore ping/pong/binary
                }
            }

            // Server -> Client (broadcast)
            result = broadcast_rx.recv() => {
                match result {
                    Ok(GameBroadcast::State(msg)) => {
                        if let Ok(json) = serde_json::to_string(&ServerMsg::State(msg)) {
                            if sink.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Player {} lagged by {} state frames", my_id, n);
                        // Continue - every state frame is a full snapshot
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    // Cleanup on disconnect
    let _ = app_state
        .game_tx
        .send(GameCommand::Leave { id: my_id })
        .await;
    tracing::info!("Player {} disconnected", my_id);
}
