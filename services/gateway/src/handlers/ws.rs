//! Live invalidation feed over WebSocket
//!
//! Clients subscribe to coarse topics and receive tiny invalidation
//! notices when something they watch changes; they then re-fetch through
//! the regular HTTP endpoints. No domain payloads travel on this socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use scoreboard::{SubscriptionSet, Topic};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::models::{ClientCommand, ServerMessage};
use crate::state::AppState;

/// `GET /v1/ws` — upgrade to the invalidation feed. No identity needed;
/// the socket carries no data worth gating.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

fn topic_strings(subscriptions: &SubscriptionSet) -> Vec<String> {
    subscriptions.iter().map(Topic::to_topic_string).collect()
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut invalidations = state.invalidations.subscribe();
    let mut subscriptions = SubscriptionSet::new();

    loop {
        tokio::select! {
            published = invalidations.recv() => {
                let message = match published {
                    Ok(topics) => {
                        if !subscriptions.wants_any(&topics) {
                            continue;
                        }
                        let relevant: Vec<String> = topics
                            .iter()
                            .filter(|t| subscriptions.contains(t))
                            .map(Topic::to_topic_string)
                            .collect();
                        ServerMessage::Invalidation { topics: relevant }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        // Dropped notices cannot be replayed; everything the
                        // client watches must be treated as stale.
                        warn!(missed, "ws client lagged behind invalidation feed");
                        ServerMessage::Resync {
                            topics: topic_strings(&subscriptions),
                        }
                    }
                    Err(RecvError::Closed) => break,
                };
                if send_json(&mut sender, &message).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        debug!(error = %err, "ws receive error");
                        break;
                    }
                };
                let Some(reply) = handle_command(&text, &mut subscriptions) else {
                    continue;
                };
                if send_json(&mut sender, &reply).await.is_err() {
                    break;
                }
            }
        }
    }
    debug!("ws client disconnected");
}

/// Apply one client command to the subscription set.
///
/// Unknown topic strings are reported back in `rejected` rather than
/// failing the whole command; unknown actions get no reply at all.
fn handle_command(text: &str, subscriptions: &mut SubscriptionSet) -> Option<ServerMessage> {
    let command: ClientCommand = match serde_json::from_str(text) {
        Ok(command) => command,
        Err(err) => {
            debug!(error = %err, "ignoring malformed ws command");
            return None;
        }
    };

    match command.action.as_str() {
        "ping" => Some(ServerMessage::Pong),
        action @ ("subscribe" | "unsubscribe") => {
            let mut accepted = Vec::new();
            let mut rejected = Vec::new();
            for raw in &command.topics {
                match Topic::parse(raw) {
                    Some(topic) => {
                        if action == "subscribe" {
                            subscriptions.subscribe(topic);
                        } else {
                            subscriptions.unsubscribe(&topic);
                        }
                        accepted.push(raw.clone());
                    }
                    None => rejected.push(raw.clone()),
                }
            }
            Some(ServerMessage::Ack {
                action: action.to_string(),
                topics: accepted,
                rejected,
            })
        }
        other => {
            debug!(action = other, "ignoring unknown ws action");
            None
        }
    }
}

async fn send_json(
    sender: &mut (impl SinkExt<Message> + Unpin),
    message: &ServerMessage,
) -> Result<(), ()> {
    let payload = match serde_json::to_string(message) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize ws message");
            return Err(());
        }
    };
    sender.send(Message::Text(payload)).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::TeamId;

    #[test]
    fn test_subscribe_command_updates_set() {
        let mut subs = SubscriptionSet::new();
        let team_id = TeamId::new();
        let text = format!(
            r#"{{"action":"subscribe","topics":["scoring","team:{}","bogus"]}}"#,
            team_id
        );
        let reply = handle_command(&text, &mut subs);
        match reply {
            Some(ServerMessage::Ack {
                action,
                topics,
                rejected,
            }) => {
                assert_eq!(action, "subscribe");
                assert_eq!(topics.len(), 2);
                assert_eq!(rejected, vec!["bogus".to_string()]);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(subs.contains(&Topic::Scoring));
        assert!(subs.contains(&Topic::Team(team_id)));
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn test_unsubscribe_command() {
        let mut subs = SubscriptionSet::new();
        subs.subscribe(Topic::Scoring);
        subs.subscribe(Topic::Catalog);
        let reply = handle_command(
            r#"{"action":"unsubscribe","topics":["scoring"]}"#,
            &mut subs,
        );
        assert!(matches!(reply, Some(ServerMessage::Ack { .. })));
        assert!(!subs.contains(&Topic::Scoring));
        assert!(subs.contains(&Topic::Catalog));
    }

    #[test]
    fn test_ping_and_garbage() {
        let mut subs = SubscriptionSet::new();
        assert!(matches!(
            handle_command(r#"{"action":"ping"}"#, &mut subs),
            Some(ServerMessage::Pong)
        ));
        assert!(handle_command("not json", &mut subs).is_none());
        assert!(handle_command(r#"{"action":"dance"}"#, &mut subs).is_none());
    }
}
