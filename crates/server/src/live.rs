// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live event streaming support for marketplace UIs.
//!
//! This module delivers transition events to subscribers (the Event Hook
//! collaborator's delivery channel) via WebSocket connections. Events
//! are informational only and never authoritative.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Events are informational only and never authoritative
//! - No commands are executed over WebSocket connections
//! - No transition events are emitted for streaming activity
//! - Clients must still query canonical state via HTTP APIs for authoritative data

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use lawn_bid_events::{EventKind, EventSink, TransitionEvent};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live event types delivered to subscribers.
///
/// These mirror the lifecycle's transition events, plus the per-bidder
/// rejection notification that acceptance fans out, plus the connection
/// confirmation. They are derived from successful state transitions and
/// are not the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A posting was created.
    PostingCreated {
        /// The posting identifier.
        posting_id: i64,
    },
    /// A bid was submitted against an open posting.
    BidSubmitted {
        /// The posting identifier.
        posting_id: i64,
        /// The bid identifier.
        bid_id: i64,
    },
    /// A bid was accepted; the posting is now in progress.
    BidAccepted {
        /// The posting identifier.
        posting_id: i64,
        /// The accepted bid identifier.
        bid_id: i64,
    },
    /// Sibling bids were rejected by an acceptance.
    BidsRejected {
        /// The posting identifier.
        posting_id: i64,
        /// The rejected bid identifiers.
        bid_ids: Vec<i64>,
    },
    /// The accepted bidder confirmed job completion.
    JobConfirmed {
        /// The posting identifier.
        posting_id: i64,
    },
    /// The homeowner closed the job.
    JobClosed {
        /// The posting identifier.
        posting_id: i64,
        /// The completed winning bid identifier.
        bid_id: i64,
    },
    /// The homeowner reviewed the company owner.
    ReviewSubmitted {
        /// The posting identifier.
        posting_id: i64,
        /// The review identifier.
        review_id: i64,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

impl LiveEvent {
    /// Derives the delivery event for a committed transition event.
    ///
    /// Returns `None` when the transition's scope is missing the IDs the
    /// delivery event needs (which indicates the event was built before
    /// persistence resolved them).
    #[must_use]
    pub fn from_transition(event: &TransitionEvent) -> Option<Self> {
        let posting_id: i64 = event.scope.posting_id?;
        match event.action.kind {
            EventKind::PostingCreated => Some(Self::PostingCreated { posting_id }),
            EventKind::BidSubmitted => Some(Self::BidSubmitted {
                posting_id,
                bid_id: event.scope.bid_id?,
            }),
            EventKind::BidAccepted => Some(Self::BidAccepted {
                posting_id,
                bid_id: event.scope.bid_id?,
            }),
            EventKind::JobConfirmed => Some(Self::JobConfirmed { posting_id }),
            EventKind::JobClosed => Some(Self::JobClosed {
                posting_id,
                bid_id: event.scope.bid_id?,
            }),
            EventKind::ReviewSubmitted => Some(Self::ReviewSubmitted {
                posting_id,
                review_id: event.scope.review_id?,
            }),
        }
    }
}

/// Broadcaster for live marketplace events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive state change notifications.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    /// This is non-blocking and will not wait for clients to receive the event.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LiveEventBroadcaster {
    fn publish(&self, event: &TransitionEvent) {
        if let Some(live) = LiveEvent::from_transition(event) {
            self.broadcast(&live);
        } else {
            warn!(kind = event.action.kind.as_str(), "Dropping transition event with unresolved scope");
        }
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `broadcaster` - The live event broadcaster from application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection confirmation, then streams all live events until
/// the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    // Send connection confirmation
    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // We don't process commands over WebSocket
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_bid_events::{Action, Actor, Cause, EventScope, StateSnapshot};

    fn transition_event(kind: EventKind, scope: EventScope) -> TransitionEvent {
        TransitionEvent::new(
            Actor::new(String::from("7"), String::from("homeowner")),
            Cause::new(String::from("req-1"), String::from("test")),
            Action::new(kind, None),
            scope,
            StateSnapshot::new(String::from("before")),
            StateSnapshot::new(String::from("after")),
        )
    }

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        // Should not panic when no receivers
        broadcaster.broadcast(&LiveEvent::PostingCreated { posting_id: 12 });
    }

    #[test]
    fn test_broadcast_with_receiver() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::PostingCreated { posting_id: 12 });

        match rx.try_recv() {
            Ok(LiveEvent::PostingCreated { posting_id: 12 }) => {}
            other => panic!("Expected PostingCreated, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::BidAccepted {
            posting_id: 12,
            bid_id: 3,
        });

        // Both receivers should get the event
        assert!(matches!(rx1.try_recv(), Ok(LiveEvent::BidAccepted { .. })));
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::BidAccepted { .. })));
    }

    #[test]
    fn test_event_serialization() {
        let event = LiveEvent::BidsRejected {
            posting_id: 12,
            bid_ids: vec![4, 5],
        };

        let json = serde_json::to_string(&event).expect("Failed to serialize");
        let deserialized: LiveEvent = serde_json::from_str(&json).expect("Failed to deserialize");

        match deserialized {
            LiveEvent::BidsRejected {
                posting_id,
                bid_ids,
            } => {
                assert_eq!(posting_id, 12);
                assert_eq!(bid_ids, vec![4, 5]);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_sink_publishes_resolved_transition() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        let event = transition_event(EventKind::BidSubmitted, EventScope::bid(12, 3));
        broadcaster.publish(&event);

        assert!(matches!(
            rx.try_recv(),
            Ok(LiveEvent::BidSubmitted {
                posting_id: 12,
                bid_id: 3,
            })
        ));
    }

    #[test]
    fn test_sink_drops_unresolved_transition() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        // A BidSubmitted event without a bid ID cannot be delivered.
        let event = transition_event(EventKind::BidSubmitted, EventScope::posting(12));
        broadcaster.publish(&event);

        assert!(rx.try_recv().is_err());
    }
}
