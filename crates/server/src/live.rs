// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live change notifications for open attendance boards.
//!
//! Every committed write is announced to connected WebSocket clients. Events
//! only say what changed; clients re-read the affected views over HTTP.
//! Nothing sent by a client is executed.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{
    SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use pointage::Change;
use serde::Serialize;
use std::sync::Arc;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

/// Events kept for slow clients before the oldest are dropped.
const FEED_CAPACITY: usize = 100;

/// A message pushed to live clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Sent once when the socket opens.
    Connected {
        /// Server time (RFC 3339).
        timestamp: String,
    },
    /// A write was committed.
    Changed(Change),
    /// The client fell behind and missed `skipped` events; it should reload.
    Lagged { skipped: u64 },
}

/// Fan-out channel from write handlers to every open socket.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<LiveEvent>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Announces a committed change. Dropped silently when nobody listens.
    pub fn publish(&self, change: Change) {
        let event: LiveEvent = LiveEvent::Changed(change);
        match self.tx.send(event) {
            Ok(listeners) => debug!(listeners, "Published change"),
            Err(_) => debug!("No live listeners for change"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }

    fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for GET `/live`.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(feed): AxumState<Arc<ChangeFeed>>,
) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, feed))
}

fn encode(event: &LiveEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            error!(?e, "Failed to encode live event");
            None
        }
    }
}

fn connected_event() -> LiveEvent {
    LiveEvent::Connected {
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    }
}

async fn serve_socket(socket: WebSocket, feed: Arc<ChangeFeed>) {
    let (mut sink, stream) = socket.split();
    let events: broadcast::Receiver<LiveEvent> = feed.subscribe();
    info!(listeners = feed.listener_count(), "Live client connected");

    if let Some(hello) = encode(&connected_event())
        && sink.send(hello).await.is_err()
    {
        warn!("Live client left before the greeting");
        return;
    }

    let mut outbound = tokio::spawn(forward_events(sink, events));
    let mut inbound = tokio::spawn(drain_client(stream));

    tokio::select! {
        _ = &mut outbound => inbound.abort(),
        _ = &mut inbound => outbound.abort(),
    }

    info!("Live client disconnected");
}

/// Pushes feed events to the client until either side goes away.
async fn forward_events(
    mut sink: SplitSink<WebSocket, Message>,
    mut events: broadcast::Receiver<LiveEvent>,
) {
    loop {
        let event: LiveEvent = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Live client lagged");
                LiveEvent::Lagged { skipped }
            }
            Err(RecvError::Closed) => return,
        };
        let Some(message) = encode(&event) else {
            continue;
        };
        if sink.send(message).await.is_err() {
            return;
        }
    }
}

/// Reads until the client closes; payloads are ignored.
async fn drain_client(mut stream: SplitStream<WebSocket>) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => return,
            Ok(Message::Text(_) | Message::Binary(_)) => {
                debug!("Ignoring client payload on live socket");
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Err(e) => {
                warn!(?e, "Live socket read failed");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointage_domain::{MissionId, PersonnelId};
    use time::macros::date;

    #[test]
    fn test_new_feed_has_no_listeners() {
        assert_eq!(ChangeFeed::new().listener_count(), 0);
    }

    #[test]
    fn test_publish_without_listeners_is_dropped() {
        let feed = ChangeFeed::new();
        feed.publish(Change::DayValidated {
            date: date!(2024 - 03 - 05),
        });

        let mut late = feed.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_every_listener_receives_the_change() {
        let feed = ChangeFeed::new();
        let mut first = feed.subscribe();
        let mut second = feed.subscribe();
        let change = Change::MissionCompleted {
            mission_id: MissionId::new("M000001"),
        };

        feed.publish(change.clone());

        let expected = LiveEvent::Changed(change);
        assert_eq!(first.try_recv().ok(), Some(expected.clone()));
        assert_eq!(second.try_recv().ok(), Some(expected));
    }

    #[test]
    fn test_changed_event_wire_format() {
        let event = LiveEvent::Changed(Change::PersonnelAdded {
            personnel_id: PersonnelId::new("P000001"),
        });

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "changed");
        assert_eq!(json["data"]["type"], "personnel_added");
        assert_eq!(json["data"]["personnel_id"], "P000001");
    }

    #[test]
    fn test_lagged_event_wire_format() {
        let json: serde_json::Value =
            serde_json::to_value(LiveEvent::Lagged { skipped: 3 }).unwrap();
        assert_eq!(json["event"], "lagged");
        assert_eq!(json["data"]["skipped"], 3);
    }
}
