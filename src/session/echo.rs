//! Echo loop for one upgraded connection.
//!
//! Reads one message, logs it, writes the identical message back, and only
//! then reads the next one. Ping and pong frames are answered by the
//! transport itself and are not echoed.

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::observability::metrics;
use crate::session::connection::ConnectionId;

/// Data message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Binary,
}

impl MessageKind {
    /// Tag of a data message; `None` for control frames.
    pub fn of(message: &Message) -> Option<Self> {
        match message {
            Message::Text(_) => Some(Self::Text),
            Message::Binary(_) => Some(Self::Binary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The peer sent a close frame.
    PeerClosed,
    /// The transport ended without a close frame.
    StreamEnded,
}

/// A read or write failure on an established connection.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("read failed: {0}")]
    Read(#[source] axum::Error),

    #[error("write failed: {0}")]
    Write(#[source] axum::Error),
}

/// Run the echo loop until the peer closes or the connection fails.
///
/// `inbound` and `outbound` are the two halves of the same connection and are
/// owned by this call for its whole life.
pub async fn run_echo<R, W>(
    id: ConnectionId,
    mut inbound: R,
    mut outbound: W,
) -> Result<Termination, SessionError>
where
    R: Stream<Item = Result<Message, axum::Error>> + Unpin,
    W: Sink<Message, Error = axum::Error> + Unpin,
{
    while let Some(next) = inbound.next().await {
        let message = next.map_err(SessionError::Read)?;

        let Some(kind) = MessageKind::of(&message) else {
            if let Message::Close(frame) = &message {
                tracing::debug!(connection_id = %id, frame = ?frame, "Close frame received");
                // Flushes the close reply queued by the transport.
                if let Err(e) = outbound.close().await {
                    tracing::debug!(connection_id = %id, error = %e, "Close reply not flushed");
                }
                return Ok(Termination::PeerClosed);
            }
            continue;
        };

        let payload: &[u8] = match &message {
            Message::Text(text) => text.as_str().as_bytes(),
            Message::Binary(data) => data.as_ref(),
            _ => &[],
        };
        tracing::info!(
            connection_id = %id,
            kind = kind.as_str(),
            len = payload.len(),
            content = %String::from_utf8_lossy(payload),
            "Message received"
        );

        outbound.send(message).await.map_err(SessionError::Write)?;
        metrics::record_message_echoed(kind);
    }

    Ok(Termination::StreamEnded)
}
