//! I/O utilities for sending and receiving bridge messages
//!
//! This module is the interface between the protocol types ([`Envelope`],
//! [`AckEnvelope`]) and the wire format (line framing).

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::framing::{FrameError, LineReader, LineWriter};
use crate::protocol::{AckEnvelope, Envelope};

// =============================================================================
// Error Conversion
// =============================================================================

impl From<FrameError> for io::Error {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(msg) => io::Error::other(msg),
            other => io::Error::other(other.to_string()),
        }
    }
}

// =============================================================================
// Reading Requests
// =============================================================================

/// Outcome of reading one request line.
///
/// A line that frames correctly but is not a valid envelope is surfaced as
/// `Malformed` so the bridge can answer with an error ack instead of
/// dropping the connection.
#[derive(Debug)]
pub enum InboundRequest {
    /// A well-formed request envelope
    Valid(Envelope),
    /// The line was read but could not be parsed as an envelope
    Malformed { error: String },
}

/// Read the next request line and parse it.
///
/// Returns `Ok(None)` if the connection is cleanly closed.
///
/// # Errors
///
/// Returns an error only for framing failures (I/O, oversize line, timeout);
/// JSON parse failures are reported in-band as [`InboundRequest::Malformed`].
pub async fn read_request<R>(
    reader: &mut LineReader<R>,
    frame_timeout: Duration,
) -> Result<Option<InboundRequest>, FrameError>
where
    R: AsyncReadExt + Unpin,
{
    let line = match reader.read_line_with_timeout(frame_timeout).await? {
        Some(line) => line,
        None => return Ok(None),
    };

    match Envelope::from_json(&line) {
        Ok(envelope) => Ok(Some(InboundRequest::Valid(envelope))),
        Err(e) => Ok(Some(InboundRequest::Malformed {
            error: e.to_string(),
        })),
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Send a request envelope (driver side)
pub async fn send_request<W>(writer: &mut LineWriter<W>, envelope: &Envelope) -> io::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    let line = envelope
        .to_json()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.write_line(&line).await.map_err(Into::into)
}

/// Send an acknowledgment (bridge side)
pub async fn send_ack<W>(writer: &mut LineWriter<W>, ack: &AckEnvelope) -> io::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    let line = ack
        .to_json()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.write_line(&line).await.map_err(Into::into)
}

/// Read the next acknowledgment (driver side)
///
/// Returns `Ok(None)` if the connection is cleanly closed.
pub async fn read_ack<R>(reader: &mut LineReader<R>) -> io::Result<Option<AckEnvelope>>
where
    R: AsyncReadExt + Unpin,
{
    let line = match reader.read_line().await? {
        Some(line) => line,
        None => return Ok(None),
    };
    let ack =
        AckEnvelope::from_json(&line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(ack))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHANNEL_BACKGROUND;
    use crate::framing::DEFAULT_FRAME_TIMEOUT;
    use serde_json::json;
    use std::io::Cursor;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_send_and_read_request() {
        let envelope = Envelope::new(CHANNEL_BACKGROUND, "startService", json!({"fileName": "a"}));

        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut writer = LineWriter::new(cursor);
            send_request(&mut writer, &envelope).await.unwrap();
        }

        let mut reader = LineReader::new(BufReader::new(Cursor::new(buffer)));
        let received = read_request(&mut reader, DEFAULT_FRAME_TIMEOUT)
            .await
            .unwrap()
            .unwrap();
        match received {
            InboundRequest::Valid(env) => {
                assert_eq!(env.channel, CHANNEL_BACKGROUND);
                assert_eq!(env.method, "startService");
                assert_eq!(env.id, envelope.id);
            }
            InboundRequest::Malformed { error } => panic!("unexpected parse failure: {error}"),
        }
    }

    #[tokio::test]
    async fn test_read_request_malformed_line() {
        let mut reader = LineReader::new(BufReader::new(Cursor::new(b"not json\n".to_vec())));
        let received = read_request(&mut reader, DEFAULT_FRAME_TIMEOUT)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(received, InboundRequest::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_read_request_clean_close() {
        let mut reader = LineReader::new(BufReader::new(Cursor::new(Vec::new())));
        assert!(
            read_request(&mut reader, DEFAULT_FRAME_TIMEOUT)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_send_and_read_ack() {
        let ack = AckEnvelope::not_implemented(None, "frobnicate");

        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut writer = LineWriter::new(cursor);
            send_ack(&mut writer, &ack).await.unwrap();
        }

        let mut reader = LineReader::new(BufReader::new(Cursor::new(buffer)));
        let received = read_ack(&mut reader).await.unwrap().unwrap();
        assert_eq!(received, ack);
    }
}
