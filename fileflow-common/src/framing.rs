//! Line framing for bridge connections
//!
//! Requests and acknowledgments travel as newline-delimited JSON. The reader
//! waits indefinitely for the first byte of a line (drivers idle between
//! transfers), but once a line has started it must complete within the frame
//! timeout.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;

/// Maximum accepted line length in bytes
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Default timeout for completing a line once the first byte is received
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// Errors
// =============================================================================

/// Errors produced while reading or writing lines
#[derive(Debug)]
pub enum FrameError {
    /// Underlying I/O failure
    Io(String),
    /// A line exceeded [`MAX_LINE_LENGTH`]
    LineTooLong,
    /// A line contained invalid UTF-8
    InvalidUtf8,
    /// A started line did not complete within the frame timeout
    FrameTimeout,
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Io(msg) => write!(f, "I/O error: {msg}"),
            FrameError::LineTooLong => {
                write!(f, "line exceeds maximum length of {MAX_LINE_LENGTH} bytes")
            }
            FrameError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            FrameError::FrameTimeout => write!(f, "timed out completing a started line"),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::Io(err.to_string())
    }
}

// =============================================================================
// Line Reader
// =============================================================================

/// Reads newline-delimited messages from an async reader.
///
/// Wrap the underlying stream in a `BufReader`; this reader pulls single
/// bytes and relies on the caller's buffering.
pub struct LineReader<R> {
    reader: R,
}

impl<R> LineReader<R> {
    /// Create a new line reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Get a mutable reference to the underlying reader
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume the line reader and return the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: AsyncReadExt + Unpin> LineReader<R> {
    /// Read the next non-empty line.
    ///
    /// Returns `Ok(None)` if the connection is cleanly closed. Blank lines
    /// are skipped. A final unterminated line at EOF is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is too long, not UTF-8, or an I/O error
    /// occurs. This method never times out; for production use prefer
    /// [`read_line_with_timeout`](Self::read_line_with_timeout).
    pub async fn read_line(&mut self) -> Result<Option<String>, FrameError> {
        loop {
            let first_byte = match self.read_byte_allow_eof().await? {
                Some(b) => b,
                None => return Ok(None), // Clean disconnect
            };
            if let Some(line) = self.read_rest_of_line(first_byte).await? {
                return Ok(Some(line));
            }
        }
    }

    /// Read the next non-empty line with a completion timeout.
    ///
    /// Waits indefinitely for the first byte (allowing idle connections);
    /// once a line has started it must complete within `frame_timeout`.
    ///
    /// Returns `Ok(None)` if the connection is cleanly closed.
    pub async fn read_line_with_timeout(
        &mut self,
        frame_timeout: Duration,
    ) -> Result<Option<String>, FrameError> {
        loop {
            let first_byte = match self.read_byte_allow_eof().await? {
                Some(b) => b,
                None => return Ok(None),
            };
            let line = match timeout(frame_timeout, self.read_rest_of_line(first_byte)).await {
                Ok(result) => result?,
                Err(_) => return Err(FrameError::FrameTimeout),
            };
            if let Some(line) = line {
                return Ok(Some(line));
            }
        }
    }

    /// Read a single byte, mapping clean EOF to `None`
    async fn read_byte_allow_eof(&mut self) -> Result<Option<u8>, FrameError> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte).await {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) => Err(e.into()),
        }
    }

    /// Collect bytes up to the newline following `first_byte`.
    ///
    /// Returns `None` for a blank line so callers can skip it.
    async fn read_rest_of_line(&mut self, first_byte: u8) -> Result<Option<String>, FrameError> {
        let mut buf = Vec::new();
        let mut byte = first_byte;
        loop {
            match byte {
                b'\n' => break,
                b'\r' => {}
                other => buf.push(other),
            }
            if buf.len() > MAX_LINE_LENGTH {
                return Err(FrameError::LineTooLong);
            }
            byte = match self.read_byte_allow_eof().await? {
                Some(b) => b,
                // EOF mid-line: treat the partial line as complete
                None => break,
            };
        }

        if buf.is_empty() {
            return Ok(None);
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| FrameError::InvalidUtf8)
    }
}

// =============================================================================
// Line Writer
// =============================================================================

/// Writes newline-delimited messages to an async writer
pub struct LineWriter<W> {
    writer: W,
}

impl<W> LineWriter<W> {
    /// Create a new line writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a mutable reference to the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the line writer and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: AsyncWriteExt + Unpin> LineWriter<W> {
    /// Write one message line followed by a newline and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    pub async fn write_line(&mut self, line: &str) -> Result<(), FrameError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
