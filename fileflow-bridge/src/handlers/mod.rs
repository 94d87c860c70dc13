//! Request handlers for driver operations

mod connection_established;
mod connection_rejected;
mod connection_request;
mod multicast_acquire;
mod multicast_release;
mod service_connection;
mod service_progress;
mod service_start;
mod service_stop;
mod show_error;
mod transfer_cancelled;
mod transfer_completed;
mod transfer_paused;
mod transfer_progress;
mod transfer_request;
mod transfer_resumed;
mod transfer_started;

#[cfg(test)]
pub mod testing;

pub use connection_established::handle_connection_established;
pub use connection_rejected::handle_connection_rejected;
pub use connection_request::handle_connection_request;
pub use multicast_acquire::handle_multicast_acquire;
pub use multicast_release::handle_multicast_release;
pub use service_connection::handle_service_connection;
pub use service_progress::handle_service_progress;
pub use service_start::handle_service_start;
pub use service_stop::handle_service_stop;
pub use show_error::handle_show_error;
pub use transfer_cancelled::handle_transfer_cancelled;
pub use transfer_completed::handle_transfer_completed;
pub use transfer_paused::handle_transfer_paused;
pub use transfer_progress::handle_transfer_progress;
pub use transfer_request::handle_transfer_request;
pub use transfer_resumed::handle_transfer_resumed;
pub use transfer_started::handle_transfer_started;

use std::io;
use std::net::SocketAddr;

use tokio::io::AsyncWrite;

use fileflow_common::framing::LineWriter;
use fileflow_common::io::send_ack;
use fileflow_common::protocol::{AckEnvelope, MessageId};

use crate::bridge::Bridge;

/// Per-request context shared by every handler
pub struct HandlerContext<'a, W> {
    pub writer: &'a mut LineWriter<W>,
    pub peer_addr: SocketAddr,
    pub bridge: &'a Bridge,
    pub message_id: Option<MessageId>,
    pub debug: bool,
}

impl<W> HandlerContext<'_, W>
where
    W: AsyncWrite + Unpin,
{
    /// Acknowledge the request as accepted
    pub async fn ack_ok(&mut self) -> io::Result<()> {
        send_ack(self.writer, &AckEnvelope::ok(self.message_id.clone())).await
    }

    /// Acknowledge an unknown operation
    pub async fn ack_not_implemented(&mut self, method: &str) -> io::Result<()> {
        send_ack(
            self.writer,
            &AckEnvelope::not_implemented(self.message_id.clone(), method),
        )
        .await
    }

    /// Acknowledge an unparseable request line
    pub async fn ack_error(&mut self, message: &str) -> io::Result<()> {
        send_ack(self.writer, &AckEnvelope::error(message)).await
    }
}
