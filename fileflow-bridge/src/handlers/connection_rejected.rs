//! Handler for showConnectionRejected

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::ConnectionRejectedArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showConnectionRejected
pub async fn handle_connection_rejected<W>(
    args: ConnectionRejectedArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Connection,
        title: "Connection Rejected".to_string(),
        body: format!("{} rejected connection: {}", args.device_name, args.reason),
        progress: None,
        ongoing: false,
        urgency: Urgency::Critical,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
