//! Handler for showConnectionRequest

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::DeviceArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showConnectionRequest
pub async fn handle_connection_request<W>(
    args: DeviceArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Connection,
        title: "Connection Request".to_string(),
        body: format!("{} is requesting to connect", args.device_name),
        progress: None,
        ongoing: false,
        urgency: Urgency::Critical,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}

// =============================================================================
// Tests
// =============================================================================
