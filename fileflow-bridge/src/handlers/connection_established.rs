//! Handler for showConnectionEstablished

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::DeviceArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showConnectionEstablished
pub async fn handle_connection_established<W>(
    args: DeviceArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Connection,
        title: "Connected to Device".to_string(),
        body: format!("Successfully connected to {}", args.device_name),
        progress: None,
        ongoing: false,
        urgency: Urgency::Normal,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
