//! Handler for showTransferResumed

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::FileArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showTransferResumed
pub async fn handle_transfer_resumed<W>(
    args: FileArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Transfer,
        title: "Transfer Resumed".to_string(),
        body: args.file_name,
        progress: None,
        ongoing: true,
        urgency: Urgency::Normal,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
