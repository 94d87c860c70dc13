//! Handler for showTransferCancelled

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::TransferCancelledArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showTransferCancelled
pub async fn handle_transfer_cancelled<W>(
    args: TransferCancelledArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Alert,
        title: "Transfer Failed".to_string(),
        body: format!("{} - {}", args.reason, args.file_name),
        progress: None,
        ongoing: false,
        urgency: Urgency::Critical,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
