//! Handler for showTransferStarted

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::TransferStartedArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Progress, Slot, Urgency};

/// Handle showTransferStarted
pub async fn handle_transfer_started<W>(
    args: TransferStartedArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let action = if args.is_sending { "Sending" } else { "Receiving" };
    let notification = Notification {
        slot: Slot::Transfer,
        title: format!("{action}: {}", args.file_name),
        body: "Starting transfer...".to_string(),
        progress: Some(Progress::Indeterminate),
        ongoing: true,
        urgency: Urgency::Normal,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
