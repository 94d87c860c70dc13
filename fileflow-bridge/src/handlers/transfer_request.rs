//! Handler for showTransferRequest

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::format::format_megabytes;
use fileflow_common::protocol::TransferRequestArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showTransferRequest
pub async fn handle_transfer_request<W>(
    args: TransferRequestArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Transfer,
        title: format!("Transfer Request from {}", args.device_name),
        body: format!(
            "{} ({} MB)",
            args.file_name,
            format_megabytes(args.file_size)
        ),
        progress: None,
        ongoing: false,
        urgency: Urgency::Critical,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
