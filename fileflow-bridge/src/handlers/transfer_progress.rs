//! Handler for updateTransferProgress

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::format::{clamp_percent, format_speed};
use fileflow_common::protocol::TransferProgressArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Progress, Slot, Urgency};

/// Handle updateTransferProgress
pub async fn handle_transfer_progress<W>(
    args: TransferProgressArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let action = if args.is_sending { "Sending" } else { "Receiving" };
    let percent = clamp_percent(args.progress);
    let notification = Notification {
        slot: Slot::Transfer,
        title: format!("{action}: {}", args.file_name),
        body: format!("{percent}% • {}", format_speed(args.speed_mbps)),
        progress: Some(Progress::Percent(percent)),
        ongoing: true,
        urgency: Urgency::Normal,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}

// =============================================================================
// Tests
// =============================================================================
