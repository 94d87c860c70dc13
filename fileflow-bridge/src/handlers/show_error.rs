//! Handler for showError

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::ErrorArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showError
pub async fn handle_show_error<W>(
    args: ErrorArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let notification = Notification {
        slot: Slot::Alert,
        title: args.title,
        body: args.message,
        progress: None,
        ongoing: false,
        urgency: Urgency::Critical,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}
