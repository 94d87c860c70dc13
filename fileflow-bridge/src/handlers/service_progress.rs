//! Handler for the background channel's updateProgress

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::ServiceProgressArgs;

use super::HandlerContext;

/// Handle updateProgress
pub async fn handle_service_progress<W>(
    args: ServiceProgressArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.bridge
        .presence_op(|presence| presence.update(&args.file_name, args.progress));
    ctx.ack_ok().await
}
