//! Handler for the background channel's startService
//!
//! The presence notification is posted synchronously before the ack so the
//! driver can rely on foreground presence being established when the call
//! returns.

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::FileArgs;

use super::HandlerContext;

/// Handle startService
pub async fn handle_service_start<W>(
    args: FileArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.bridge
        .presence_op(|presence| presence.start(&args.file_name));
    ctx.ack_ok().await
}
