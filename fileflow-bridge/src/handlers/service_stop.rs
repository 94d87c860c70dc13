//! Handler for the background channel's stopService

use std::io;

use tokio::io::AsyncWrite;

use super::HandlerContext;

/// Handle stopService; a no-op when presence is already idle
pub async fn handle_service_stop<W>(ctx: &mut HandlerContext<'_, W>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.bridge.presence_op(|presence| presence.stop());
    ctx.ack_ok().await
}
