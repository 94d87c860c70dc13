//! Handler for the background channel's startConnectionService

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::protocol::DeviceArgs;

use super::HandlerContext;

/// Handle startConnectionService
pub async fn handle_service_connection<W>(
    args: DeviceArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.bridge
        .presence_op(|presence| presence.start_connection(&args.device_name));
    ctx.ack_ok().await
}
