//! Handler for the multicast channel's release

use std::io;

use tokio::io::AsyncWrite;

use super::HandlerContext;

/// Handle release; a no-op when the reservation is not held
pub async fn handle_multicast_release<W>(ctx: &mut HandlerContext<'_, W>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let debug = ctx.debug;
    ctx.bridge.multicast_op(|guard| {
        if guard.release() && debug {
            println!("Multicast reservation released");
        }
        Ok(())
    });
    ctx.ack_ok().await
}
