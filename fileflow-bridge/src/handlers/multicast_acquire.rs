//! Handler for the multicast channel's acquire
//!
//! The reservation is best-effort: an open failure degrades discovery but
//! is logged and still acknowledged, never surfaced to the driver.

use std::io;

use tokio::io::AsyncWrite;

use super::HandlerContext;

/// Handle acquire
pub async fn handle_multicast_acquire<W>(ctx: &mut HandlerContext<'_, W>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    ctx.bridge.multicast_op(|guard| guard.acquire());
    if ctx.debug && ctx.bridge.multicast_held() {
        println!("Multicast reservation acquired");
    }
    ctx.ack_ok().await
}
