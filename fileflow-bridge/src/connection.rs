//! Driver connection handling
//!
//! Each connection is served strictly sequentially: read one request line,
//! decode it, run the handler, write the acknowledgment, repeat. The bridge
//! never pushes unsolicited messages, so overlapping effects reduce to
//! last-write-wins on the notification slots.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use fileflow_common::framing::{DEFAULT_FRAME_TIMEOUT, LineReader, LineWriter};
use fileflow_common::io::{InboundRequest, read_request};
use fileflow_common::protocol::BridgeRequest;

use crate::bridge::Bridge;
use crate::constants::{ERR_HANDLING_REQUEST, ERR_READ_REQUEST};
use crate::handlers::{
    HandlerContext, handle_connection_established, handle_connection_rejected,
    handle_connection_request, handle_multicast_acquire, handle_multicast_release,
    handle_service_connection, handle_service_progress, handle_service_start, handle_service_stop,
    handle_show_error, handle_transfer_cancelled, handle_transfer_completed,
    handle_transfer_paused, handle_transfer_progress, handle_transfer_request,
    handle_transfer_resumed, handle_transfer_started,
};

/// Handle a driver connection over TCP
pub async fn handle_connection(
    socket: TcpStream,
    peer_addr: SocketAddr,
    bridge: Arc<Bridge>,
) -> io::Result<()> {
    handle_connection_inner(socket, peer_addr, bridge).await
}

/// Inner connection handler that works with any async stream
pub async fn handle_connection_inner<S>(
    socket: S,
    peer_addr: SocketAddr,
    bridge: Arc<Bridge>,
) -> io::Result<()>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (reader, writer) = tokio::io::split(socket);
    let mut line_reader = LineReader::new(BufReader::new(reader));
    let mut line_writer = LineWriter::new(writer);

    loop {
        match read_request(&mut line_reader, DEFAULT_FRAME_TIMEOUT).await {
            Ok(Some(InboundRequest::Valid(envelope))) => {
                let mut ctx = HandlerContext {
                    writer: &mut line_writer,
                    peer_addr,
                    bridge: &bridge,
                    message_id: envelope.id.clone(),
                    debug: bridge.debug,
                };

                let result = match envelope.decode() {
                    Some(request) => dispatch(request, &mut ctx).await,
                    None => {
                        if bridge.debug {
                            println!(
                                "Unknown operation {}/{} from {}",
                                envelope.channel, envelope.method, peer_addr
                            );
                        }
                        ctx.ack_not_implemented(&envelope.method).await
                    }
                };

                if let Err(e) = result {
                    eprintln!("{}{}", ERR_HANDLING_REQUEST, e);
                    break;
                }
            }
            Ok(Some(InboundRequest::Malformed { error })) => {
                eprintln!("{}{}: {}", ERR_READ_REQUEST, peer_addr, error);
                let mut ctx = HandlerContext {
                    writer: &mut line_writer,
                    peer_addr,
                    bridge: &bridge,
                    message_id: None,
                    debug: bridge.debug,
                };
                if ctx.ack_error("invalid request format").await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                // Connection closed cleanly
                break;
            }
            Err(e) => {
                eprintln!("{}{}: {}", ERR_READ_REQUEST, peer_addr, e);
                break;
            }
        }
    }

    // Shutdown the writer gracefully
    let _ = line_writer.get_mut().shutdown().await;

    Ok(())
}

/// Route a decoded request to its handler
async fn dispatch<W>(request: BridgeRequest, ctx: &mut HandlerContext<'_, W>) -> io::Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    match request {
        BridgeRequest::ShowConnectionRequest(args) => handle_connection_request(args, ctx).await,
        BridgeRequest::ShowConnectionEstablished(args) => {
            handle_connection_established(args, ctx).await
        }
        BridgeRequest::ShowConnectionRejected(args) => handle_connection_rejected(args, ctx).await,
        BridgeRequest::ShowTransferRequest(args) => handle_transfer_request(args, ctx).await,
        BridgeRequest::ShowTransferStarted(args) => handle_transfer_started(args, ctx).await,
        BridgeRequest::UpdateTransferProgress(args) => handle_transfer_progress(args, ctx).await,
        BridgeRequest::ShowTransferPaused(args) => handle_transfer_paused(args, ctx).await,
        BridgeRequest::ShowTransferResumed(args) => handle_transfer_resumed(args, ctx).await,
        BridgeRequest::ShowTransferCompleted(args) => handle_transfer_completed(args, ctx).await,
        BridgeRequest::ShowTransferCancelled(args) => handle_transfer_cancelled(args, ctx).await,
        BridgeRequest::ShowError(args) => handle_show_error(args, ctx).await,
        BridgeRequest::StartService(args) => handle_service_start(args, ctx).await,
        BridgeRequest::UpdateServiceProgress(args) => handle_service_progress(args, ctx).await,
        BridgeRequest::StartConnectionService(args) => handle_service_connection(args, ctx).await,
        BridgeRequest::StopService => handle_service_stop(ctx).await,
        BridgeRequest::MulticastAcquire => handle_multicast_acquire(ctx).await,
        BridgeRequest::MulticastRelease => handle_multicast_release(ctx).await,
    }
}

// =============================================================================
// Tests
// =============================================================================
