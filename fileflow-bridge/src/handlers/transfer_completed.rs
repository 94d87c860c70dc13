//! Handler for showTransferCompleted
//!
//! Completed transfers post to the terminal slot, not the lifecycle slot,
//! so a later unrelated lifecycle event cannot silently overwrite the
//! result and the entry persists until the user dismisses it.

use std::io;

use tokio::io::AsyncWrite;

use fileflow_common::format::format_megabytes;
use fileflow_common::protocol::TransferCompletedArgs;

use super::HandlerContext;
use crate::notifications::{Notification, Slot, Urgency};

/// Handle showTransferCompleted
pub async fn handle_transfer_completed<W>(
    args: TransferCompletedArgs,
    ctx: &mut HandlerContext<'_, W>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let action = if args.is_sending { "Sent" } else { "Received" };
    let notification = Notification {
        slot: Slot::Alert,
        title: format!("{action} Successfully"),
        body: format!(
            "{} ({} MB)",
            args.file_name,
            format_megabytes(args.file_size)
        ),
        progress: None,
        ongoing: false,
        urgency: Urgency::Normal,
    };
    ctx.bridge.post_logged(&notification);
    ctx.ack_ok().await
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{RecordingNotifier, bridge_with, test_peer_addr};
    use fileflow_common::framing::LineWriter;
    use std::io::Cursor;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_completed_uses_terminal_slot() {
        let notifier = Arc::new(RecordingNotifier::new());
        let bridge = bridge_with(notifier.clone());

        let mut buffer = Vec::new();
        {
            let mut writer = LineWriter::new(Cursor::new(&mut buffer));
            let mut ctx = HandlerContext {
                writer: &mut writer,
                peer_addr: test_peer_addr(),
                bridge: &bridge,
                message_id: None,
                debug: false,
            };
            let args = TransferCompletedArgs {
                file_name: "report.pdf".to_string(),
                file_size: 1_048_576,
                is_sending: true,
            };
            handle_transfer_completed(args, &mut ctx).await.unwrap();
        }

        let posted = notifier.last_posted(Slot::Alert).unwrap();
        assert_eq!(posted.title, "Sent Successfully");
        assert_eq!(posted.body, "report.pdf (1.0 MB)");
        assert!(!posted.ongoing);

        // Distinct identity from the lifecycle notification
        assert_eq!(notifier.post_count(Slot::Transfer), 0);
        assert_eq!(notifier.post_count(Slot::Alert), 1);
    }

    #[tokio::test]
    async fn test_received_action() {
        let notifier = Arc::new(RecordingNotifier::new());
        let bridge = bridge_with(notifier.clone());

        let mut buffer = Vec::new();
        {
            let mut writer = LineWriter::new(Cursor::new(&mut buffer));
            let mut ctx = HandlerContext {
                writer: &mut writer,
                peer_addr: test_peer_addr(),
                bridge: &bridge,
                message_id: None,
                debug: false,
            };
            handle_transfer_completed(TransferCompletedArgs::default(), &mut ctx)
                .await
                .unwrap();
        }

        let posted = notifier.last_posted(Slot::Alert).unwrap();
        assert_eq!(posted.title, "Received Successfully");
        assert_eq!(posted.body, "File (0.0 MB)");
    }
}
