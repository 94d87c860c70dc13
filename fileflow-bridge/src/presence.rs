//! Foreground presence service
//!
//! Keeps one ongoing notification alive while a transfer or connection
//! handshake runs, mirroring a mobile foreground service: the presence entry
//! is posted synchronously before the triggering request is acknowledged,
//! updated in place under a single identity, and removed on stop.

use std::io;
use std::sync::Arc;

use fileflow_common::CONNECTING_SENTINEL;
use fileflow_common::format::clamp_percent;

use crate::notifications::{Notification, Notifier, Progress, Slot, Urgency};

/// Presence state machine.
///
/// `Connecting` is a transient sub-state reachable only from `Idle`; it
/// moves to `Transferring` when a transfer starts, or back to `Idle` on stop.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceState {
    Idle,
    Connecting { device_name: String },
    Transferring { file_name: String, percent: u8 },
}

/// Owns the presence notification and its state machine
pub struct PresenceService {
    state: PresenceState,
    notifier: Arc<dyn Notifier>,
}

impl PresenceService {
    /// Create an idle presence service posting through the given sink
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: PresenceState::Idle,
            notifier,
        }
    }

    /// Current state, for inspection
    pub fn state(&self) -> &PresenceState {
        &self.state
    }

    /// Whether a presence notification is currently active
    pub fn is_active(&self) -> bool {
        self.state != PresenceState::Idle
    }

    /// Begin presence for a transfer of the named file.
    ///
    /// Valid from any state; an active connection handshake is promoted to
    /// the transferring state, and a running transfer restarts at zero.
    pub fn start(&mut self, file_name: &str) -> io::Result<()> {
        self.state = PresenceState::Transferring {
            file_name: file_name.to_string(),
            percent: 0,
        };
        self.notifier.post(&render_transferring(file_name, 0))
    }

    /// Begin presence for a connection handshake with the named device.
    ///
    /// Only reachable from idle; while a transfer is active the call is
    /// ignored so a stale handshake event cannot regress the display.
    pub fn start_connection(&mut self, device_name: &str) -> io::Result<()> {
        if self.state != PresenceState::Idle {
            return Ok(());
        }
        self.state = PresenceState::Connecting {
            device_name: device_name.to_string(),
        };
        self.notifier.post(&render_connecting(device_name))
    }

    /// Update the presence entry in place.
    ///
    /// A progress of [`CONNECTING_SENTINEL`] renders the handshake message
    /// instead of a percentage; any other value clamps to 0..=100 and moves
    /// the state machine to `Transferring`.
    pub fn update(&mut self, file_name: &str, progress: i64) -> io::Result<()> {
        if progress == CONNECTING_SENTINEL {
            if self.state == PresenceState::Idle {
                self.state = PresenceState::Connecting {
                    device_name: file_name.to_string(),
                };
            }
            return self.notifier.post(&render_connecting(file_name));
        }

        let percent = clamp_percent(progress);
        self.state = PresenceState::Transferring {
            file_name: file_name.to_string(),
            percent,
        };
        self.notifier.post(&render_transferring(file_name, percent))
    }

    /// Tear down presence and remove the notification.
    ///
    /// Safe to call when idle; that is a no-op, not an error.
    pub fn stop(&mut self) -> io::Result<()> {
        if self.state == PresenceState::Idle {
            return Ok(());
        }
        self.state = PresenceState::Idle;
        self.notifier.dismiss(Slot::Presence)
    }
}

/// Render the transferring presence notification
fn render_transferring(file_name: &str, percent: u8) -> Notification {
    let (body, progress) = if percent == 0 {
        ("Starting transfer...".to_string(), Progress::Indeterminate)
    } else {
        (format!("{percent}% complete"), Progress::Percent(percent))
    };

    Notification {
        slot: Slot::Presence,
        title: format!("Transferring: {file_name}"),
        body,
        progress: Some(progress),
        ongoing: true,
        urgency: Urgency::Low,
    }
}

/// Render the connection-handshake presence notification
fn render_connecting(device_name: &str) -> Notification {
    Notification {
        slot: Slot::Presence,
        title: "Connected".to_string(),
        body: format!("Connected to {device_name}"),
        progress: None,
        ongoing: true,
        urgency: Urgency::Low,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::RecordingNotifier;

    fn service() -> (PresenceService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = PresenceService::new(notifier.clone());
        (service, notifier)
    }

    // =========================================================================
    // Lifecycle Tests
    // =========================================================================

    #[test]
    fn test_start_update_stop_scenario() {
        let (mut service, notifier) = service();

        service.start("report.pdf").unwrap();
        assert_eq!(
            *service.state(),
            PresenceState::Transferring {
                file_name: "report.pdf".to_string(),
                percent: 0
            }
        );
        let posted = notifier.last_posted(Slot::Presence).unwrap();
        assert_eq!(posted.title, "Transferring: report.pdf");
        assert_eq!(posted.body, "Starting transfer...");
        assert_eq!(posted.progress, Some(Progress::Indeterminate));

        service.update("report.pdf", 42).unwrap();
        assert_eq!(
            *service.state(),
            PresenceState::Transferring {
                file_name: "report.pdf".to_string(),
                percent: 42
            }
        );
        let posted = notifier.last_posted(Slot::Presence).unwrap();
        assert_eq!(posted.body, "42% complete");
        assert_eq!(posted.progress, Some(Progress::Percent(42)));

        // All updates reuse the single presence slot
        assert_eq!(notifier.post_count(Slot::Presence), 2);

        service.stop().unwrap();
        assert_eq!(*service.state(), PresenceState::Idle);
        assert_eq!(notifier.dismiss_count(Slot::Presence), 1);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut service, notifier) = service();
        service.stop().unwrap();
        service.stop().unwrap();
        assert_eq!(*service.state(), PresenceState::Idle);
        assert_eq!(notifier.dismiss_count(Slot::Presence), 0);
    }

    #[test]
    fn test_connection_presence() {
        let (mut service, notifier) = service();

        service.start_connection("Pixel 9").unwrap();
        assert_eq!(
            *service.state(),
            PresenceState::Connecting {
                device_name: "Pixel 9".to_string()
            }
        );
        let posted = notifier.last_posted(Slot::Presence).unwrap();
        assert_eq!(posted.title, "Connected");
        assert_eq!(posted.body, "Connected to Pixel 9");
        assert_eq!(posted.progress, None);

        // Connecting transitions to transferring when the transfer starts
        service.start("report.pdf").unwrap();
        assert!(matches!(
            service.state(),
            PresenceState::Transferring { percent: 0, .. }
        ));
    }

    #[test]
    fn test_connection_only_reachable_from_idle() {
        let (mut service, _notifier) = service();
        service.start("report.pdf").unwrap();
        service.start_connection("Pixel 9").unwrap();
        assert!(matches!(
            service.state(),
            PresenceState::Transferring { .. }
        ));
    }

    #[test]
    fn test_update_sentinel_renders_handshake() {
        let (mut service, notifier) = service();
        service.update("Pixel 9", -1).unwrap();
        assert_eq!(
            *service.state(),
            PresenceState::Connecting {
                device_name: "Pixel 9".to_string()
            }
        );
        let posted = notifier.last_posted(Slot::Presence).unwrap();
        assert_eq!(posted.body, "Connected to Pixel 9");
    }

    #[test]
    fn test_update_clamps_percent() {
        let (mut service, notifier) = service();
        service.start("big.iso").unwrap();
        service.update("big.iso", 250).unwrap();
        let posted = notifier.last_posted(Slot::Presence).unwrap();
        assert_eq!(posted.progress, Some(Progress::Percent(100)));
    }
}
