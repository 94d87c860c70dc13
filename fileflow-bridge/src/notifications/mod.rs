//! Platform desktop notifications keyed by fixed identity slots
//!
//! This module provides a unified interface for rendering bridge events as
//! desktop notifications. Each notification is posted under a fixed slot id
//! so successive posts to the same slot replace the visible entry instead of
//! stacking, and terminal events never collide with lifecycle events.

use std::io;

#[cfg(all(unix, not(target_os = "macos")))]
mod linux;

#[cfg(target_os = "windows")]
mod windows;

/// Identity slot for the live foreground presence notification
pub const PRESENCE_NOTIFICATION_ID: u32 = 1001;

/// Identity slot for connection events
pub const CONNECTION_NOTIFICATION_ID: u32 = 2001;

/// Identity slot for transfer lifecycle events
pub const TRANSFER_NOTIFICATION_ID: u32 = 2002;

/// Identity slot for terminal events (completed, cancelled, error)
pub const ALERT_NOTIFICATION_ID: u32 = 2003;

/// Notification identity partition.
///
/// Events that describe the same ongoing thing share a slot so updates
/// replace one another; terminal events live in their own slot so a later
/// lifecycle event cannot silently overwrite them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The ongoing foreground presence entry
    Presence,
    /// Connection request / established / rejected
    Connection,
    /// Transfer request / started / progress / paused / resumed
    Transfer,
    /// Completed / cancelled / error
    Alert,
}

impl Slot {
    /// The fixed numeric identity under which the OS groups this slot
    pub fn id(self) -> u32 {
        match self {
            Slot::Presence => PRESENCE_NOTIFICATION_ID,
            Slot::Connection => CONNECTION_NOTIFICATION_ID,
            Slot::Transfer => TRANSFER_NOTIFICATION_ID,
            Slot::Alert => ALERT_NOTIFICATION_ID,
        }
    }
}

/// Urgency of a rendered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

/// Progress bar state for a rendered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Activity without a known percentage
    Indeterminate,
    /// A percentage in 0..=100
    Percent(u8),
}

/// A fully rendered notification, ready for a platform backend
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub slot: Slot,
    pub title: String,
    pub body: String,
    pub progress: Option<Progress>,
    /// Whether the entry represents ongoing work and should not auto-dismiss
    pub ongoing: bool,
    pub urgency: Urgency,
}

/// Sink for rendered notifications.
///
/// Implementations must be best-effort: a failure is reported through the
/// returned result and logged by the caller, never surfaced to the driver.
pub trait Notifier: Send + Sync {
    /// Show or replace the notification in its slot
    fn post(&self, notification: &Notification) -> io::Result<()>;

    /// Remove the notification in the given slot, if any
    fn dismiss(&self, slot: Slot) -> io::Result<()>;
}

/// Desktop notification backend for the current platform
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Create a desktop notifier posting under the given application name
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }
}

#[allow(unused_variables)]
impl Notifier for DesktopNotifier {
    fn post(&self, notification: &Notification) -> io::Result<()> {
        #[cfg(all(unix, not(target_os = "macos")))]
        return linux::post(&self.app_name, notification);

        #[cfg(target_os = "windows")]
        return windows::post(notification);

        // macOS: basic notification without slot replacement
        #[cfg(target_os = "macos")]
        return post_basic(&self.app_name, notification);

        #[cfg(not(any(unix, target_os = "windows")))]
        Ok(())
    }

    fn dismiss(&self, slot: Slot) -> io::Result<()> {
        #[cfg(all(unix, not(target_os = "macos")))]
        return linux::dismiss(slot);

        // Windows toasts and macOS banners expire on their own
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        Ok(())
    }
}

/// Basic notification without slot handling (fallback for macOS)
#[cfg(target_os = "macos")]
fn post_basic(app_name: &str, notification: &Notification) -> io::Result<()> {
    use notify_rust::Notification as OsNotification;

    OsNotification::new()
        .appname(app_name)
        .summary(&notification.title)
        .body(&notification.body)
        .show()
        .map(|_| ())
        .map_err(io::Error::other)
}
