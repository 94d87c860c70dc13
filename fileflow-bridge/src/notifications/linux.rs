//! Linux desktop notifications via notify-rust
//!
//! Posts carry the slot's numeric id so the notification server replaces the
//! existing entry in place. Handles are retained per slot because some
//! desktop environments (GNOME, Cinnamon) close a notification as soon as
//! its D-Bus connection drops, and retained handles are also what allows
//! explicit dismissal.

use std::io;
use std::sync::Mutex;

use notify_rust::{Hint, Notification as OsNotification, NotificationHandle, Timeout};

use super::{Notification, Progress, Slot, Urgency};

/// Auto-dismiss timeout for non-ongoing notifications (milliseconds)
const DISMISS_TIMEOUT_MS: u32 = 5000;

/// Live handles, one per slot id
static NOTIFICATION_HANDLES: Mutex<Vec<(u32, NotificationHandle)>> = Mutex::new(Vec::new());

/// Show or replace the notification in its slot
pub fn post(app_name: &str, notification: &Notification) -> io::Result<()> {
    let mut os_notification = OsNotification::new();
    os_notification
        .appname(app_name)
        .summary(&notification.title)
        .body(&notification.body)
        .auto_icon()
        .id(notification.slot.id())
        .urgency(map_urgency(notification.urgency));

    if notification.ongoing {
        os_notification.timeout(Timeout::Never);
    } else {
        os_notification.timeout(Timeout::Milliseconds(DISMISS_TIMEOUT_MS));
    }

    if let Some(Progress::Percent(percent)) = notification.progress {
        // Rendered as a bar by servers that honor the "value" hint
        os_notification.hint(Hint::CustomInt("value".to_string(), i32::from(percent)));
    }

    let handle = os_notification.show().map_err(io::Error::other)?;

    if let Ok(mut handles) = NOTIFICATION_HANDLES.lock() {
        handles.retain(|(id, _)| *id != notification.slot.id());
        handles.push((notification.slot.id(), handle));
    }

    Ok(())
}

/// Remove the notification in the given slot, if any
pub fn dismiss(slot: Slot) -> io::Result<()> {
    let handle = {
        let mut handles = NOTIFICATION_HANDLES
            .lock()
            .map_err(|_| io::Error::other("notification handle lock poisoned"))?;
        let position = handles.iter().position(|(id, _)| *id == slot.id());
        position.map(|index| handles.remove(index).1)
    };

    if let Some(handle) = handle {
        handle.close();
    }
    Ok(())
}

fn map_urgency(urgency: Urgency) -> notify_rust::Urgency {
    match urgency {
        Urgency::Low => notify_rust::Urgency::Low,
        Urgency::Normal => notify_rust::Urgency::Normal,
        Urgency::Critical => notify_rust::Urgency::Critical,
    }
}
