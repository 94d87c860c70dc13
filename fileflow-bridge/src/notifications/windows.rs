//! Windows desktop notifications via toast notifications
//!
//! Toasts on this backend cannot be updated in place or dismissed by id, so
//! posts are best-effort one-shot banners.

use std::io;

use tauri_winrt_notification::{Duration, Toast};

use super::Notification;

/// Show a toast for the notification
pub fn post(notification: &Notification) -> io::Result<()> {
    // PowerShell's App ID works as a fallback without a registered AUMID
    let mut toast = Toast::new(Toast::POWERSHELL_APP_ID);
    toast = toast.title(&notification.title);
    toast = toast.text1(&notification.body);

    if !notification.ongoing {
        toast = toast.duration(Duration::Short);
    }

    toast.show().map_err(|e| io::Error::other(e.to_string()))
}
