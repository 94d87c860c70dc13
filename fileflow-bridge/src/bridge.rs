//! The bridge service object
//!
//! One `Bridge` is constructed at process start and handed by reference to
//! every connection. It owns the notification sink, the presence state
//! machine, and the multicast reservation guard; there is no ambient global
//! state. All OS failures stop here: they are logged and never travel back
//! to the driver.

use std::io;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use crate::constants::{ERR_MULTICAST, ERR_NOTIFICATION};
use crate::multicast::MulticastGuard;
use crate::notifications::{Notification, Notifier};
use crate::presence::PresenceService;

/// Shared bridge services for all connections
pub struct Bridge {
    notifier: Arc<dyn Notifier>,
    presence: Mutex<PresenceService>,
    multicast: Mutex<MulticastGuard>,
    pub debug: bool,
}

impl Bridge {
    /// Construct the bridge with its notification sink and multicast target
    pub fn new(
        notifier: Arc<dyn Notifier>,
        multicast_group: Ipv4Addr,
        multicast_port: u16,
        debug: bool,
    ) -> Self {
        Self {
            presence: Mutex::new(PresenceService::new(notifier.clone())),
            multicast: Mutex::new(MulticastGuard::new(multicast_group, multicast_port)),
            notifier,
            debug,
        }
    }

    /// Post a notification, logging any sink failure
    pub fn post_logged(&self, notification: &Notification) {
        if let Err(e) = self.notifier.post(notification) {
            eprintln!("{}{}", ERR_NOTIFICATION, e);
        }
    }

    /// Run an operation against the presence service, logging any failure
    pub fn presence_op<F>(&self, op: F)
    where
        F: FnOnce(&mut PresenceService) -> io::Result<()>,
    {
        match self.presence.lock() {
            Ok(mut presence) => {
                if let Err(e) = op(&mut presence) {
                    eprintln!("{}{}", ERR_NOTIFICATION, e);
                }
            }
            Err(_) => eprintln!("{}presence lock poisoned", ERR_NOTIFICATION),
        }
    }

    /// Run an operation against the multicast guard, logging any failure
    pub fn multicast_op<F>(&self, op: F)
    where
        F: FnOnce(&mut MulticastGuard) -> io::Result<()>,
    {
        match self.multicast.lock() {
            Ok(mut guard) => {
                if let Err(e) = op(&mut guard) {
                    eprintln!("{}{}", ERR_MULTICAST, e);
                }
            }
            Err(_) => eprintln!("{}guard lock poisoned", ERR_MULTICAST),
        }
    }

    /// Whether the multicast reservation is currently held
    pub fn multicast_held(&self) -> bool {
        self.multicast.lock().map(|g| g.is_held()).unwrap_or(false)
    }

    /// Snapshot of the presence state, for inspection
    pub fn presence_active(&self) -> bool {
        self.presence.lock().map(|p| p.is_active()).unwrap_or(false)
    }

    /// Process teardown: drop the reservation and remove the presence entry
    pub fn shutdown(&self) {
        self.multicast_op(|guard| {
            guard.force_release();
            Ok(())
        });
        self.presence_op(|presence| presence.stop());
    }
}
