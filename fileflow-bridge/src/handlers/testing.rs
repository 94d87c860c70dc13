//! Shared test utilities for handler tests

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use fileflow_common::protocol::AckEnvelope;

use crate::bridge::Bridge;
use crate::notifications::{Notification, Notifier, Slot};

/// Peer address used in handler tests
pub fn test_peer_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4242))
}

/// Build a bridge around a test notifier; the multicast guard is left unopened
pub fn bridge_with(notifier: Arc<RecordingNotifier>) -> Bridge {
    Bridge::new(notifier, Ipv4Addr::new(239, 255, 70, 70), 0, false)
}

/// Parse the ack lines a handler wrote into a buffer
pub fn decode_acks(buffer: &[u8]) -> Vec<AckEnvelope> {
    String::from_utf8(buffer.to_vec())
        .expect("ack buffer is UTF-8")
        .lines()
        .map(|line| AckEnvelope::from_json(line).expect("ack line parses"))
        .collect()
}

/// Notification sink that records every post and dismissal
pub struct RecordingNotifier {
    posts: Mutex<Vec<Notification>>,
    dismissals: Mutex<Vec<Slot>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            dismissals: Mutex::new(Vec::new()),
        }
    }

    /// The most recent notification posted to the given slot
    pub fn last_posted(&self, slot: Slot) -> Option<Notification> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.slot == slot)
            .cloned()
    }

    /// Number of posts to the given slot
    pub fn post_count(&self, slot: Slot) -> usize {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.slot == slot)
            .count()
    }

    /// Number of posts across all slots
    pub fn total_posts(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    /// Number of dismissals of the given slot
    pub fn dismiss_count(&self, slot: Slot) -> usize {
        self.dismissals
            .lock()
            .unwrap()
            .iter()
            .filter(|s| **s == slot)
            .count()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn post(&self, notification: &Notification) -> std::io::Result<()> {
        self.posts.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn dismiss(&self, slot: Slot) -> std::io::Result<()> {
        self.dismissals.lock().unwrap().push(slot);
        Ok(())
    }
}
