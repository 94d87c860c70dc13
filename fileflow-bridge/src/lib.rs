//! FileFlow Bridge Library
//!
//! This library exposes the daemon's internal modules for integration testing.

pub mod args;
pub mod bridge;
pub mod connection;
pub mod constants;
pub mod handlers;
pub mod multicast;
pub mod notifications;
pub mod presence;
