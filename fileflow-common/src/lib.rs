//! FileFlow Common Library
//!
//! Shared protocol types, wire framing, and display formatting for the
//! FileFlow notification bridge. The bridge daemon and any driver
//! implementation both speak the line-delimited JSON protocol defined here.

pub mod format;
pub mod framing;
pub mod io;
pub mod protocol;

/// Version information for the bridge protocol
pub const PROTOCOL_VERSION: &str = "1.0";

/// Default port the bridge daemon listens on for driver connections
pub const DEFAULT_BRIDGE_PORT: u16 = 7600;

/// Default multicast group reserved for peer discovery
pub const DEFAULT_MULTICAST_GROUP: &str = "239.255.70.70";

/// Default port for the multicast discovery reservation
pub const DEFAULT_MULTICAST_PORT: u16 = 7601;

/// Channel name for notification events
pub const CHANNEL_NOTIFICATIONS: &str = "notifications";

/// Channel name for the foreground presence service
pub const CHANNEL_BACKGROUND: &str = "background";

/// Channel name for the multicast reservation guard
pub const CHANNEL_MULTICAST: &str = "multicast";

/// Label used when a request omits or mangles the file name
pub const DEFAULT_FILE_LABEL: &str = "File";

/// Label used when a request omits or mangles the device name
pub const DEFAULT_DEVICE_LABEL: &str = "Device";

/// Progress sentinel meaning "connected, handshaking" rather than a percentage
pub const CONNECTING_SENTINEL: i64 = -1;
