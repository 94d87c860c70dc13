//! Daemon-wide constants

/// Application name shown by desktop notification backends
pub const DEFAULT_APP_NAME: &str = "FileFlow";

/// Startup banner prefix
pub const MSG_BANNER: &str = "FileFlow bridge v";

/// Log prefix for handler failures
pub const ERR_HANDLING_REQUEST: &str = "Error handling request: ";

/// Log prefix for framing failures
pub const ERR_READ_REQUEST: &str = "Error reading request from ";

/// Log prefix for notification sink failures
pub const ERR_NOTIFICATION: &str = "Failed to show notification: ";

/// Log prefix for notification dismissal failures
pub const ERR_DISMISS: &str = "Failed to dismiss notification: ";

/// Log prefix for multicast reservation failures
pub const ERR_MULTICAST: &str = "Multicast reservation error: ";

/// Listener startup message prefix
pub const MSG_LISTENING: &str = "Listening on ";

/// Shutdown message printed when a termination signal arrives
pub const MSG_SHUTDOWN_RECEIVED: &str = "Shutdown signal received, stopping bridge...";

/// Log prefix for accept loop failures
pub const ERR_ACCEPT: &str = "Failed to accept connection: ";

/// Log prefix for listener bind failures
pub const ERR_BIND_FAILED: &str = "Failed to bind to ";

/// Log prefix for connection failures
pub const ERR_CONNECTION: &str = "Connection error from ";

/// Signal handler setup failure messages
pub const ERR_SIGNAL_SIGTERM: &str = "failed to install SIGTERM handler";
pub const ERR_SIGNAL_SIGINT: &str = "failed to install SIGINT handler";
pub const ERR_SIGNAL_CTRLC: &str = "failed to install Ctrl+C handler";
