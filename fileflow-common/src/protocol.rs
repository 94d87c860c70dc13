//! Protocol definitions for the FileFlow bridge
//!
//! All messages are sent as newline-delimited JSON. A request is a loose
//! envelope — channel name, method name, flat argument object — and is
//! decoded at the boundary into the closed [`BridgeRequest`] sum type.
//! Missing or malformed arguments silently take their defaults; they are
//! never rejected. Every request receives exactly one acknowledgment.

use serde::{Deserialize, Deserializer, Serialize};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    CHANNEL_BACKGROUND, CHANNEL_MULTICAST, CHANNEL_NOTIFICATIONS, DEFAULT_DEVICE_LABEL,
    DEFAULT_FILE_LABEL,
};

// =============================================================================
// Message ID
// =============================================================================

/// Opaque request identifier echoed in the acknowledgment for correlation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random message ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Request Envelope
// =============================================================================

/// The loose inbound message shape: a named operation plus a bag of arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Correlation ID, echoed in the ack when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    /// Logical channel: "notifications", "background", or "multicast"
    pub channel: String,
    /// Operation name within the channel, camelCase
    pub method: String,
    /// Flat argument object; every field optional
    #[serde(default)]
    pub args: serde_json::Value,
}

impl Envelope {
    /// Build an envelope with a fresh message ID
    pub fn new(channel: &str, method: &str, args: serde_json::Value) -> Self {
        Self {
            id: Some(MessageId::new()),
            channel: channel.to_string(),
            method: method.to_string(),
            args,
        }
    }

    /// Serialize to a single JSON line (no trailing newline)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a JSON line into an envelope
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// Decode the envelope into a typed request.
    ///
    /// Returns `None` for an unknown channel or method — the caller answers
    /// with a "not implemented" ack and performs no side effect. Argument
    /// decoding never fails: each mistyped field takes its own default so
    /// valid sibling fields survive, and an argument value that is not an
    /// object at all falls back to the operation's defaults wholesale.
    pub fn decode(&self) -> Option<BridgeRequest> {
        let request = match (self.channel.as_str(), self.method.as_str()) {
            (CHANNEL_NOTIFICATIONS, "showConnectionRequest") => {
                BridgeRequest::ShowConnectionRequest(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showConnectionEstablished") => {
                BridgeRequest::ShowConnectionEstablished(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showConnectionRejected") => {
                BridgeRequest::ShowConnectionRejected(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferRequest") => {
                BridgeRequest::ShowTransferRequest(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferStarted") => {
                BridgeRequest::ShowTransferStarted(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "updateTransferProgress") => {
                BridgeRequest::UpdateTransferProgress(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferPaused") => {
                BridgeRequest::ShowTransferPaused(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferResumed") => {
                BridgeRequest::ShowTransferResumed(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferCompleted") => {
                BridgeRequest::ShowTransferCompleted(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showTransferCancelled") => {
                BridgeRequest::ShowTransferCancelled(self.decode_args())
            }
            (CHANNEL_NOTIFICATIONS, "showError") => BridgeRequest::ShowError(self.decode_args()),
            (CHANNEL_BACKGROUND, "startService") => BridgeRequest::StartService(self.decode_args()),
            (CHANNEL_BACKGROUND, "updateProgress") => {
                BridgeRequest::UpdateServiceProgress(self.decode_args())
            }
            (CHANNEL_BACKGROUND, "startConnectionService") => {
                BridgeRequest::StartConnectionService(self.decode_args())
            }
            (CHANNEL_BACKGROUND, "stopService") => BridgeRequest::StopService,
            (CHANNEL_MULTICAST, "acquire") => BridgeRequest::MulticastAcquire,
            (CHANNEL_MULTICAST, "release") => BridgeRequest::MulticastRelease,
            _ => return None,
        };
        Some(request)
    }

    /// Decode the argument object.
    ///
    /// Field-level tolerance lives in the argument structs themselves; this
    /// fallback only fires when `args` is not an object.
    fn decode_args<T: Default + DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.args.clone()).unwrap_or_default()
    }
}

// =============================================================================
// Lenient Field Decoding
// =============================================================================

/// Default reason for a rejected connection
const DEFAULT_REJECTED_REASON: &str = "Connection rejected";

/// Default reason for a cancelled transfer
const DEFAULT_CANCELLED_REASON: &str = "Cancelled";

/// Default title and message for showError
const DEFAULT_ERROR_TITLE: &str = "Error";
const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Deserialize a field, taking the type's zero value when it is mistyped.
///
/// Argument objects come from loosely-typed driver code; a single mistyped
/// field must not discard its valid siblings, so every field falls back on
/// its own.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(T::deserialize(deserializer).unwrap_or_default())
}

/// Deserialize a string field, taking the given label when it is mistyped
fn lenient_or<'de, D>(deserializer: D, fallback: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer).unwrap_or_else(|_| fallback.to_string()))
}

fn lenient_device_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_DEVICE_LABEL)
}

fn lenient_file_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_FILE_LABEL)
}

fn lenient_rejected_reason<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_REJECTED_REASON)
}

fn lenient_cancelled_reason<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_CANCELLED_REASON)
}

fn lenient_error_title<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_ERROR_TITLE)
}

fn lenient_error_message<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_or(d, DEFAULT_ERROR_MESSAGE)
}

// =============================================================================
// Typed Requests
// =============================================================================

/// A fully decoded bridge operation with a strongly-typed payload
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    /// A peer is asking to connect
    ShowConnectionRequest(DeviceArgs),
    /// A connection to a peer succeeded
    ShowConnectionEstablished(DeviceArgs),
    /// A peer declined the connection
    ShowConnectionRejected(ConnectionRejectedArgs),
    /// A peer offers an incoming file
    ShowTransferRequest(TransferRequestArgs),
    /// A transfer began
    ShowTransferStarted(TransferStartedArgs),
    /// Periodic progress update for the running transfer
    UpdateTransferProgress(TransferProgressArgs),
    /// The transfer was paused
    ShowTransferPaused(FileArgs),
    /// The transfer resumed
    ShowTransferResumed(FileArgs),
    /// The transfer finished successfully
    ShowTransferCompleted(TransferCompletedArgs),
    /// The transfer was cancelled or failed
    ShowTransferCancelled(TransferCancelledArgs),
    /// Free-form error surfaced to the user
    ShowError(ErrorArgs),
    /// Begin foreground presence for a transfer
    StartService(FileArgs),
    /// Update the foreground presence progress
    UpdateServiceProgress(ServiceProgressArgs),
    /// Begin foreground presence for a connection handshake
    StartConnectionService(DeviceArgs),
    /// End foreground presence
    StopService,
    /// Acquire the multicast discovery reservation
    MulticastAcquire,
    /// Release the multicast discovery reservation
    MulticastRelease,
}

/// Arguments carrying only a device name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceArgs {
    #[serde(deserialize_with = "lenient_device_name")]
    pub device_name: String,
}

impl Default for DeviceArgs {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_LABEL.to_string(),
        }
    }
}

/// Arguments carrying only a file name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
}

impl Default for FileArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
        }
    }
}

/// Arguments for showConnectionRejected
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionRejectedArgs {
    #[serde(deserialize_with = "lenient_device_name")]
    pub device_name: String,
    #[serde(deserialize_with = "lenient_rejected_reason")]
    pub reason: String,
}

impl Default for ConnectionRejectedArgs {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_LABEL.to_string(),
            reason: DEFAULT_REJECTED_REASON.to_string(),
        }
    }
}

/// Arguments for showTransferRequest
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferRequestArgs {
    #[serde(deserialize_with = "lenient_device_name")]
    pub device_name: String,
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub file_size: u64,
}

impl Default for TransferRequestArgs {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_LABEL.to_string(),
            file_name: DEFAULT_FILE_LABEL.to_string(),
            file_size: 0,
        }
    }
}

/// Arguments for showTransferStarted
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferStartedArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub is_sending: bool,
}

impl Default for TransferStartedArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
            is_sending: false,
        }
    }
}

/// Arguments for updateTransferProgress
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferProgressArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub progress: i64,
    #[serde(rename = "speedMBps", deserialize_with = "lenient")]
    pub speed_mbps: f64,
    #[serde(deserialize_with = "lenient")]
    pub is_sending: bool,
}

impl Default for TransferProgressArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
            progress: 0,
            speed_mbps: 0.0,
            is_sending: false,
        }
    }
}

/// Arguments for showTransferCompleted
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferCompletedArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub file_size: u64,
    #[serde(deserialize_with = "lenient")]
    pub is_sending: bool,
}

impl Default for TransferCompletedArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
            file_size: 0,
            is_sending: false,
        }
    }
}

/// Arguments for showTransferCancelled
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferCancelledArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient_cancelled_reason")]
    pub reason: String,
}

impl Default for TransferCancelledArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
            reason: DEFAULT_CANCELLED_REASON.to_string(),
        }
    }
}

/// Arguments for showError
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorArgs {
    #[serde(deserialize_with = "lenient_error_title")]
    pub title: String,
    #[serde(deserialize_with = "lenient_error_message")]
    pub message: String,
}

impl Default for ErrorArgs {
    fn default() -> Self {
        Self {
            title: DEFAULT_ERROR_TITLE.to_string(),
            message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Arguments for the background channel's updateProgress.
///
/// `progress` stays signed so the -1 "connecting" sentinel survives decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceProgressArgs {
    #[serde(deserialize_with = "lenient_file_name")]
    pub file_name: String,
    #[serde(deserialize_with = "lenient")]
    pub progress: i64,
}

impl Default for ServiceProgressArgs {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_LABEL.to_string(),
            progress: 0,
        }
    }
}

// =============================================================================
// Acknowledgments
// =============================================================================

/// Acknowledgment status for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BridgeAck {
    /// Operation accepted (the only status a known operation ever returns)
    Ok,
    /// Unknown channel or method; no side effect was performed
    NotImplemented { method: String },
    /// The line was not a valid request envelope at all
    Error { message: String },
}

/// Acknowledgment envelope written back for every request line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckEnvelope {
    /// Echo of the request's correlation ID, if it carried one
    pub id: Option<MessageId>,
    #[serde(flatten)]
    pub ack: BridgeAck,
}

impl AckEnvelope {
    /// Build an `ok` ack echoing the given ID
    pub fn ok(id: Option<MessageId>) -> Self {
        Self {
            id,
            ack: BridgeAck::Ok,
        }
    }

    /// Build a `not_implemented` ack for an unknown operation
    pub fn not_implemented(id: Option<MessageId>, method: &str) -> Self {
        Self {
            id,
            ack: BridgeAck::NotImplemented {
                method: method.to_string(),
            },
        }
    }

    /// Build an `error` ack for an unparseable request line
    pub fn error(message: &str) -> Self {
        Self {
            id: None,
            ack: BridgeAck::Error {
                message: message.to_string(),
            },
        }
    }

    /// Serialize to a single JSON line (no trailing newline)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a JSON line into an ack envelope
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(channel: &str, method: &str, args: serde_json::Value) -> Envelope {
        Envelope::new(channel, method, args)
    }

    // =========================================================================
    // Decode Tests
    // =========================================================================

    #[test]
    fn test_decode_notification_method() {
        let env = envelope(
            CHANNEL_NOTIFICATIONS,
            "updateTransferProgress",
            json!({"fileName": "report.pdf", "progress": 42, "speedMBps": 2.456, "isSending": true}),
        );
        let decoded = env.decode().unwrap();
        assert_eq!(
            decoded,
            BridgeRequest::UpdateTransferProgress(TransferProgressArgs {
                file_name: "report.pdf".to_string(),
                progress: 42,
                speed_mbps: 2.456,
                is_sending: true,
            })
        );
    }

    #[test]
    fn test_decode_background_methods() {
        let env = envelope(CHANNEL_BACKGROUND, "startService", json!({"fileName": "a.txt"}));
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::StartService(FileArgs {
                file_name: "a.txt".to_string()
            })
        );

        let env = envelope(CHANNEL_BACKGROUND, "stopService", json!({}));
        assert_eq!(env.decode().unwrap(), BridgeRequest::StopService);

        let env = envelope(CHANNEL_BACKGROUND, "updateProgress", json!({"progress": -1}));
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::UpdateServiceProgress(ServiceProgressArgs {
                file_name: "File".to_string(),
                progress: -1,
            })
        );
    }

    #[test]
    fn test_decode_multicast_methods() {
        let env = envelope(CHANNEL_MULTICAST, "acquire", json!({}));
        assert_eq!(env.decode().unwrap(), BridgeRequest::MulticastAcquire);
        let env = envelope(CHANNEL_MULTICAST, "release", json!({}));
        assert_eq!(env.decode().unwrap(), BridgeRequest::MulticastRelease);
    }

    #[test]
    fn test_decode_unknown_method() {
        let env = envelope(CHANNEL_NOTIFICATIONS, "frobnicate", json!({}));
        assert!(env.decode().is_none());
    }

    #[test]
    fn test_decode_unknown_channel() {
        let env = envelope("telemetry", "showError", json!({}));
        assert!(env.decode().is_none());
    }

    #[test]
    fn test_decode_method_on_wrong_channel() {
        // Known method name but on the wrong channel is still unknown
        let env = envelope(CHANNEL_MULTICAST, "showError", json!({}));
        assert!(env.decode().is_none());
    }

    // =========================================================================
    // Default Tests
    // =========================================================================

    #[test]
    fn test_missing_args_take_defaults() {
        let env = envelope(CHANNEL_NOTIFICATIONS, "showTransferRequest", json!({}));
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::ShowTransferRequest(TransferRequestArgs {
                device_name: "Device".to_string(),
                file_name: "File".to_string(),
                file_size: 0,
            })
        );
    }

    #[test]
    fn test_partial_args_keep_remaining_defaults() {
        let env = envelope(
            CHANNEL_NOTIFICATIONS,
            "showConnectionRejected",
            json!({"deviceName": "Pixel 9"}),
        );
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::ShowConnectionRejected(ConnectionRejectedArgs {
                device_name: "Pixel 9".to_string(),
                reason: "Connection rejected".to_string(),
            })
        );
    }

    #[test]
    fn test_mistyped_field_keeps_valid_siblings() {
        // One wrongly-typed field defaults alone; the rest decode normally
        let env = envelope(
            CHANNEL_NOTIFICATIONS,
            "showTransferCompleted",
            json!({"fileName": "report.pdf", "fileSize": "not-a-number", "isSending": true}),
        );
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::ShowTransferCompleted(TransferCompletedArgs {
                file_name: "report.pdf".to_string(),
                file_size: 0,
                is_sending: true,
            })
        );
    }

    #[test]
    fn test_mistyped_string_field_takes_its_label() {
        let env = envelope(
            CHANNEL_NOTIFICATIONS,
            "showConnectionRejected",
            json!({"deviceName": 17, "reason": "busy"}),
        );
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::ShowConnectionRejected(ConnectionRejectedArgs {
                device_name: "Device".to_string(),
                reason: "busy".to_string(),
            })
        );
    }

    #[test]
    fn test_non_object_args_fall_back_wholesale() {
        let env = envelope(CHANNEL_NOTIFICATIONS, "showError", json!([1, 2, 3]));
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::ShowError(ErrorArgs {
                title: "Error".to_string(),
                message: "An error occurred".to_string(),
            })
        );
    }

    #[test]
    fn test_envelope_without_args_field() {
        let env = Envelope::from_json(r#"{"channel":"background","method":"startService"}"#)
            .unwrap();
        assert_eq!(
            env.decode().unwrap(),
            BridgeRequest::StartService(FileArgs::default())
        );
    }

    // =========================================================================
    // Serialization Tests
    // =========================================================================

    #[test]
    fn test_envelope_round_trip() {
        let env = envelope(CHANNEL_BACKGROUND, "updateProgress", json!({"progress": 7}));
        let line = env.to_json().unwrap();
        let parsed = Envelope::from_json(&line).unwrap();
        assert_eq!(parsed.channel, CHANNEL_BACKGROUND);
        assert_eq!(parsed.method, "updateProgress");
        assert_eq!(parsed.id, env.id);
    }

    #[test]
    fn test_ack_serialization() {
        let ack = AckEnvelope::ok(None);
        let line = ack.to_json().unwrap();
        assert!(line.contains(r#""status":"ok""#));
        assert_eq!(AckEnvelope::from_json(&line).unwrap(), ack);

        let ack = AckEnvelope::not_implemented(Some(MessageId::new()), "frobnicate");
        let line = ack.to_json().unwrap();
        assert!(line.contains(r#""status":"not_implemented""#));
        assert!(line.contains("frobnicate"));
        assert_eq!(AckEnvelope::from_json(&line).unwrap(), ack);

        let ack = AckEnvelope::error("invalid request format");
        let line = ack.to_json().unwrap();
        assert!(line.contains(r#""status":"error""#));
    }

    #[test]
    fn test_message_id_unique() {
        assert_ne!(MessageId::new(), MessageId::new());
        assert_eq!(MessageId::new().as_str().len(), 32);
    }
}
