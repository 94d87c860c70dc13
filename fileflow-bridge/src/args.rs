//! Command-line arguments

use std::net::{IpAddr, Ipv4Addr};

use clap::Parser;

use fileflow_common::{DEFAULT_BRIDGE_PORT, DEFAULT_MULTICAST_GROUP, DEFAULT_MULTICAST_PORT};

use crate::constants::DEFAULT_APP_NAME;

#[derive(Parser, Debug)]
#[command(name = "fileflowd", about = "FileFlow platform bridge daemon")]
pub struct Args {
    /// Address to bind the bridge listener to
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to listen for driver connections on
    #[arg(long, default_value_t = DEFAULT_BRIDGE_PORT)]
    pub port: u16,

    /// Multicast group joined while a discovery reservation is held
    #[arg(long, default_value = DEFAULT_MULTICAST_GROUP)]
    pub multicast_group: Ipv4Addr,

    /// Port the multicast membership is bound to
    #[arg(long, default_value_t = DEFAULT_MULTICAST_PORT)]
    pub multicast_port: u16,

    /// Application name shown on desktop notifications
    #[arg(long, default_value = DEFAULT_APP_NAME)]
    pub app_name: String,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["fileflowd"]);
        assert_eq!(args.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(args.port, DEFAULT_BRIDGE_PORT);
        assert_eq!(args.multicast_group, "239.255.70.70".parse::<Ipv4Addr>().unwrap());
        assert_eq!(args.multicast_port, DEFAULT_MULTICAST_PORT);
        assert_eq!(args.app_name, DEFAULT_APP_NAME);
        assert!(!args.debug);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "fileflowd",
            "--bind",
            "0.0.0.0",
            "--port",
            "9600",
            "--multicast-group",
            "239.1.2.3",
            "--app-name",
            "FileFlow Dev",
            "--debug",
        ]);
        assert_eq!(args.bind, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(args.port, 9600);
        assert_eq!(args.multicast_group, "239.1.2.3".parse::<Ipv4Addr>().unwrap());
        assert_eq!(args.app_name, "FileFlow Dev");
        assert!(args.debug);
    }
}
