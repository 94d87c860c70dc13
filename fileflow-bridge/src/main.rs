//! FileFlow platform bridge daemon

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use fileflow_bridge::args::Args;
use fileflow_bridge::bridge::Bridge;
use fileflow_bridge::connection;
use fileflow_bridge::constants::*;
use fileflow_bridge::notifications::DesktopNotifier;
use fileflow_common::PROTOCOL_VERSION;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Print banner first
    println!(
        "{}{} (protocol {})",
        MSG_BANNER,
        env!("CARGO_PKG_VERSION"),
        PROTOCOL_VERSION
    );

    let notifier = Arc::new(DesktopNotifier::new(&args.app_name));
    let bridge = Arc::new(Bridge::new(
        notifier,
        args.multicast_group,
        args.multicast_port,
        args.debug,
    ));

    // Bind the driver listener
    let addr = SocketAddr::new(args.bind, args.port);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("{}{}: {}", ERR_BIND_FAILED, addr, e);
            std::process::exit(1);
        }
    };
    println!("{}{}", MSG_LISTENING, addr);

    // Setup graceful shutdown handling
    let shutdown_signal = setup_shutdown_signal();

    let debug = args.debug;
    tokio::select! {
        _ = shutdown_signal => {
            println!("{}", MSG_SHUTDOWN_RECEIVED);
        }
        // Driver accept loop
        _ = async {
            loop {
                match listener.accept().await {
                    Ok((socket, peer_addr)) => {
                        if debug {
                            println!("Driver connected: {}", peer_addr);
                        }
                        let bridge = bridge.clone();
                        tokio::spawn(async move {
                            if let Err(e) =
                                connection::handle_connection(socket, peer_addr, bridge).await
                            {
                                eprintln!("{}{}: {}", ERR_CONNECTION, peer_addr, e);
                            } else if debug {
                                println!("Driver disconnected: {}", peer_addr);
                            }
                        });
                    }
                    Err(e) => {
                        eprintln!("{}{}", ERR_ACCEPT, e);
                    }
                }
            }
        } => {}
    }

    // Release the multicast reservation and clear the presence entry so the
    // OS is not left with a stale membership or an orphaned notification
    bridge.shutdown();
}

/// Setup graceful shutdown signal handling (Ctrl+C)
async fn setup_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate()).expect(ERR_SIGNAL_SIGTERM);
        let mut sigint = signal(SignalKind::interrupt()).expect(ERR_SIGNAL_SIGINT);

        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect(ERR_SIGNAL_CTRLC);
    }
}
