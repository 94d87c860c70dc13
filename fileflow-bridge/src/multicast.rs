//! Reference-counted multicast discovery reservation
//!
//! Peer discovery needs the process to hold a multicast group membership
//! while any part of the application wants it. The guard counts acquire and
//! release calls from the driver, opens the underlying socket lazily on the
//! first acquire, and drops it only when the count returns to zero. Losing
//! the reservation degrades discovery but must never crash the daemon, so
//! open failures are reported to the caller for logging and retried on the
//! next acquire.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};

// =============================================================================
// Generic Guard
// =============================================================================

/// Reference-counted lazy holder for a scarce resource.
///
/// `acquire_with` and `release` are both idempotent in the sense required of
/// the bridge: N acquires followed by one release leave the resource held,
/// and releasing when nothing is held is a no-op.
pub struct RefCountedGuard<R> {
    count: u32,
    resource: Option<R>,
}

impl<R> RefCountedGuard<R> {
    /// Create an empty guard
    pub fn new() -> Self {
        Self {
            count: 0,
            resource: None,
        }
    }

    /// Record an acquire, opening the resource if it is not already held.
    ///
    /// The count increments even when `open` fails so the balance with
    /// `release` is preserved; the next acquire retries the open.
    pub fn acquire_with<F>(&mut self, open: F) -> io::Result<()>
    where
        F: FnOnce() -> io::Result<R>,
    {
        self.count += 1;
        if self.resource.is_none() {
            self.resource = Some(open()?);
        }
        Ok(())
    }

    /// Record a release, dropping the resource when the count reaches zero.
    ///
    /// Returns `true` if the resource was dropped by this call. Releasing
    /// when the count is already zero is a no-op.
    pub fn release(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        if self.count == 0 && self.resource.is_some() {
            self.resource = None;
            return true;
        }
        false
    }

    /// Drop the resource and zero the count unconditionally (process teardown)
    pub fn force_release(&mut self) {
        self.count = 0;
        self.resource = None;
    }

    /// Whether the underlying resource is currently held
    pub fn is_held(&self) -> bool {
        self.resource.is_some()
    }

    /// Current acquire/release balance
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl<R> Default for RefCountedGuard<R> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Multicast Reservation
// =============================================================================

/// A held multicast group membership; leaves the group on drop
pub struct MulticastReservation {
    socket: Socket,
    group: Ipv4Addr,
}

impl MulticastReservation {
    /// Open a UDP socket bound to the discovery port and join the group
    pub fn open(group: Ipv4Addr, port: u16) -> io::Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        socket.bind(&address.into())?;
        socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;
        Ok(Self { socket, group })
    }
}

impl Drop for MulticastReservation {
    fn drop(&mut self) {
        let _ = self
            .socket
            .leave_multicast_v4(&self.group, &Ipv4Addr::UNSPECIFIED);
    }
}

/// Reference-counted guard over the discovery multicast reservation
pub struct MulticastGuard {
    inner: RefCountedGuard<MulticastReservation>,
    group: Ipv4Addr,
    port: u16,
}

impl MulticastGuard {
    /// Create a guard for the given group and port; nothing is opened yet
    pub fn new(group: Ipv4Addr, port: u16) -> Self {
        Self {
            inner: RefCountedGuard::new(),
            group,
            port,
        }
    }

    /// Acquire the reservation, opening it on the first call
    pub fn acquire(&mut self) -> io::Result<()> {
        let (group, port) = (self.group, self.port);
        self.inner
            .acquire_with(|| MulticastReservation::open(group, port))
    }

    /// Release the reservation; drops the socket at a zero balance
    pub fn release(&mut self) -> bool {
        self.inner.release()
    }

    /// Drop the reservation unconditionally (process teardown)
    pub fn force_release(&mut self) {
        self.inner.force_release();
    }

    /// Whether the reservation is currently held
    pub fn is_held(&self) -> bool {
        self.inner.is_held()
    }
}

// =============================================================================
// Tests
// =============================================================================
