use std::net::SocketAddr;

use anyhow::{Context, Result};
use codec::{MAX_DATAGRAM_SIZE, classify};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use crate::{
    reporter::{Report, Reporter},
    statistics::Statistics,
};

/// Owns the udp socket and feeds every datagram to the classifier.
pub struct Listener {
    socket: UdpSocket,
}

impl Listener {
    /// Create, configure and bind the socket.
    ///
    /// `SO_REUSEADDR` (and `SO_REUSEPORT` where available) is set so the
    /// scanner can share a port with the application it is watching.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn bind(listen: SocketAddr) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(listen), Type::DGRAM, Some(Protocol::UDP))
            .with_context(|| format!("error creating udp socket for {listen}"))?;

        socket
            .set_reuse_address(true)
            .context("setsockopt(SO_REUSEADDR) failed")?;

        #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos", target_os = "cygwin"))))]
        socket
            .set_reuse_port(true)
            .context("setsockopt(SO_REUSEPORT) failed")?;

        socket.set_nonblocking(true)?;
        socket
            .bind(&listen.into())
            .with_context(|| format!("bind error: {listen}"))?;

        Ok(Self {
            socket: UdpSocket::from_std(socket.into())?,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive loop.
    ///
    /// One datagram is received, classified, decoded and reported before
    /// the next receive. The loop ends on a receive error or an empty
    /// datagram; both are logged and not treated as failures.
    pub async fn run<R: Reporter>(self, reporter: &mut R) -> Statistics {
        let local_addr = self.socket.local_addr().ok();
        let mut statistics = Statistics::default();
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (size, addr) = match self.socket.recv_from(&mut buf).await {
                Ok(s) => s,
                Err(e) => {
                    log::error!("udp socket receive failed: err={}, interface={:?}", e, local_addr);
                    break;
                }
            };

            if size == 0 {
                log::info!("udp socket closed: addr={:?}, interface={:?}", addr, local_addr);
                break;
            }

            log::trace!(
                "udp socket receive: size={}, addr={:?}, interface={:?}",
                size,
                addr,
                local_addr
            );

            let report = Report::new(size, classify(&buf[..size]));
            statistics.record(&report);

            if let Report::Discarded(discard) = &report {
                log::warn!("datagram discarded: {:?}, addr={:?}", discard, addr);
            }

            if let Err(e) = reporter.report(&report) {
                log::warn!("report failed: err={}", e);
            }
        }

        log::info!("listener stopped: {}", statistics);
        statistics
    }
}
