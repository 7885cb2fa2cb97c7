use std::fmt;

use crate::reporter::Report;

/// The type of information counted per received datagram
#[derive(Debug, Clone, Copy)]
pub enum Stats {
    ReceivedBytes(usize),
    ReceivedPkts(usize),
    RtpPkts(usize),
    RtcpPkts(usize),
    DiscardedPkts(usize),
}

/// Counters for one listener run.
///
/// Owned by the receive loop and never shared, so plain integers are
/// enough.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub received_bytes: usize,
    pub received_pkts: usize,
    pub rtp_pkts: usize,
    pub rtcp_pkts: usize,
    pub discarded_pkts: usize,
}

impl Statistics {
    /// # Example
    ///
    /// ```
    /// use rtp_scanner::statistics::*;
    ///
    /// let mut statistics = Statistics::default();
    ///
    /// statistics.add(&Stats::ReceivedBytes(13));
    /// assert_eq!(statistics.received_bytes, 13);
    ///
    /// statistics.add(&Stats::DiscardedPkts(1));
    /// assert_eq!(statistics.discarded_pkts, 1);
    /// ```
    pub fn add(&mut self, payload: &Stats) {
        match payload {
            Stats::ReceivedBytes(v) => self.received_bytes += v,
            Stats::ReceivedPkts(v) => self.received_pkts += v,
            Stats::RtpPkts(v) => self.rtp_pkts += v,
            Stats::RtcpPkts(v) => self.rtcp_pkts += v,
            Stats::DiscardedPkts(v) => self.discarded_pkts += v,
        }
    }

    /// Count one classified datagram.
    pub fn record(&mut self, report: &Report) {
        self.add(&Stats::ReceivedPkts(1));
        self.add(&Stats::ReceivedBytes(report.size()));
        self.add(&match report {
            Report::Rtp { .. } => Stats::RtpPkts(1),
            Report::Rtcp { .. } => Stats::RtcpPkts(1),
            Report::Discarded(_) => Stats::DiscardedPkts(1),
        });
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received={} bytes={} rtp={} rtcp={} discarded={}",
            self.received_pkts, self.received_bytes, self.rtp_pkts, self.rtcp_pkts, self.discarded_pkts
        )
    }
}
