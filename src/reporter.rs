use std::{
    fmt,
    io::{self, Write},
};

use codec::{Classification, Discard, rtcp::RtcpKind, rtp::RtpHeader};

/// What gets reported for one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Rtp { size: usize, header: RtpHeader },
    Rtcp { size: usize, packet_type: u8 },
    Discarded(Discard),
}

impl Report {
    /// Turn a classification into a report, decoding rtp candidates.
    ///
    /// `size` is the length of the datagram that was classified.
    ///
    /// # Example
    ///
    /// ```
    /// use rtp_scanner::reporter::Report;
    /// use codec::classify;
    ///
    /// let bytes = [
    ///     0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00,
    ///     0x01, 0xff,
    /// ];
    ///
    /// let Report::Rtp { size, header } = Report::new(bytes.len(), classify(&bytes)) else {
    ///     panic!("not rtp");
    /// };
    ///
    /// assert_eq!(size, 13);
    /// assert_eq!(header.timestamp, 100);
    /// ```
    pub fn new(size: usize, classification: Classification<'_>) -> Self {
        match classification {
            Classification::RtpCandidate(fixed) => Self::Rtp {
                size,
                header: fixed.decode(),
            },
            Classification::RtcpPacket { packet_type } => Self::Rtcp { size, packet_type },
            Classification::Invalid(discard) => Self::Discarded(discard),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Self::Rtp { size, .. } => *size,
            Self::Rtcp { size, .. } => *size,
            Self::Discarded(discard) => discard.size(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rtp { size, header } => write!(
                f,
                "RTP packet size {}, headers: version {}, padding {}, extension {}, csrcs {}, marker {}, payload type {}, seqnum {}, rtp ts {}, ssrc {}",
                size,
                header.version,
                header.padding as u8,
                header.extension as u8,
                header.csrc_count,
                header.marker as u8,
                header.payload_type,
                header.sequence_number,
                header.timestamp,
                header.ssrc,
            ),
            Self::Rtcp { packet_type, .. } => match RtcpKind::try_from(*packet_type) {
                Ok(kind) => write!(f, "RTCP: packet type {} ({})", packet_type, kind.name()),
                Err(_) => write!(f, "RTCP: packet type {}", packet_type),
            },
            Self::Discarded(Discard::TooSmall { size }) => {
                write!(f, "packet discarded, size {}", size)
            }
            Self::Discarded(Discard::UnsupportedVersion { size, version }) => {
                write!(f, "packet discarded, size {}, invalid rtp/rtcp version {}", size, version)
            }
        }
    }
}

/// Receives one report per datagram.
pub trait Reporter {
    fn report(&mut self, report: &Report) -> io::Result<()>;
}

/// Writes every report as one line.
pub struct LineReporter<W>(W);

impl<W: Write> LineReporter<W> {
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl LineReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self(io::stdout())
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    fn report(&mut self, report: &Report) -> io::Result<()> {
        writeln!(self.0, "{}", report)
    }
}
