//! ## RTP / RTCP datagram classification
//!
//! [RFC3550]: https://tools.ietf.org/html/rfc3550
//! [RFC5761]: https://tools.ietf.org/html/rfc5761
//!
//! RTP data packets and RTCP control packets may share one transport
//! address. Both start with the same two-bit version field, and the
//! second octet either carries the RTP marker bit and payload type or
//! the RTCP packet type. RTCP packet types are allocated from the range
//! 192-223 ([RFC5761] section 4), which keeps them clear of the payload
//! types an RTP sender would use with the marker bit set or clear.
//!
//! This crate only looks at the first 12 octets of a datagram: it decides
//! whether the datagram is usable at all, whether it is RTCP, and if it is
//! RTP it decodes the fixed header described in [RFC3550] section 5.1.

pub mod rtcp;
pub mod rtp;

use self::rtp::FixedHeader;

/// Receive buffer size used by the listener.
///
/// 1500 (MTU) minus 20/40 bytes of IP header and 8 bytes of UDP header,
/// rounded down to the payload size WebRTC stacks actually send.
pub const MAX_DATAGRAM_SIZE: usize = 1200;

/// Size of the RTP fixed header, without CSRC identifiers.
pub const RTP_HEADER_SIZE: usize = 12;

/// Smallest datagram that is worth classifying: a fixed header followed by
/// at least one octet of payload.
pub const MIN_DATAGRAM_SIZE: usize = RTP_HEADER_SIZE + 1;

/// The version defined by RFC 3550.
pub const RTP_VERSION: u8 = 2;

/// First RTCP packet type (SR).
pub const RTCP_PACKET_TYPE_START: u8 = 192;

/// Last RTCP packet type reserved by RFC 5761.
pub const RTCP_PACKET_TYPE_END: u8 = 223;

pub(crate) const VERSION_MASK: u8 = 0b11000000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidInput,
    UnsupportedVersion(u8),
    NotRtp(u8),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "datagram is shorter than {MIN_DATAGRAM_SIZE} bytes"),
            Self::UnsupportedVersion(version) => write!(f, "unsupported rtp version {version}"),
            Self::NotRtp(kind) => write!(f, "datagram is rtcp, packet type {kind}"),
        }
    }
}

/// Why a datagram was thrown away before decoding.
///
/// Both variants keep the original datagram size so it can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    TooSmall { size: usize },
    UnsupportedVersion { size: usize, version: u8 },
}

impl Discard {
    pub fn size(&self) -> usize {
        match *self {
            Self::TooSmall { size } => size,
            Self::UnsupportedVersion { size, .. } => size,
        }
    }
}

impl From<Discard> for Error {
    fn from(value: Discard) -> Self {
        match value {
            Discard::TooSmall { .. } => Self::InvalidInput,
            Discard::UnsupportedVersion { version, .. } => Self::UnsupportedVersion(version),
        }
    }
}

/// Result of looking at one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Invalid(Discard),
    RtcpPacket { packet_type: u8 },
    RtpCandidate(FixedHeader<'a>),
}

/// Returns `true` if the octet falls in the RTCP packet type space.
///
/// # Test
///
/// ```
/// use rtp_scanner_codec::is_rtcp_packet_type;
///
/// assert!(is_rtcp_packet_type(200));
/// assert!(is_rtcp_packet_type(223));
/// assert!(!is_rtcp_packet_type(191));
/// assert!(!is_rtcp_packet_type(224));
/// ```
pub fn is_rtcp_packet_type(value: u8) -> bool {
    (RTCP_PACKET_TYPE_START..=RTCP_PACKET_TYPE_END).contains(&value)
}

/// Classify a received datagram.
///
/// Any input is accepted, including an empty slice. The datagram is only
/// borrowed; an rtp candidate keeps a reference to its first 12 octets.
///
/// # Test
///
/// ```
/// use rtp_scanner_codec::{classify, Classification, Discard};
///
/// let rtcp = [
///     0x80, 0xc8, 0x00, 0x06, 0x79, 0x26, 0x69, 0x55, 0xe8, 0xe2, 0xe2,
///     0x17, 0xd4,
/// ];
///
/// assert_eq!(classify(&rtcp), Classification::RtcpPacket { packet_type: 200 });
/// assert_eq!(
///     classify(&rtcp[..10]),
///     Classification::Invalid(Discard::TooSmall { size: 10 })
/// );
/// ```
pub fn classify(bytes: &[u8]) -> Classification<'_> {
    let size = bytes.len();
    if size < MIN_DATAGRAM_SIZE {
        return Classification::Invalid(Discard::TooSmall { size });
    }

    let version = (bytes[0] & VERSION_MASK) >> 6;
    if version != RTP_VERSION {
        return Classification::Invalid(Discard::UnsupportedVersion { size, version });
    }

    // byte 1 is either M|PT or the rtcp packet type, the range decides.
    let packet_type = bytes[1];
    if is_rtcp_packet_type(packet_type) {
        return Classification::RtcpPacket { packet_type };
    }

    match bytes.first_chunk::<RTP_HEADER_SIZE>() {
        Some(header) => Classification::RtpCandidate(FixedHeader::new(header, size)),
        None => Classification::Invalid(Discard::TooSmall { size }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_datagram_is_discarded() {
        assert_eq!(
            classify(&[]),
            Classification::Invalid(Discard::TooSmall { size: 0 })
        );
    }

    #[test]
    fn twelve_bytes_is_still_too_small() {
        let bytes = [0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x01];

        assert_eq!(
            classify(&bytes),
            Classification::Invalid(Discard::TooSmall { size: 12 })
        );
    }

    #[test]
    fn rtcp_range_bounds_are_inclusive() {
        let mut bytes = [0u8; MIN_DATAGRAM_SIZE];
        bytes[0] = 0x80;

        for (kind, is_rtcp) in [(191, false), (192, true), (223, true), (224, false)] {
            bytes[1] = kind;
            assert_eq!(
                matches!(classify(&bytes), Classification::RtcpPacket { .. }),
                is_rtcp,
                "packet type {kind}"
            );
        }
    }

    #[test]
    fn version_is_checked_before_packet_type() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xc0;
        bytes[1] = 200;

        assert_eq!(
            classify(&bytes),
            Classification::Invalid(Discard::UnsupportedVersion {
                size: 20,
                version: 3
            })
        );
    }

    #[test]
    fn discard_converts_into_error() {
        assert_eq!(
            Error::from(Discard::TooSmall { size: 3 }),
            Error::InvalidInput
        );
        assert_eq!(
            Error::from(Discard::UnsupportedVersion { size: 40, version: 1 }),
            Error::UnsupportedVersion(1)
        );
    }
}
