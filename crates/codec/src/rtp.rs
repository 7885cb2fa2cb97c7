use bytes::{BufMut, BytesMut};

use crate::{Classification, Error, RTP_HEADER_SIZE, RTP_VERSION, VERSION_MASK, classify};

const PADDING_MASK: u8 = 0b00100000;
const EXTENSION_MASK: u8 = 0b00010000;
const CSRC_COUNT_MASK: u8 = 0b00001111;
const MARKER_MASK: u8 = 0b10000000;
const PAYLOAD_TYPE_MASK: u8 = 0b01111111;

/// The first 12 octets of a datagram that passed classification.
///
/// Only [`classify`] creates this, so holding one means the datagram was
/// long enough, carried version 2 and was not in the rtcp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader<'a> {
    bytes: &'a [u8; RTP_HEADER_SIZE],
    size: usize,
}

impl<'a> FixedHeader<'a> {
    pub(crate) fn new(bytes: &'a [u8; RTP_HEADER_SIZE], size: usize) -> Self {
        Self { bytes, size }
    }

    /// Size of the whole datagram the header was taken from.
    pub fn datagram_size(&self) -> usize {
        self.size
    }

    pub fn as_bytes(&self) -> &'a [u8; RTP_HEADER_SIZE] {
        self.bytes
    }

    /// Decode the fixed header fields.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_scanner_codec::{classify, Classification};
    ///
    /// let buffer = [
    ///     0x90, 0x72, 0x04, 0xf1, 0xf8, 0x87, 0x3f, 0xad, 0x67, 0xfe,
    ///     0x9d, 0xfc, 0xbe, 0xde,
    /// ];
    ///
    /// let Classification::RtpCandidate(fixed) = classify(&buffer) else {
    ///     panic!("not rtp");
    /// };
    ///
    /// let header = fixed.decode();
    /// assert_eq!(header.extension, true);
    /// assert_eq!(header.payload_type, 114);
    /// assert_eq!(header.sequence_number, 1265);
    /// assert_eq!(header.timestamp, 4169613229);
    /// assert_eq!(header.ssrc, 1744739836);
    /// ```
    pub fn decode(&self) -> RtpHeader {
        let bytes = self.bytes;

        RtpHeader {
            version: (bytes[0] & VERSION_MASK) >> 6,
            padding: (bytes[0] & PADDING_MASK) != 0,
            extension: (bytes[0] & EXTENSION_MASK) != 0,
            csrc_count: bytes[0] & CSRC_COUNT_MASK,
            marker: (bytes[1] & MARKER_MASK) != 0,
            payload_type: bytes[1] & PAYLOAD_TYPE_MASK,
            sequence_number: u16::from_be_bytes([bytes[2], bytes[3]]),
            timestamp: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            ssrc: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }
}

/// RTP fixed header.
///
/// ```bash
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|     PT      |       sequence number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           synchronization source (SSRC) identifier            |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// ```
///
/// Multi-octet fields hold host values; the wire order is always
/// big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RtpHeader {
    /// Always 2 for a decoded header.
    pub version: u8,
    /// The packet ends with padding octets, the last one counting them.
    pub padding: bool,
    /// A header extension follows the fixed header (and CSRC list).
    pub extension: bool,
    /// Number of CSRC identifiers that follow the fixed header, 0-15.
    pub csrc_count: u8,
    /// Profile defined, usually a frame boundary.
    pub marker: bool,
    /// Payload format, 0-127. Static mappings are listed in RFC 3551.
    pub payload_type: u8,
    pub sequence_number: u16,
    /// Sampling instant of the first payload octet.
    pub timestamp: u32,
    /// Synchronization source identifier.
    pub ssrc: u32,
}

impl RtpHeader {
    /// Decode the fixed header of a raw datagram.
    ///
    /// Runs the same checks as [`classify`], so short datagrams, other
    /// versions and rtcp packets are rejected.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_scanner_codec::{rtp::RtpHeader, Error};
    ///
    /// let buffer = [
    ///     0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00,
    ///     0x01, 0xff,
    /// ];
    ///
    /// let header = RtpHeader::decode(&buffer).unwrap();
    /// assert_eq!(header.sequence_number, 1);
    /// assert_eq!(header.timestamp, 100);
    /// assert_eq!(header.ssrc, 1);
    ///
    /// assert_eq!(RtpHeader::decode(&buffer[..12]), Err(Error::InvalidInput));
    /// ```
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        match classify(bytes) {
            Classification::RtpCandidate(fixed) => Ok(fixed.decode()),
            Classification::RtcpPacket { packet_type } => Err(Error::NotRtp(packet_type)),
            Classification::Invalid(discard) => Err(discard.into()),
        }
    }

    /// Write the 12 fixed header octets.
    ///
    /// Field values wider than their bit width are truncated; the version
    /// is always written as 2.
    ///
    /// # Test
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use rtp_scanner_codec::rtp::RtpHeader;
    ///
    /// let buffer = [
    ///     0x90, 0x72, 0x04, 0xf1, 0xf8, 0x87, 0x3f, 0xad, 0x67, 0xfe,
    ///     0x9d, 0xfc,
    /// ];
    ///
    /// let mut writer = BytesMut::new();
    /// RtpHeader {
    ///     version: 2,
    ///     padding: false,
    ///     extension: true,
    ///     csrc_count: 0,
    ///     marker: false,
    ///     payload_type: 114,
    ///     sequence_number: 1265,
    ///     timestamp: 4169613229,
    ///     ssrc: 1744739836,
    /// }
    /// .encode(&mut writer);
    ///
    /// assert_eq!(&writer[..], &buffer[..]);
    /// ```
    pub fn encode(&self, bytes: &mut BytesMut) {
        let mut first = RTP_VERSION << 6;
        if self.padding {
            first |= PADDING_MASK;
        }

        if self.extension {
            first |= EXTENSION_MASK;
        }

        first |= self.csrc_count & CSRC_COUNT_MASK;

        let mut second = self.payload_type & PAYLOAD_TYPE_MASK;
        if self.marker {
            second |= MARKER_MASK;
        }

        bytes.reserve(RTP_HEADER_SIZE);
        bytes.put_u8(first);
        bytes.put_u8(second);
        bytes.put_u16(self.sequence_number);
        bytes.put_u32(self.timestamp);
        bytes.put_u32(self.ssrc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_fields_straddle_no_byte_boundary() {
        // V=2 P=1 X=0 CC=0b1010, M=1 PT=0b0000001
        let buffer = [0xaa, 0x81, 0xff, 0xfe, 0x01, 0x02, 0x03, 0x04, 0xde, 0xad, 0xbe, 0xef, 0x00];
        let header = RtpHeader::decode(&buffer).unwrap();

        assert_eq!(header.version, 2);
        assert!(header.padding);
        assert!(!header.extension);
        assert_eq!(header.csrc_count, 10);
        assert!(header.marker);
        assert_eq!(header.payload_type, 1);
        assert_eq!(header.sequence_number, 0xfffe);
        assert_eq!(header.timestamp, 0x01020304);
        assert_eq!(header.ssrc, 0xdeadbeef);
    }

    #[test]
    fn timestamp_and_ssrc_are_not_byte_swapped() {
        let buffer = [0x80, 0x60, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78, 0x00];
        let header = RtpHeader::decode(&buffer).unwrap();

        assert_eq!(header.timestamp, 256);
        assert_eq!(header.ssrc, 0x12345678);
    }

    #[test]
    fn rtcp_is_rejected_by_decode() {
        let mut buffer = [0u8; 28];
        buffer[0] = 0x81;
        buffer[1] = 201;

        assert_eq!(RtpHeader::decode(&buffer), Err(Error::NotRtp(201)));
    }

    #[test]
    fn encode_masks_oversized_fields() {
        let mut bytes = BytesMut::new();
        RtpHeader {
            version: 0,
            padding: false,
            extension: false,
            csrc_count: 0xff,
            marker: false,
            payload_type: 0xff,
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0,
        }
        .encode(&mut bytes);

        assert_eq!(bytes[0], 0x8f);
        assert_eq!(bytes[1], 0x7f);
    }
}
