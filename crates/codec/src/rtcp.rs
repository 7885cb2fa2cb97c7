use num_enum::TryFromPrimitive;

/// RTCP packet types with a registered meaning.
///
/// The classifier accepts the whole 192-223 range; only these values have
/// a name. Everything else in the range is reported by number.
///
/// [IANA](https://www.iana.org/assignments/rtp-parameters/rtp-parameters.xhtml#rtp-parameters-4)
#[repr(u8)]
#[derive(TryFromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcpKind {
    /// Full INTRA-frame request, RFC 2032.
    Fir = 192,
    /// Negative acknowledgement, RFC 2032.
    Nack = 193,
    /// SMPTE time-code mapping, RFC 5484.
    Smptetc = 194,
    /// Extended inter-arrival jitter report, RFC 5450.
    Ij = 195,
    SenderReport = 200,
    ReceiverReport = 201,
    SourceDescription = 202,
    Goodbye = 203,
    ApplicationDefined = 204,
    /// Generic RTP feedback, RFC 4585.
    TransportFeedback = 205,
    /// Payload-specific feedback, RFC 4585.
    PayloadFeedback = 206,
    /// Extended report, RFC 3611.
    ExtendedReport = 207,
    Avb = 208,
    ReceiverSummary = 209,
    PortMapping = 210,
    Idms = 211,
    ReportingGroupSources = 212,
    SplicingNotification = 213,
}

impl RtcpKind {
    /// Short name as used in packet captures.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_scanner_codec::rtcp::RtcpKind;
    ///
    /// assert_eq!(RtcpKind::try_from(200).unwrap().name(), "SR");
    /// assert!(RtcpKind::try_from(220).is_err());
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fir => "FIR",
            Self::Nack => "NACK",
            Self::Smptetc => "SMPTETC",
            Self::Ij => "IJ",
            Self::SenderReport => "SR",
            Self::ReceiverReport => "RR",
            Self::SourceDescription => "SDES",
            Self::Goodbye => "BYE",
            Self::ApplicationDefined => "APP",
            Self::TransportFeedback => "RTPFB",
            Self::PayloadFeedback => "PSFB",
            Self::ExtendedReport => "XR",
            Self::Avb => "AVB",
            Self::ReceiverSummary => "RSI",
            Self::PortMapping => "TOKEN",
            Self::Idms => "IDMS",
            Self::ReportingGroupSources => "RGRS",
            Self::SplicingNotification => "SNM",
        }
    }
}
