use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    str::FromStr,
};

use anyhow::{Result, anyhow, bail};
use clap::{Parser, error::ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => return Err(format!("unknown log level: {value}")),
        })
    }
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    ///
    /// Local address to bind
    ///
    /// An address containing ':' is taken as IPv6, one containing '.' as
    /// IPv4. When omitted the scanner listens on all IPv4 interfaces.
    ///
    #[arg(long, short)]
    address: Option<String>,
    ///
    /// UDP port to listen on (1-65535)
    ///
    #[arg(long, short, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
    ///
    /// Log level: error, warn, info, debug or trace
    ///
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The address the listener binds to.
    pub listen: SocketAddr,
    pub log_level: LogLevel,
}

/// Interpret the `-a` argument.
///
/// The address family is picked by looking for ':' first and '.' second,
/// then the text must parse as an address of that family.
pub fn parse_address(value: &str) -> Result<IpAddr> {
    if value.is_empty() {
        return Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    if value.contains(':') {
        value
            .parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|_| anyhow!("ipv6 address {value} is invalid"))
    } else if value.contains('.') {
        value
            .parse::<Ipv4Addr>()
            .map(IpAddr::V4)
            .map_err(|_| anyhow!("ipv4 address {value} is invalid"))
    } else {
        bail!("ip address {value} cannot be processed")
    }
}

impl Config {
    ///
    /// Load configure from command line parameters.
    ///
    /// Returns `Ok(None)` when the user only asked for help or the version;
    /// clap has already printed it.
    ///
    pub fn load() -> Result<Option<Self>> {
        Self::try_parse_from(std::env::args_os())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.print()?;
                return Ok(None);
            }
            Err(e) => bail!("invalid inputs: {}", e.render().to_string().trim_end()),
        };

        let ip = parse_address(cli.address.as_deref().unwrap_or_default())?;

        Ok(Some(Self {
            listen: SocketAddr::new(ip, cli.port),
            log_level: cli.log_level,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Config>> {
        Config::try_parse_from(std::iter::once("rtp-scanner").chain(args.iter().copied()))
    }

    #[test]
    fn port_only_binds_all_interfaces() -> Result<()> {
        let config = parse(&["-p", "5004"])?.ok_or_else(|| anyhow!("no config"))?;

        assert_eq!(config.listen, "0.0.0.0:5004".parse()?);
        assert_eq!(config.log_level, LogLevel::Info);
        Ok(())
    }

    #[test]
    fn address_family_follows_separator() -> Result<()> {
        let v4 = parse(&["-a", "127.0.0.1", "-p", "5004"])?.ok_or_else(|| anyhow!("no config"))?;
        let v6 = parse(&["-a", "::1", "-p", "5004"])?.ok_or_else(|| anyhow!("no config"))?;

        assert_eq!(v4.listen, "127.0.0.1:5004".parse()?);
        assert_eq!(v6.listen, "[::1]:5004".parse()?);
        Ok(())
    }

    #[test]
    fn empty_address_is_wildcard() -> Result<()> {
        assert_eq!(parse_address("")?, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        Ok(())
    }

    #[test]
    fn address_without_separator_is_rejected() {
        assert!(parse_address("localhost").is_err());
        assert!(parse(&["-a", "localhost", "-p", "5004"]).is_err());
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        assert!(parse_address("10.0.0").is_err());
        assert!(parse_address("fe80:::1:").is_err());
    }

    #[test]
    fn port_must_be_in_range() {
        assert!(parse(&["-p", "0"]).is_err());
        assert!(parse(&["-p", "65536"]).is_err());
        assert!(parse(&["-p", "http"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse(&["-p", "5004", "-x"]).is_err());
    }

    #[test]
    fn log_level_is_parsed() -> Result<()> {
        let config = parse(&["-p", "5004", "--log-level", "trace"])?.ok_or_else(|| anyhow!("no config"))?;

        assert_eq!(config.log_level.as_level(), log::Level::Trace);
        assert!(parse(&["-p", "5004", "--log-level", "loud"]).is_err());
        Ok(())
    }

    #[test]
    fn help_is_not_an_error() -> Result<()> {
        assert_eq!(parse(&["-h"])?, None);
        Ok(())
    }
}
