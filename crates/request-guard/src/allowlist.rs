//! CIDR-aware IP allow-list matcher
//!
//! An allow-list entry is either a literal IPv4/IPv6 address or a CIDR
//! range in `address/prefixLength` form. Matching fails closed: an empty
//! candidate or empty list is never allowed. Range membership is inclusive
//! of the network and broadcast addresses.

use std::net::IpAddr;
use std::str::FromStr;

use crate::{GuardError, Result};

/// A CIDR range: network address plus prefix length.
///
/// # Examples
/// ```
/// use request_guard::Subnet;
///
/// let subnet: Subnet = "104.192.143.208/28".parse().unwrap();
/// assert!(subnet.contains("104.192.143.208".parse().unwrap()));
/// assert!(subnet.contains("104.192.143.223".parse().unwrap()));
/// assert!(!subnet.contains("104.192.143.224".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: IpAddr,
    prefix: u8,
}

impl FromStr for Subnet {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| GuardError::invalid_entry(s, "missing '/' prefix length"))?;

        let network: IpAddr = addr
            .parse()
            .map_err(|_| GuardError::invalid_entry(s, "invalid network address"))?;

        let prefix: u8 = prefix
            .parse()
            .map_err(|_| GuardError::invalid_entry(s, "invalid prefix length"))?;

        let max_prefix = match network {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix > max_prefix {
            return Err(GuardError::invalid_entry(s, "prefix length out of range"));
        }

        Ok(Self { network, prefix })
    }
}

impl Subnet {
    /// Network address of the range
    pub fn network(&self) -> IpAddr {
        self.network
    }

    /// Prefix length of the range
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// True when the address falls inside the range.
    ///
    /// The all-zeros and all-ones host addresses count as members; an
    /// address of a different IP family never matches.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self.network, addr) {
            (IpAddr::V4(network), IpAddr::V4(addr)) => {
                let mask = mask_v4(self.prefix);
                u32::from(network) & mask == u32::from(addr) & mask
            }
            (IpAddr::V6(network), IpAddr::V6(addr)) => {
                let mask = mask_v6(self.prefix);
                u128::from(network) & mask == u128::from(addr) & mask
            }
            _ => false,
        }
    }
}

fn mask_v4(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix)
    }
}

fn mask_v6(prefix: u8) -> u128 {
    if prefix == 0 {
        0
    } else {
        u128::MAX << (128 - prefix)
    }
}

/// Test a candidate IP against an allow-list of literals and CIDR ranges.
///
/// Fails closed: an empty `ip` or empty `allowlist` is `Ok(false)`; there
/// is no implicit allow-all. An exact string match short-circuits without
/// parsing anything; entries containing `/` are parsed as [`Subnet`] and a
/// malformed entry (or an unparseable candidate when a range must be
/// tested) propagates as a configuration error rather than a silent
/// `false`.
///
/// # Examples
/// ```
/// use request_guard::is_ip_allowed;
///
/// assert!(is_ip_allowed("1.1.1.1", &["1.1.1.1"]).unwrap());
/// assert!(!is_ip_allowed("1.1.1.2", &["1.1.1.1"]).unwrap());
/// assert!(is_ip_allowed("104.192.143.220", &["104.192.143.208/28"]).unwrap());
/// ```
pub fn is_ip_allowed<S: AsRef<str>>(ip: &str, allowlist: &[S]) -> Result<bool> {
    if ip.is_empty() || allowlist.is_empty() {
        return Ok(false);
    }

    // Parsed lazily; literal-only lists never need it.
    let mut candidate: Option<IpAddr> = None;

    for entry in allowlist {
        let entry = entry.as_ref();

        if entry == ip {
            return Ok(true);
        }

        if entry.contains('/') {
            let subnet: Subnet = entry.parse()?;
            let addr = match candidate {
                Some(addr) => addr,
                None => {
                    let addr = ip
                        .parse()
                        .map_err(|_| GuardError::InvalidIp(ip.to_string()))?;
                    candidate = Some(addr);
                    addr
                }
            };

            if subnet.contains(addr) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
