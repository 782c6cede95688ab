//! Request origin checks.

use std::net::Ipv4Addr;

use thiserror::Error;

/// The address is not a valid IPv4 address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Not a valid IPv4 address: {0}")]
pub struct InvalidIpAddressError(pub String);

/// Whether `ip_address` belongs to the internal network.
///
/// Addresses listed in `deployment_addresses` are always internal, whatever their format. Other
/// addresses must be IPv4 and are internal when they fall within `10.0.0.0/8`, `172.16.0.0/12`,
/// `192.168.0.0/16` or `127.0.0.0/24`.
pub fn from_internal_address<S: AsRef<str>>(
    ip_address: &str,
    deployment_addresses: &[S],
) -> Result<bool, InvalidIpAddressError> {
    if deployment_addresses
        .iter()
        .any(|address| address.as_ref() == ip_address)
    {
        return Ok(true);
    }

    let address: Ipv4Addr = ip_address
        .parse()
        .map_err(|_| InvalidIpAddressError(ip_address.to_owned()))?;

    let internal = match address.octets() {
        [10, ..] => true,
        [192, 168, ..] => true,
        [172, second, ..] => (16..=31).contains(&second),
        // Only the first /24 of the loopback range is accepted.
        [127, 0, 0, _] => true,
        _ => false,
    };

    Ok(internal)
}
