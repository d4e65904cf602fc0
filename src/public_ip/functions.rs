// Standard library
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// Current module imports
use super::constants::LOCALHOST;

/// Routable on the public internet, as far as geolocation cares.
pub fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(&v4),
            None => is_public_v6(v6),
        },
    }
}

fn is_public_v4(ip: &Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}

fn is_public_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    !(ip.is_loopback() || ip.is_unspecified() || unique_local || link_local)
}

/// Parses a caller address, returning it only when it can be geolocated
/// directly. `None` means the public address has to be discovered.
pub fn usable_public_ip(ip: Option<&str>) -> Option<IpAddr> {
    let ip = ip.map(str::trim).filter(|ip| !ip.is_empty())?;
    if ip.eq_ignore_ascii_case(LOCALHOST) {
        return None;
    }
    ip.parse::<IpAddr>().ok().filter(is_public)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_and_special_addresses_need_discovery() {
        for ip in [
            None,
            Some(""),
            Some("  "),
            Some("localhost"),
            Some("not-an-ip"),
            Some("127.0.0.1"),
            Some("10.1.2.3"),
            Some("172.16.0.5"),
            Some("192.168.1.10"),
            Some("169.254.1.1"),
            Some("0.0.0.0"),
            Some("::1"),
            Some("::"),
            Some("fd12:3456::1"),
            Some("fe80::1"),
            Some("::ffff:192.168.0.1"),
        ] {
            assert_eq!(usable_public_ip(ip), None, "{ip:?} should need discovery");
        }
    }

    #[test]
    fn public_addresses_are_used_directly() {
        assert_eq!(
            usable_public_ip(Some(" 8.8.8.8 ")),
            Some("8.8.8.8".parse().unwrap())
        );
        assert!(usable_public_ip(Some("2001:4860:4860::8888")).is_some());
        assert!(usable_public_ip(Some("172.32.0.1")).is_some());
    }
}
