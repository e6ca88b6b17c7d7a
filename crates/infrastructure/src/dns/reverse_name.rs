use std::net::IpAddr;

/// Builds the `in-addr.arpa` / `ip6.arpa` name a PTR query is asked for.
pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}
