//! Route records, gateways, and the fixed-width wire codec.
//!
//! The native routing service hands the table over as a flat byte buffer:
//! a 4-byte little-endian record count followed by that many packed
//! [`RouteRecord::WIRE_LEN`]-byte records. Address fields are raw
//! network-order octets; numeric fields are little-endian.

use byteorder::{ByteOrder, LittleEndian};
use ipfwd_types::{Ipv4Address, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of the IPv4 forwarding table.
///
/// A record is a read-only snapshot of what the routing service reported at
/// fetch time; the service may change the table at any moment afterwards.
/// Everything beyond `destination` and `gateway` is opaque to this crate,
/// but is preserved verbatim when an entry is recreated with a new gateway
/// (see [`RouteRecord::with_gateway`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Network this entry routes to; 0.0.0.0 denotes the default route.
    pub destination: Ipv4Address,
    /// Mask applied to `destination`.
    pub mask: Ipv4Address,
    pub policy: u32,
    /// Next-hop address for this entry.
    pub gateway: Ipv4Address,
    /// Index of the outgoing interface.
    pub if_index: u32,
    pub route_type: u32,
    pub protocol: u32,
    pub age: u32,
    pub next_hop_as: u32,
    /// Primary routing metric.
    pub metric: u32,
    pub alt_metrics: [u32; 4],
}

impl RouteRecord {
    /// Encoded size of one record in bytes.
    pub const WIRE_LEN: usize = 56;

    /// Returns true if this entry is a default route.
    pub fn is_default(&self) -> bool {
        self.destination.is_unspecified()
    }

    /// Returns a copy of this record with only the next-hop replaced.
    ///
    /// Interface index, metrics, and every other attribute carry over
    /// unchanged, so the copy stays bound to the original entry's interface.
    pub fn with_gateway(&self, gateway: Gateway) -> Self {
        RouteRecord {
            gateway: gateway.address(),
            ..*self
        }
    }

    /// Decodes one record from the first [`Self::WIRE_LEN`] bytes of `bytes`.
    ///
    /// Panics if `bytes` is shorter than [`Self::WIRE_LEN`]; callers
    /// validate the table length against the header before decoding.
    pub fn decode(bytes: &[u8]) -> Self {
        let addr = |offset: usize| {
            Ipv4Address::from_octets([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        RouteRecord {
            destination: addr(0),
            mask: addr(4),
            policy: LittleEndian::read_u32(&bytes[8..12]),
            gateway: addr(12),
            if_index: LittleEndian::read_u32(&bytes[16..20]),
            route_type: LittleEndian::read_u32(&bytes[20..24]),
            protocol: LittleEndian::read_u32(&bytes[24..28]),
            age: LittleEndian::read_u32(&bytes[28..32]),
            next_hop_as: LittleEndian::read_u32(&bytes[32..36]),
            metric: LittleEndian::read_u32(&bytes[36..40]),
            alt_metrics: [
                LittleEndian::read_u32(&bytes[40..44]),
                LittleEndian::read_u32(&bytes[44..48]),
                LittleEndian::read_u32(&bytes[48..52]),
                LittleEndian::read_u32(&bytes[52..56]),
            ],
        }
    }

    /// Encodes this record into its fixed-width wire form.
    pub fn encode(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[0..4].copy_from_slice(&self.destination.octets());
        buf[4..8].copy_from_slice(&self.mask.octets());
        LittleEndian::write_u32(&mut buf[8..12], self.policy);
        buf[12..16].copy_from_slice(&self.gateway.octets());
        LittleEndian::write_u32(&mut buf[16..20], self.if_index);
        LittleEndian::write_u32(&mut buf[20..24], self.route_type);
        LittleEndian::write_u32(&mut buf[24..28], self.protocol);
        LittleEndian::write_u32(&mut buf[28..32], self.age);
        LittleEndian::write_u32(&mut buf[32..36], self.next_hop_as);
        LittleEndian::write_u32(&mut buf[36..40], self.metric);
        for (i, metric) in self.alt_metrics.iter().enumerate() {
            LittleEndian::write_u32(&mut buf[40 + i * 4..44 + i * 4], *metric);
        }
        buf
    }
}

/// Next-hop address of a default route.
///
/// A pure projection of a route record's `gateway` field, with no identity
/// or lifecycle of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gateway(Ipv4Address);

impl Gateway {
    pub const fn new(address: Ipv4Address) -> Self {
        Gateway(address)
    }

    pub const fn address(&self) -> Ipv4Address {
        self.0
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Gateway {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv4Address>().map(Gateway)
    }
}

impl From<Ipv4Address> for Gateway {
    fn from(address: Ipv4Address) -> Self {
        Gateway(address)
    }
}

impl From<std::net::Ipv4Addr> for Gateway {
    fn from(address: std::net::Ipv4Addr) -> Self {
        Gateway(address.into())
    }
}

impl From<&RouteRecord> for Gateway {
    fn from(record: &RouteRecord) -> Self {
        Gateway(record.gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record() -> RouteRecord {
        RouteRecord {
            destination: Ipv4Address::new(10, 0, 0, 0),
            mask: Ipv4Address::new(255, 0, 0, 0),
            policy: 0,
            gateway: Ipv4Address::new(192, 168, 1, 1),
            if_index: 7,
            route_type: 4,
            protocol: 3,
            age: 120,
            next_hop_as: 0,
            metric: 25,
            alt_metrics: [u32::MAX; 4],
        }
    }

    #[test]
    fn test_wire_round_trip() {
        let record = sample_record();
        let decoded = RouteRecord::decode(&record.encode());
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_known_wire_image() {
        let record = sample_record();
        let wire = record.encode();
        assert_eq!(&wire[0..4], &[10, 0, 0, 0]);
        assert_eq!(&wire[4..8], &[255, 0, 0, 0]);
        assert_eq!(&wire[12..16], &[192, 168, 1, 1]);
        // if_index = 7, little-endian
        assert_eq!(&wire[16..20], &[7, 0, 0, 0]);
        // metric = 25, little-endian
        assert_eq!(&wire[36..40], &[25, 0, 0, 0]);
    }

    #[test]
    fn test_is_default() {
        let mut record = sample_record();
        assert!(!record.is_default());
        record.destination = Ipv4Address::UNSPECIFIED;
        assert!(record.is_default());
    }

    #[test]
    fn test_with_gateway_preserves_attributes() {
        let record = sample_record();
        let gateway: Gateway = "203.0.113.1".parse().unwrap();
        let replaced = record.with_gateway(gateway);

        assert_eq!(replaced.gateway, gateway.address());
        assert_eq!(replaced.destination, record.destination);
        assert_eq!(replaced.mask, record.mask);
        assert_eq!(replaced.if_index, record.if_index);
        assert_eq!(replaced.metric, record.metric);
        assert_eq!(replaced.alt_metrics, record.alt_metrics);
    }

    #[test]
    fn test_gateway_projection() {
        let record = sample_record();
        let gateway = Gateway::from(&record);
        assert_eq!(gateway.address(), record.gateway);
        assert_eq!(gateway.to_string(), "192.168.1.1");
    }

    #[test]
    fn test_gateway_serde() {
        let gateway: Gateway = "203.0.113.1".parse().unwrap();
        let json = serde_json::to_string(&gateway).unwrap();
        assert_eq!(json, "\"203.0.113.1\"");
    }
}
