//! Common network value types for IPv4 forwarding-table access.
//!
//! This crate provides the type-safe network primitives shared by the
//! forwarding-table crates:
//!
//! - [`Ipv4Address`]: IPv4 addresses with safe parsing and octet access

mod ip;

pub use ip::Ipv4Address;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IPv4 address format: {0}")]
    InvalidIpAddress(String),
}
