//! Safe access to the host's IPv4 forwarding table.
//!
//! This crate reads and mutates the operating system's IPv4 routing table
//! through a narrow, typed surface: enumerate the default-route gateways,
//! or replace the active default gateway with a new address while keeping
//! the original entry's interface and metric attributes. It exists so that
//! higher-level tooling (VPN and failover managers) can redirect default
//! egress traffic without shelling out to external utilities.
//!
//! # Architecture
//!
//! - [`error`]: native status codes and the error taxonomy
//! - [`record`]: route records, gateways, and the fixed-width wire codec
//! - [`service`]: the [`ForwardTableService`] seam to the native routing
//!   facility
//! - [`table`]: [`RouteTable`], the fetch/list/replace operations
//!
//! # Example
//!
//! ```ignore
//! use ipfwd::{Gateway, RouteTable};
//!
//! let table = RouteTable::new(platform_service);
//! for gateway in table.default_gateways()? {
//!     println!("default route via {gateway}");
//! }
//! table.set_default_gateway("203.0.113.1".parse()?)?;
//! ```
//!
//! The routing table is host-global mutable state owned by the operating
//! system; see [`RouteTable::set_default_gateway`] for the concurrency and
//! partial-failure caveats that follow from that.

pub mod error;
pub mod record;
pub mod service;
pub mod table;

pub use error::{NativeStatus, RouteError, RouteResult};
pub use record::{Gateway, RouteRecord};
pub use service::ForwardTableService;
pub use table::RouteTable;

// Re-exported so callers can name record fields without a separate import.
pub use ipfwd_types::{Ipv4Address, ParseError};
