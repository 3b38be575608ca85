//! Error types and native status handling.
//!
//! This module converts raw status codes returned by the native routing
//! service into Rust's Result type. The same native status can mean
//! different things depending on the operation that produced it, so the
//! mapping is split by context: [`RouteError::from_query_status`] for table
//! queries and [`RouteError::from_modify_status`] for entry creation and
//! deletion.

use std::fmt;
use thiserror::Error;

/// Status codes returned by the native routing service.
///
/// The service reports an open set of codes; the variants below are the
/// ones this crate gives meaning to, with [`NativeStatus::Other`] carrying
/// everything else verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeStatus {
    Success,
    AccessDenied,
    NotSupported,
    InsufficientBuffer,
    NoData,
    Other(u32),
}

impl NativeStatus {
    /// Creates a NativeStatus from a raw status code.
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => NativeStatus::Success,
            5 => NativeStatus::AccessDenied,
            50 => NativeStatus::NotSupported,
            122 => NativeStatus::InsufficientBuffer,
            232 => NativeStatus::NoData,
            other => NativeStatus::Other(other),
        }
    }

    /// Returns the raw status code.
    pub fn as_raw(self) -> u32 {
        match self {
            NativeStatus::Success => 0,
            NativeStatus::AccessDenied => 5,
            NativeStatus::NotSupported => 50,
            NativeStatus::InsufficientBuffer => 122,
            NativeStatus::NoData => 232,
            NativeStatus::Other(code) => code,
        }
    }

    /// Returns true if the status indicates success.
    pub fn is_success(self) -> bool {
        self == NativeStatus::Success
    }
}

impl fmt::Display for NativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeStatus::Success => write!(f, "NO_ERROR"),
            NativeStatus::AccessDenied => write!(f, "ERROR_ACCESS_DENIED"),
            NativeStatus::NotSupported => write!(f, "ERROR_NOT_SUPPORTED"),
            NativeStatus::InsufficientBuffer => write!(f, "ERROR_INSUFFICIENT_BUFFER"),
            NativeStatus::NoData => write!(f, "ERROR_NO_DATA"),
            NativeStatus::Other(code) => write!(f, "status {}", code),
        }
    }
}

/// Error type for forwarding-table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The buffer for the encoded table could not be allocated.
    #[error("could not allocate {size} bytes for the forwarding table")]
    AllocationFailure { size: usize },

    /// The routing service reports that no routes exist.
    #[error("the forwarding table contains no routes")]
    EmptyTable,

    /// No IP stack is present on the host.
    #[error("no IP stack is installed on this host")]
    StackNotInstalled,

    /// The IPv4 transport is unavailable for entry creation or deletion.
    #[error("the IPv4 transport is not configured")]
    TransportNotConfigured,

    /// The caller lacks privilege to modify the forwarding table.
    #[error("access denied while modifying the forwarding table")]
    AccessDenied,

    /// No default-route entry exists to base a replacement on.
    #[error("no default route exists on this host")]
    GatewayNotFound,

    /// The encoded table reply was shorter than its header declared.
    #[error("forwarding table reply truncated: expected {expected} bytes, got {actual}")]
    TruncatedReply { expected: usize, actual: usize },

    /// Any other non-success status, with the raw code kept for diagnostics.
    #[error("unexpected status {code} from the routing service")]
    UnexpectedNativeError { code: u32 },
}

impl RouteError {
    /// Maps a non-success status from a table query.
    pub fn from_query_status(status: NativeStatus) -> Self {
        match status {
            NativeStatus::NoData => RouteError::EmptyTable,
            NativeStatus::NotSupported => RouteError::StackNotInstalled,
            other => RouteError::UnexpectedNativeError {
                code: other.as_raw(),
            },
        }
    }

    /// Maps a non-success status from an entry creation or deletion.
    pub fn from_modify_status(status: NativeStatus) -> Self {
        match status {
            NativeStatus::AccessDenied => RouteError::AccessDenied,
            NativeStatus::NotSupported => RouteError::TransportNotConfigured,
            other => RouteError::UnexpectedNativeError {
                code: other.as_raw(),
            },
        }
    }
}

/// Result type for forwarding-table operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_from_raw() {
        assert_eq!(NativeStatus::from_raw(0), NativeStatus::Success);
        assert_eq!(NativeStatus::from_raw(5), NativeStatus::AccessDenied);
        assert_eq!(NativeStatus::from_raw(122), NativeStatus::InsufficientBuffer);
        assert_eq!(NativeStatus::from_raw(232), NativeStatus::NoData);
        assert_eq!(NativeStatus::from_raw(31), NativeStatus::Other(31));
    }

    #[test]
    fn test_status_round_trip_keeps_raw_code() {
        for code in [0_u32, 5, 50, 122, 232, 31, 87, 1168] {
            assert_eq!(NativeStatus::from_raw(code).as_raw(), code);
        }
    }

    #[test]
    fn test_status_success() {
        assert!(NativeStatus::Success.is_success());
        assert!(!NativeStatus::NoData.is_success());
        assert!(!NativeStatus::Other(1).is_success());
    }

    #[test]
    fn test_query_status_mapping() {
        assert_eq!(
            RouteError::from_query_status(NativeStatus::NoData),
            RouteError::EmptyTable
        );
        assert_eq!(
            RouteError::from_query_status(NativeStatus::NotSupported),
            RouteError::StackNotInstalled
        );
        // A query has no privileged path, so even AccessDenied falls through
        // to the generic mapping.
        assert_eq!(
            RouteError::from_query_status(NativeStatus::AccessDenied),
            RouteError::UnexpectedNativeError { code: 5 }
        );
        assert_eq!(
            RouteError::from_query_status(NativeStatus::Other(31)),
            RouteError::UnexpectedNativeError { code: 31 }
        );
    }

    #[test]
    fn test_modify_status_mapping() {
        assert_eq!(
            RouteError::from_modify_status(NativeStatus::AccessDenied),
            RouteError::AccessDenied
        );
        assert_eq!(
            RouteError::from_modify_status(NativeStatus::NotSupported),
            RouteError::TransportNotConfigured
        );
        assert_eq!(
            RouteError::from_modify_status(NativeStatus::Other(87)),
            RouteError::UnexpectedNativeError { code: 87 }
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(NativeStatus::Success.to_string(), "NO_ERROR");
        assert_eq!(
            NativeStatus::InsufficientBuffer.to_string(),
            "ERROR_INSUFFICIENT_BUFFER"
        );
        assert_eq!(NativeStatus::Other(31).to_string(), "status 31");
    }
}
