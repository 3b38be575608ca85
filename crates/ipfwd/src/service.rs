//! Seam to the operating system's routing facility.

use crate::error::NativeStatus;
use crate::record::RouteRecord;

/// Contract of the native routing service.
///
/// The operating system owns the IPv4 forwarding table; this trait is the
/// only way the rest of the crate reaches it. Platform backends implement
/// it over the host's routing subsystem, tests over an in-memory table.
/// Every method is a single synchronous round trip that reports a raw
/// native status rather than a Result, because the meaning of a status
/// depends on the operation that produced it (see
/// [`RouteError`](crate::RouteError)).
pub trait ForwardTableService {
    /// Fills `buffer` with at most `buffer.len()` bytes of encoded table
    /// data (4-byte little-endian record count, then packed fixed-width
    /// records). On [`NativeStatus::InsufficientBuffer`] the service writes
    /// the required byte count to `size` instead. `sorted` requests the
    /// service's native ordering for the reply.
    fn query_forward_table(&self, buffer: &mut [u8], size: &mut u32, sorted: bool) -> NativeStatus;

    /// Inserts one route record into the table.
    fn create_forward_entry(&self, record: &RouteRecord) -> NativeStatus;

    /// Removes the route record matching `record`'s key fields.
    fn delete_forward_entry(&self, record: &RouteRecord) -> NativeStatus;
}

impl<S: ForwardTableService + ?Sized> ForwardTableService for &S {
    fn query_forward_table(&self, buffer: &mut [u8], size: &mut u32, sorted: bool) -> NativeStatus {
        (**self).query_forward_table(buffer, size, sorted)
    }

    fn create_forward_entry(&self, record: &RouteRecord) -> NativeStatus {
        (**self).create_forward_entry(record)
    }

    fn delete_forward_entry(&self, record: &RouteRecord) -> NativeStatus {
        (**self).delete_forward_entry(record)
    }
}
