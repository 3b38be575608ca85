//! Forwarding-table access: fetching, gateway enumeration, and gateway
//! replacement.

use crate::error::{NativeStatus, RouteError, RouteResult};
use crate::record::{Gateway, RouteRecord};
use crate::service::ForwardTableService;
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

/// Byte length of the record-count header prefixing an encoded table.
const HEADER_LEN: usize = 4;

/// Handle to the host's IPv4 forwarding table.
///
/// Every call is a synchronous, on-demand round trip to the routing
/// service; nothing is cached between calls because the operating system
/// may change the table at any time. The table is host-global mutable
/// state shared with every other process, so none of these operations can
/// be made atomic against concurrent writers.
pub struct RouteTable<S> {
    service: S,
}

impl<S: ForwardTableService> RouteTable<S> {
    pub fn new(service: S) -> Self {
        RouteTable { service }
    }

    /// Fetches a snapshot of the IPv4 forwarding table.
    ///
    /// The required buffer size is unknown up front, so the query runs in
    /// two phases: an empty-buffer probe that makes the service report the
    /// size it needs, then a single retry with a buffer of exactly that
    /// size. Any other outcome of the probe is final. The buffer is a local
    /// `Vec`, so it is released on every exit path.
    pub fn fetch(&self) -> RouteResult<Vec<RouteRecord>> {
        let mut size = 0u32;
        let probe = self
            .service
            .query_forward_table(&mut [], &mut size, true);

        if probe == NativeStatus::InsufficientBuffer {
            let needed = size as usize;
            debug!("forwarding table query needs {} bytes", needed);
            let mut buffer = Vec::new();
            buffer
                .try_reserve_exact(needed)
                .map_err(|_| RouteError::AllocationFailure { size: needed })?;
            buffer.resize(needed, 0);

            let status = self.service.query_forward_table(&mut buffer, &mut size, true);
            if !status.is_success() {
                return Err(RouteError::from_query_status(status));
            }
            return decode_table(&buffer);
        }

        if !probe.is_success() {
            return Err(RouteError::from_query_status(probe));
        }
        // The probe succeeded without handing any bytes back, meaning the
        // service had nothing to report.
        decode_table(&[])
    }

    /// Lists the gateways of all default routes on the host.
    ///
    /// An empty result is `Ok`; only fetch failures are errors. The most
    /// recently scanned default route comes first and the first-scanned
    /// comes last; callers depend on this ordering.
    pub fn default_gateways(&self) -> RouteResult<Vec<Gateway>> {
        let table = self.fetch()?;
        let mut gateways = Vec::new();
        for record in table.iter().filter(|r| r.is_default()) {
            gateways.insert(0, Gateway::from(record));
        }
        debug!("found {} default route(s)", gateways.len());
        Ok(gateways)
    }

    /// Replaces the active default gateway with `gateway`.
    ///
    /// Deletes every existing default route, then creates one new default
    /// route carrying `gateway` and the first deleted entry's interface
    /// index, metrics, and remaining attributes.
    ///
    /// This call is not atomic with respect to other writers: a concurrent
    /// process can observe a host with zero default routes between the
    /// deletions and the creation. If the creation fails after deletions
    /// succeeded, the table is left with no default route and the error is
    /// surfaced without rollback; already-deleted entries are not restored
    /// on any failure path.
    pub fn set_default_gateway(&self, gateway: Gateway) -> RouteResult<()> {
        let table = self.fetch()?;

        let mut template: Option<RouteRecord> = None;
        for record in table.iter().filter(|r| r.is_default()) {
            if template.is_none() {
                template = Some(*record);
            }
            let status = self.service.delete_forward_entry(record);
            if !status.is_success() {
                return Err(RouteError::from_modify_status(status));
            }
            debug!(
                "deleted default route via {} on interface {}",
                record.gateway, record.if_index
            );
        }

        let template = template.ok_or(RouteError::GatewayNotFound)?;
        let replacement = template.with_gateway(gateway);
        let status = self.service.create_forward_entry(&replacement);
        if !status.is_success() {
            warn!(
                "default route creation failed ({}) after deletion; \
                 host is left without a default route",
                status
            );
            return Err(RouteError::from_modify_status(status));
        }
        debug!(
            "installed default route via {} on interface {} (metric {})",
            gateway, replacement.if_index, replacement.metric
        );
        Ok(())
    }

    /// Returns a reference to the underlying routing service.
    pub fn service(&self) -> &S {
        &self.service
    }
}

/// Decodes an encoded table reply: a record count followed by exactly that
/// many packed records. A zero-length reply decodes as an empty table.
fn decode_table(buf: &[u8]) -> RouteResult<Vec<RouteRecord>> {
    if buf.is_empty() {
        return Ok(Vec::new());
    }
    if buf.len() < HEADER_LEN {
        return Err(RouteError::TruncatedReply {
            expected: HEADER_LEN,
            actual: buf.len(),
        });
    }

    let count = LittleEndian::read_u32(&buf[..HEADER_LEN]) as usize;
    // Divide rather than multiply so a hostile count cannot overflow.
    if count > (buf.len() - HEADER_LEN) / RouteRecord::WIRE_LEN {
        return Err(RouteError::TruncatedReply {
            expected: HEADER_LEN + count.saturating_mul(RouteRecord::WIRE_LEN),
            actual: buf.len(),
        });
    }

    let body = &buf[HEADER_LEN..HEADER_LEN + count * RouteRecord::WIRE_LEN];
    let mut records = Vec::with_capacity(count);
    for chunk in body.chunks_exact(RouteRecord::WIRE_LEN) {
        records.push(RouteRecord::decode(chunk));
    }
    debug!("decoded {} route record(s)", records.len());
    Ok(records)
}
