//! MIB-aware client operations.
//!
//! A [`Client`] sequences requests over a [`Transport`] and decodes the
//! responses against registry definitions. Every operation awaits one request
//! at a time; nothing is issued concurrently, and the first error ends the
//! operation.
//!
//! # Example
//!
//! ```rust,no_run
//! # use snmp_mibs::{Client, Result};
//! # use snmp_mibs::transport::Transport;
//! # async fn example<T: Transport>(transport: T) -> Result<()> {
//! let registry = snmp_mibs::registry::global()?;
//! let client = Client::builder().build(transport);
//!
//! let sys_name = registry.resolve_object("SNMPv2-MIB::sysName")?;
//! println!("{}", client.get_object(&sys_name).await?);
//!
//! let if_table = registry.resolve_table("IF-MIB::ifTable")?;
//! client
//!     .walk_table(&if_table, |index, entry| {
//!         println!("{:?} {:?}", index, entry);
//!         Ok(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ClientBuilder;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::oid::Oid;
use crate::registry::{EntryMap, Id, IdKey, IndexMap, Mib, Object, Registry, RowSet, Table};
use crate::transport::{Transport, check_response_length};
use crate::value::Value;
use crate::varbind::RawValue;

/// Client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Maximum OIDs per GETNEXT issued by [`Client::probe_many`] (default: 10).
    ///
    /// `0` means no limit: all OIDs go into a single request.
    pub max_oids_per_request: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_oids_per_request: 10,
        }
    }
}

/// MIB-aware SNMP client over a transport.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl Client<()> {
    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> Client<T> {
    /// Create a client from a transport and configuration.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check whether the agent has any instance under `id`.
    ///
    /// Issues one GETNEXT for the id's OID. An answer outside the subtree (or
    /// `endOfMibView`) is a negative result, not an error.
    pub async fn probe(&self, id: &Id) -> Result<bool> {
        tracing::debug!(snmp.oid = %id.oid(), %id, "probe");

        let response = self.transport.get_next(std::slice::from_ref(id.oid())).await?;
        check_response_length(1, &response)?;

        let present = is_present(id, &response[0].oid, &response[0].value);
        tracing::debug!(%id, snmp.present = present, "probe complete");
        Ok(present)
    }

    /// Probe several ids, keyed by [`IdKey`].
    ///
    /// OIDs are sent in GETNEXT requests of at most
    /// [`ClientConfig::max_oids_per_request`] OIDs each, in input order, and
    /// responses are matched back by position. A transport error fails the
    /// whole call.
    pub async fn probe_many(&self, ids: &[Id]) -> Result<HashMap<IdKey, bool>> {
        let chunk_size = match self.config.max_oids_per_request {
            0 => ids.len().max(1),
            max => max,
        };
        tracing::debug!(
            snmp.varbind_count = ids.len(),
            snmp.max_oids_per_request = self.config.max_oids_per_request,
            "probe many"
        );

        let mut probed = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(chunk_size) {
            let oids: Vec<_> = chunk.iter().map(|id| id.oid().clone()).collect();
            let response = self.transport.get_next(&oids).await?;
            check_response_length(oids.len(), &response)?;

            for (id, vb) in chunk.iter().zip(&response) {
                let present = is_present(id, &vb.oid, &vb.value);
                tracing::trace!(%id, snmp.present = present, "probed");
                probed.insert(id.key(), present);
            }
        }

        Ok(probed)
    }

    /// Read a scalar object's `.0` instance.
    pub async fn get_object(&self, object: &Object) -> Result<Value> {
        let oid = object.oid().child(0);
        tracing::debug!(snmp.oid = %oid, %object, "get object");

        let response = self.transport.get(std::slice::from_ref(&oid)).await?;
        check_response_length(1, &response)?;
        object.unpack(&response[0])
    }

    /// Walk every column of `table`, calling `row` once per decoded row of
    /// each walk batch.
    ///
    /// A row seen in several batches (columns advancing at different rates)
    /// is passed once per batch, with only that batch's columns in its entry
    /// map; see [`Client::collect_table`] to merge them. A decode error fails
    /// the batch before `row` sees any of it. The first error from decoding,
    /// the transport or `row` ends the walk and is returned.
    pub async fn walk_table<F>(&self, table: &Table, mut row: F) -> Result<()>
    where
        F: FnMut(IndexMap, EntryMap) -> Result<()> + Send,
    {
        let oids = table.entry_syntax().oids();
        tracing::debug!(
            %table,
            snmp.columns = oids.len(),
            "walk table"
        );

        let mut rows = 0usize;
        self.transport
            .walk(&oids, |batch| {
                for decoded in table.map(batch)? {
                    tracing::trace!(
                        %table,
                        snmp.index = %decoded.index_oid,
                        snmp.varbind_count = decoded.entry.len(),
                        "row"
                    );
                    let (index, entry) = decoded.into_parts();
                    rows += 1;
                    row(index, entry)?;
                }
                Ok(())
            })
            .await?;

        tracing::debug!(%table, snmp.rows = rows, "walk table complete");
        Ok(())
    }

    /// Walk `table` and merge its batches into complete rows.
    pub async fn collect_table(&self, table: &Table) -> Result<RowSet> {
        let mut rows = RowSet::new();
        self.transport
            .walk(&table.entry_syntax().oids(), |batch| {
                rows.extend(table.map(batch)?);
                Ok(())
            })
            .await?;
        Ok(rows)
    }

    /// MIBs of `registry` with at least one instance on the agent, in
    /// registration order.
    pub async fn probe_mibs(&self, registry: &Registry) -> Result<Vec<Arc<Mib>>> {
        let ids: Vec<Id> = registry.mibs().map(|mib| mib.id().clone()).collect();
        let probed = self.probe_many(&ids).await?;

        Ok(registry
            .mibs()
            .filter(|mib| probed.get(&mib.id().key()).copied().unwrap_or(false))
            .cloned()
            .collect())
    }
}

fn is_present(id: &Id, oid: &Oid, value: &RawValue) -> bool {
    !matches!(value, RawValue::EndOfMibView) && id.oid().index(oid).is_some()
}
