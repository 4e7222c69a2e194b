//! Presentation snapshots of the registry and of poll results.
//!
//! These are plain owned structures, detached from the registry, for
//! rendering an index of known MIBs or a per-object result. With the `serde`
//! feature they implement `Serialize`.

use crate::error::Result;
use crate::registry::{Mib, Object, Registry, Table};
use crate::value::Value;

/// One MIB with its objects and tables, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MibIndex {
    /// MIB name.
    pub id: String,
    /// Root OID, dotted.
    pub oid: String,
    /// Scalar objects.
    pub objects: Vec<ObjectIndex>,
    /// Tables.
    pub tables: Vec<TableIndex>,
}

impl MibIndex {
    /// Snapshot a MIB.
    pub fn new(mib: &Mib) -> Self {
        let mut index = Self {
            id: mib.to_string(),
            oid: mib.oid().to_string(),
            objects: Vec::new(),
            tables: Vec::new(),
        };

        mib.walk(|id| {
            if let Some(object) = mib.object(id) {
                index.objects.push(ObjectIndex::new(object));
            }
            if let Some(table) = mib.table(id) {
                index.tables.push(TableIndex::new(table));
            }
        });

        index
    }
}

/// Snapshot every MIB of `registry`.
pub fn build(registry: &Registry) -> Vec<MibIndex> {
    let mut index = Vec::with_capacity(registry.len());
    registry.walk_mibs(|mib| index.push(MibIndex::new(mib)));
    index
}

/// A registered object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectIndex {
    /// `MIB::name`.
    pub id: String,
    /// Object OID, dotted.
    pub oid: String,
    /// Syntax label, e.g. `DisplayString`.
    pub syntax: &'static str,
}

impl ObjectIndex {
    /// Snapshot an object.
    pub fn new(object: &Object) -> Self {
        Self {
            id: object.to_string(),
            oid: object.oid().to_string(),
            syntax: object.syntax().name(),
        }
    }
}

/// A registered table with its ordered index and entry object names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableIndex {
    /// `MIB::name`.
    pub id: String,
    /// Table OID, dotted.
    pub oid: String,
    /// Index objects, in index order.
    pub index_keys: Vec<String>,
    /// Entry columns, in column order.
    pub entry_keys: Vec<String>,
}

impl TableIndex {
    /// Snapshot a table.
    pub fn new(table: &Table) -> Self {
        Self {
            id: table.to_string(),
            oid: table.oid().to_string(),
            index_keys: table.index_syntax().names(),
            entry_keys: table.entry_syntax().names(),
        }
    }
}

/// Outcome of reading one object: its value or the error text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectResult {
    /// The object read.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub object: ObjectIndex,
    /// Decoded value, on success.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<Value>,
    /// Error text, on failure.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl ObjectResult {
    /// Record the result of reading `object`.
    pub fn new(object: &Object, result: Result<Value>) -> Self {
        let (value, error) = match result {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error.to_string())),
        };
        Self {
            object: ObjectIndex::new(object),
            value,
            error,
        }
    }

    /// Whether reading the object failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
