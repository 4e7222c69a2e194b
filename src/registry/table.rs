//! Tables and row decoding.
//!
//! A [`Table`] pairs an ordered list of index objects, whose syntaxes jointly
//! decode a row key from the OID suffix, with an ordered list of entry
//! (column) objects. [`Table::map`] turns a batch of walked var-binds into
//! per-row [`IndexMap`] / [`EntryMap`] pairs.
//!
//! During a multi-column walk each batch usually carries one var-bind per
//! column for a single row, but a batch may also hold partial rows. [`Table::map`]
//! keeps no state between calls; use a [`RowSet`] to merge rows across batches.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::VarBind;

use super::{Id, IdKey, Object};

/// Decoded index values of one row, keyed by index object.
pub type IndexMap = BTreeMap<IdKey, Value>;

/// Decoded column values of one row, keyed by entry object.
pub type EntryMap = BTreeMap<IdKey, Value>;

/// Ordered index objects of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSyntax(Vec<Arc<Object>>);

/// Ordered entry (column) objects of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySyntax(Vec<Arc<Object>>);

macro_rules! impl_object_list {
    ($list:ty) => {
        impl $list {
            /// Iterate over the objects in order.
            pub fn iter(&self) -> std::slice::Iter<'_, Arc<Object>> {
                self.0.iter()
            }

            /// Number of objects.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether the list is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// OIDs of the objects, in order.
            pub fn oids(&self) -> Vec<Oid> {
                self.0.iter().map(|object| object.oid().clone()).collect()
            }

            /// Display names of the objects, in order.
            pub fn names(&self) -> Vec<String> {
                self.0.iter().map(|object| object.to_string()).collect()
            }
        }

        impl<'a> IntoIterator for &'a $list {
            type Item = &'a Arc<Object>;
            type IntoIter = std::slice::Iter<'a, Arc<Object>>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

impl_object_list!(IndexSyntax);
impl_object_list!(EntrySyntax);

/// A registered conceptual table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    id: Id,
    entry_oid: Oid,
    index_syntax: IndexSyntax,
    entry_syntax: EntrySyntax,
}

impl Table {
    /// Create a table.
    ///
    /// The entry root is `id.oid().1` (SMI convention). Every entry object
    /// must sit directly under it; index objects may live anywhere. Both lists
    /// must be non-empty.
    pub fn new(id: Id, index: Vec<Arc<Object>>, entry: Vec<Arc<Object>>) -> Result<Self> {
        if index.is_empty() {
            return Err(Error::invalid_definition(&id, "table has no index objects"));
        }
        if entry.is_empty() {
            return Err(Error::invalid_definition(&id, "table has no entry objects"));
        }

        let entry_oid = id.oid().child(1);
        for object in &entry {
            match entry_oid.index(object.oid()) {
                Some(tag) if tag.len() == 1 => {}
                _ => {
                    return Err(Error::invalid_definition(
                        &id,
                        format!("column {} is not under entry {}", object, entry_oid),
                    ));
                }
            }
        }

        Ok(Self {
            id,
            entry_oid,
            index_syntax: IndexSyntax(index),
            entry_syntax: EntrySyntax(entry),
        })
    }

    /// The table's identity (its OID is the table OID, not the entry).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Table OID.
    pub fn oid(&self) -> &Oid {
        self.id.oid()
    }

    /// Local name.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Map key for this table.
    pub fn key(&self) -> IdKey {
        self.id.key()
    }

    /// Entry root OID; column OIDs are `entry_oid.<tag>`.
    pub fn entry_oid(&self) -> &Oid {
        &self.entry_oid
    }

    /// Index objects, in key order.
    pub fn index_syntax(&self) -> &IndexSyntax {
        &self.index_syntax
    }

    /// Entry objects, in column order.
    pub fn entry_syntax(&self) -> &EntrySyntax {
        &self.entry_syntax
    }

    /// Decode a row key from its index arcs.
    ///
    /// Each index object consumes its arcs in turn; arcs left over once all
    /// index objects have decoded fail with [`Error::SyntaxIndex`] attributed to
    /// the last index syntax.
    pub fn unpack_index(&self, index: &[u32]) -> Result<IndexMap> {
        let mut map = IndexMap::new();
        let mut rest = index;

        for object in &self.index_syntax {
            let (value, next) = object.unpack_index(rest)?;
            map.insert(object.key(), value);
            rest = next;
        }

        if !rest.is_empty() {
            return match self.index_syntax.0.last() {
                Some(last) => Err(Error::syntax_index(last.syntax(), rest)),
                None => Err(Error::invalid_definition(&self.id, "table has no index objects")),
            };
        }

        Ok(map)
    }

    /// Decode a batch of var-binds into rows.
    ///
    /// Rows are returned in order of first appearance in the batch. A var-bind
    /// outside every column fails with [`Error::NotInTable`]; any decode error
    /// fails the whole batch.
    pub fn map(&self, varbinds: &[VarBind]) -> Result<Vec<Row>> {
        let mut rows: Vec<Row> = Vec::new();
        let mut positions: HashMap<&[u32], usize> = HashMap::new();

        for varbind in varbinds {
            let (object, index) = self
                .entry_syntax
                .iter()
                .find_map(|object| object.oid().index(&varbind.oid).map(|index| (object, index)))
                .ok_or_else(|| Error::NotInTable {
                    table: self.id.clone(),
                    oid: varbind.oid.clone(),
                })?;

            let position = match positions.get(index) {
                Some(&position) => position,
                None => {
                    let index_map = self.unpack_index(index)?;
                    rows.push(Row::new(Oid::from_slice(index), index_map));
                    positions.insert(index, rows.len() - 1);
                    rows.len() - 1
                }
            };

            let value = object.unpack(varbind)?;
            rows[position].entry.insert(object.key(), value);
        }

        Ok(rows)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// One decoded table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row index arcs, as an OID suffix.
    pub index_oid: Oid,
    /// Decoded index values.
    pub index: IndexMap,
    /// Decoded column values seen so far.
    pub entry: EntryMap,
}

impl Row {
    /// Create a row with no column values.
    pub fn new(index_oid: Oid, index: IndexMap) -> Self {
        Self {
            index_oid,
            index,
            entry: EntryMap::new(),
        }
    }

    /// Merge column values from another batch's view of the same row.
    pub fn merge(&mut self, other: Row) {
        self.entry.extend(other.entry);
    }

    /// Split into index and entry maps.
    pub fn into_parts(self) -> (IndexMap, EntryMap) {
        (self.index, self.entry)
    }
}

/// Accumulates rows across walk batches, merging by row index.
///
/// Rows keep the order in which their index was first seen.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<Row>,
    positions: HashMap<Oid, usize>,
}

impl RowSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row, merging it into an existing row with the same index.
    pub fn insert(&mut self, row: Row) {
        match self.positions.get(&row.index_oid) {
            Some(&position) => self.rows[position].merge(row),
            None => {
                self.positions.insert(row.index_oid.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    /// Look up a row by its index arcs.
    pub fn get(&self, index: &[u32]) -> Option<&Row> {
        self.positions
            .get(&Oid::from_slice(index))
            .map(|&position| &self.rows[position])
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume into rows in first-seen order.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl Extend<Row> for RowSet {
    fn extend<I: IntoIterator<Item = Row>>(&mut self, iter: I) {
        for row in iter {
            self.insert(row);
        }
    }
}
