//! MIB modules: named collections of objects and tables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::syntax::Syntax;

use super::{Id, Object, Table};

/// A named member of a MIB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Scalar object or table column.
    Object(Arc<Object>),
    /// Conceptual table.
    Table(Arc<Table>),
}

impl Member {
    /// The member's identity.
    pub fn id(&self) -> &Id {
        match self {
            Self::Object(object) => object.id(),
            Self::Table(table) => table.id(),
        }
    }

    /// The object, if this member is one.
    pub fn as_object(&self) -> Option<&Arc<Object>> {
        match self {
            Self::Object(object) => Some(object),
            Self::Table(_) => None,
        }
    }

    /// The table, if this member is one.
    pub fn as_table(&self) -> Option<&Arc<Table>> {
        match self {
            Self::Table(table) => Some(table),
            Self::Object(_) => None,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A frozen MIB module.
///
/// Members are kept in registration order; objects and tables share one
/// namespace, so a local name resolves to at most one of them.
#[derive(Debug, Clone)]
pub struct Mib {
    id: Id,
    members: Vec<Member>,
    names: HashMap<Arc<str>, usize>,
}

impl Mib {
    /// Start building a MIB rooted at `oid`.
    pub fn builder(name: impl Into<Arc<str>>, oid: Oid) -> MibBuilder {
        MibBuilder::new(name, oid)
    }

    /// The MIB's own id (empty local name, root OID).
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// MIB name.
    pub fn name(&self) -> &str {
        self.id.mib()
    }

    /// Root OID.
    pub fn oid(&self) -> &Oid {
        self.id.oid()
    }

    /// Visit the id of every member, in registration order.
    pub fn walk(&self, mut visit: impl FnMut(&Id)) {
        for member in &self.members {
            visit(member.id());
        }
    }

    /// Members in registration order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &Arc<Object>> {
        self.members.iter().filter_map(Member::as_object)
    }

    /// Tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<Table>> {
        self.members.iter().filter_map(Member::as_table)
    }

    /// Member by local name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.names.get(name).map(|&position| &self.members[position])
    }

    /// The object registered under `id`, if `id` names an object of this MIB.
    pub fn object(&self, id: &Id) -> Option<&Arc<Object>> {
        self.member_for(id).and_then(Member::as_object)
    }

    /// The table registered under `id`, if `id` names a table of this MIB.
    pub fn table(&self, id: &Id) -> Option<&Arc<Table>> {
        self.member_for(id).and_then(Member::as_table)
    }

    /// Object by local name.
    pub fn resolve_object(&self, name: &str) -> Result<Arc<Object>> {
        self.member(name)
            .and_then(Member::as_object)
            .cloned()
            .ok_or_else(|| Error::UnknownObject {
                mib: self.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Table by local name.
    pub fn resolve_table(&self, name: &str) -> Result<Arc<Table>> {
        self.member(name)
            .and_then(Member::as_table)
            .cloned()
            .ok_or_else(|| Error::UnknownTable {
                mib: self.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Member with the longest OID that is a prefix of (or equal to) `oid`,
    /// together with the remaining arcs.
    pub fn lookup_oid<'a>(&self, oid: &'a Oid) -> Option<(&Member, &'a [u32])> {
        self.members
            .iter()
            .filter(|member| oid.starts_with(member.id().oid()))
            .max_by_key(|member| member.id().oid().len())
            .map(|member| (member, &oid.arcs()[member.id().oid().len()..]))
    }

    fn member_for(&self, id: &Id) -> Option<&Member> {
        if id.mib() != self.name() {
            return None;
        }
        self.member(id.name())
    }
}

impl fmt::Display for Mib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Pending table definition; resolved against the MIB's objects at build.
#[derive(Debug)]
struct TableDef {
    name: Arc<str>,
    oid: Oid,
    index: Vec<String>,
    entry: Vec<String>,
}

#[derive(Debug)]
enum Def {
    Object(Object),
    Table(TableDef),
}

/// Builder for [`Mib`].
///
/// Objects are given absolute OIDs. Tables name their index and entry objects,
/// which must be registered in the same builder (in any order). External index
/// objects from other MIBs are added with [`MibBuilder::import`].
///
/// # Example
///
/// ```
/// use snmp_mibs::oid;
/// use snmp_mibs::registry::Mib;
/// use snmp_mibs::syntax::Syntax;
///
/// let mib = Mib::builder("TEST-MIB", oid!(1, 3, 6, 1, 4, 1, 99999))
///     .object("testIndex", oid!(1, 3, 6, 1, 4, 1, 99999, 1, 1, 1), Syntax::Integer)
///     .object("testName", oid!(1, 3, 6, 1, 4, 1, 99999, 1, 1, 2), Syntax::DisplayString)
///     .table("testTable", oid!(1, 3, 6, 1, 4, 1, 99999, 1), ["testIndex"], ["testName"])
///     .build()
///     .unwrap();
///
/// assert_eq!(mib.tables().count(), 1);
/// ```
#[derive(Debug)]
pub struct MibBuilder {
    id: Id,
    defs: Vec<Def>,
    imports: HashMap<String, Arc<Object>>,
}

impl MibBuilder {
    /// Create a builder for a MIB rooted at `oid`.
    pub fn new(name: impl Into<Arc<str>>, oid: Oid) -> Self {
        Self {
            id: Id::new(name, "", oid),
            defs: Vec::new(),
            imports: HashMap::new(),
        }
    }

    /// Register a scalar object or table column.
    pub fn object(mut self, name: impl Into<Arc<str>>, oid: Oid, syntax: Syntax) -> Self {
        let id = Id::new(self.id.mib(), name, oid);
        self.defs.push(Def::Object(Object::new(id, syntax)));
        self
    }

    /// Register a table by its table OID (the entry is `oid.1`).
    pub fn table<I, E>(mut self, name: impl Into<Arc<str>>, oid: Oid, index: I, entry: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        self.defs.push(Def::Table(TableDef {
            name: name.into(),
            oid,
            index: index.into_iter().map(Into::into).collect(),
            entry: entry.into_iter().map(Into::into).collect(),
        }));
        self
    }

    /// Make an object owned by another MIB usable as a table index here,
    /// under `MIB::name`.
    pub fn import(mut self, object: Arc<Object>) -> Self {
        self.imports.insert(object.id().to_string(), object);
        self
    }

    /// Validate and freeze the MIB.
    ///
    /// Fails with [`Error::InvalidDefinition`] on duplicate local names,
    /// members outside the MIB root, unknown index or entry names, and tables
    /// rejected by [`Table::new`].
    pub fn build(self) -> Result<Mib> {
        let mut members = Vec::with_capacity(self.defs.len());
        let mut names: HashMap<Arc<str>, usize> = HashMap::new();
        let mut objects: HashMap<String, Arc<Object>> = HashMap::new();
        let mut tables = Vec::new();

        for def in self.defs {
            let (name, oid) = match &def {
                Def::Object(object) => (Arc::from(object.name()), object.oid().clone()),
                Def::Table(table) => (Arc::clone(&table.name), table.oid.clone()),
            };
            if name.is_empty() {
                return Err(Error::invalid_definition(&self.id, "member with empty name"));
            }
            if names.contains_key(&name) {
                return Err(Error::invalid_definition(
                    &self.id,
                    format!("duplicate member {}", name),
                ));
            }
            if !oid.starts_with(self.id.oid()) {
                return Err(Error::invalid_definition(
                    &self.id,
                    format!("{} ({}) is outside the MIB root {}", name, oid, self.id.oid()),
                ));
            }

            names.insert(name, members.len());
            match def {
                Def::Object(object) => {
                    let object = Arc::new(object);
                    objects.insert(object.name().to_string(), Arc::clone(&object));
                    members.push(Some(Member::Object(object)));
                }
                Def::Table(table) => {
                    tables.push((members.len(), table));
                    members.push(None);
                }
            }
        }

        let lookup = |name: &str, table: &TableDef| -> Result<Arc<Object>> {
            objects
                .get(name)
                .or_else(|| self.imports.get(name))
                .cloned()
                .ok_or_else(|| {
                    Error::invalid_definition(
                        format!("{}::{}", self.id.mib(), table.name),
                        format!("unknown object {}", name),
                    )
                })
        };

        for (position, def) in tables {
            let index = def
                .index
                .iter()
                .map(|name| lookup(name, &def))
                .collect::<Result<Vec<_>>>()?;
            let entry = def
                .entry
                .iter()
                .map(|name| lookup(name, &def))
                .collect::<Result<Vec<_>>>()?;
            let id = Id::new(self.id.mib(), def.name, def.oid);
            let table = Table::new(id, index, entry)?;
            members[position] = Some(Member::Table(Arc::new(table)));
        }

        Ok(Mib {
            id: self.id,
            members: members.into_iter().flatten().collect(),
            names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn test_mib() -> Mib {
        Mib::builder("TEST-MIB", oid!(1, 3, 6, 1, 4, 1, 99))
            .object("testScalar", oid!(1, 3, 6, 1, 4, 1, 99, 1), Syntax::Integer)
            .table(
                "testTable",
                oid!(1, 3, 6, 1, 4, 1, 99, 2),
                ["testIndex"],
                ["testIndex", "testName"],
            )
            .object("testIndex", oid!(1, 3, 6, 1, 4, 1, 99, 2, 1, 1), Syntax::Integer)
            .object("testName", oid!(1, 3, 6, 1, 4, 1, 99, 2, 1, 2), Syntax::DisplayString)
            .build()
            .unwrap()
    }

    #[test]
    fn test_walk_in_registration_order() {
        let mib = test_mib();
        let mut names = Vec::new();
        mib.walk(|id| names.push(id.to_string()));
        assert_eq!(
            names,
            vec![
                "TEST-MIB::testScalar",
                "TEST-MIB::testTable",
                "TEST-MIB::testIndex",
                "TEST-MIB::testName",
            ]
        );
    }

    #[test]
    fn test_object_and_table_are_exclusive() {
        let mib = test_mib();
        let mut seen = 0;
        mib.walk(|id| {
            let object = mib.object(id).is_some();
            let table = mib.table(id).is_some();
            assert!(object != table, "{} must be exactly one kind", id);
            seen += 1;
        });
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_lookup_by_foreign_id() {
        let mib = test_mib();
        let foreign = Id::new("OTHER-MIB", "testScalar", oid!(1, 3, 6, 1, 4, 1, 99, 1));
        assert!(mib.object(&foreign).is_none());
    }

    #[test]
    fn test_resolve() {
        let mib = test_mib();
        assert_eq!(mib.resolve_object("testName").unwrap().syntax(), &Syntax::DisplayString);
        assert_eq!(mib.resolve_table("testTable").unwrap().entry_syntax().len(), 2);

        assert!(matches!(
            mib.resolve_object("testTable"),
            Err(Error::UnknownObject { .. })
        ));
        assert!(matches!(
            mib.resolve_table("nope"),
            Err(Error::UnknownTable { ref name, .. }) if name == "nope"
        ));
    }

    #[test]
    fn test_lookup_oid_longest_prefix() {
        let mib = test_mib();
        let oid = oid!(1, 3, 6, 1, 4, 1, 99, 2, 1, 2, 7);
        let (member, rest) = mib.lookup_oid(&oid).unwrap();
        assert_eq!(member.id().name(), "testName");
        assert_eq!(rest, &[7]);

        let oid = oid!(1, 3, 6, 1, 4, 1, 99, 2, 1);
        let (member, rest) = mib.lookup_oid(&oid).unwrap();
        assert_eq!(member.id().name(), "testTable");
        assert_eq!(rest, &[1]);

        assert!(mib.lookup_oid(&oid!(1, 3, 6, 1, 2)).is_none());
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let err = Mib::builder("TEST-MIB", oid!(1, 3, 6))
            .object("a", oid!(1, 3, 6, 1), Syntax::Integer)
            .object("a", oid!(1, 3, 6, 2), Syntax::Integer)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { .. }));
    }

    #[test]
    fn test_build_rejects_outside_root() {
        let result = Mib::builder("TEST-MIB", oid!(1, 3, 6, 1, 4))
            .object("a", oid!(1, 3, 6, 1, 2, 1), Syntax::Integer)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_unknown_table_objects() {
        let err = Mib::builder("TEST-MIB", oid!(1, 3, 6))
            .object("col", oid!(1, 3, 6, 5, 1, 1), Syntax::Integer)
            .table("t", oid!(1, 3, 6, 5), ["missingIndex"], ["col"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("missingIndex"));
    }

    #[test]
    fn test_imported_index() {
        let if_index = Arc::new(Object::new(
            Id::new("IF-MIB", "ifIndex", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1)),
            Syntax::Integer,
        ));
        let mib = Mib::builder("TEST-MIB", oid!(1, 3, 6, 1, 4, 1, 99))
            .import(Arc::clone(&if_index))
            .object("testCol", oid!(1, 3, 6, 1, 4, 1, 99, 1, 1, 1), Syntax::Counter32)
            .table("testTable", oid!(1, 3, 6, 1, 4, 1, 99, 1), ["IF-MIB::ifIndex"], ["testCol"])
            .build()
            .unwrap();

        let table = mib.resolve_table("testTable").unwrap();
        assert_eq!(table.index_syntax().iter().next(), Some(&if_index));
        // Imports are not members
        assert!(mib.member("ifIndex").is_none());
    }
}
