//! MIB registry.
//!
//! The registry maps names to [`Object`]s and [`Table`]s. It is built once,
//! explicitly, from a set of [`Mib`]s and frozen; nothing mutates it
//! afterwards, so it can be shared freely between tasks and threads.
//!
//! # Process-wide registry
//!
//! Most programs use a single registry. [`install`] sets it once at startup;
//! [`global`] returns it, falling back to [`Registry::builtin`] when nothing was
//! installed. [`walk_mibs`] and [`resolve_object`] read the global registry.
//!
//! ```
//! use snmp_mibs::registry;
//!
//! let object = registry::resolve_object("IF-MIB::ifDescr").unwrap();
//! assert_eq!(object.to_string(), "IF-MIB::ifDescr");
//! ```

mod id;
mod mib;
mod object;
pub mod table;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub use id::{Id, IdKey};
pub use mib::{Member, Mib, MibBuilder};
pub use object::Object;
pub use table::{EntryMap, EntrySyntax, IndexMap, IndexSyntax, Row, RowSet, Table};

use crate::error::{Error, Result};
use crate::oid::Oid;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install `registry` as the process-wide registry.
///
/// Fails with [`Error::InvalidDefinition`] if a registry is already installed,
/// including one installed implicitly by an earlier call to [`global`].
pub fn install(registry: Registry) -> Result<&'static Registry> {
    GLOBAL
        .set(registry)
        .map_err(|_| Error::invalid_definition("registry", "a registry is already installed"))?;
    global()
}

/// The process-wide registry, installing the built-in MIBs on first use if
/// nothing was installed.
///
/// Fails if the built-in MIBs do not validate; nothing is installed then.
pub fn global() -> Result<&'static Registry> {
    if let Some(registry) = GLOBAL.get() {
        return Ok(registry);
    }
    let builtin = Registry::builtin()?;
    Ok(GLOBAL.get_or_init(|| builtin))
}

/// Visit every MIB of the process-wide registry, in registration order.
pub fn walk_mibs(visit: impl FnMut(&Arc<Mib>)) -> Result<()> {
    global()?.walk_mibs(visit);
    Ok(())
}

/// Resolve `MIB::name` to an object of the process-wide registry.
pub fn resolve_object(name: &str) -> Result<Arc<Object>> {
    global()?.resolve_object(name)
}

/// Split `MIB::name` into its parts.
pub fn parse_name(name: &str) -> Result<(&str, &str)> {
    match name.split_once("::") {
        Some((mib, local)) if !mib.is_empty() && !local.is_empty() && !local.contains("::") => {
            Ok((mib, local))
        }
        _ => Err(Error::InvalidName {
            name: name.to_string(),
        }),
    }
}

/// Frozen collection of MIBs.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    mibs: Vec<Arc<Mib>>,
    names: HashMap<String, usize>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry containing the MIBs shipped with this crate.
    ///
    /// Fails with the first definition error of a built-in MIB.
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(crate::mibs::builtin())
    }

    fn from_definitions(mibs: impl IntoIterator<Item = Result<Mib>>) -> Result<Self> {
        let mut builder = Self::builder();
        for mib in mibs {
            let mib = mib.inspect_err(|error| {
                tracing::error!(%error, "built-in MIB rejected");
            })?;
            builder = builder.mib(mib);
        }
        builder.build()
    }

    /// Visit every MIB, in registration order.
    pub fn walk_mibs(&self, mut visit: impl FnMut(&Arc<Mib>)) {
        for mib in &self.mibs {
            visit(mib);
        }
    }

    /// MIBs in registration order.
    pub fn mibs(&self) -> impl Iterator<Item = &Arc<Mib>> {
        self.mibs.iter()
    }

    /// Number of registered MIBs.
    pub fn len(&self) -> usize {
        self.mibs.len()
    }

    /// Whether no MIBs are registered.
    pub fn is_empty(&self) -> bool {
        self.mibs.is_empty()
    }

    /// MIB by name.
    pub fn mib(&self, name: &str) -> Result<&Arc<Mib>> {
        self.names
            .get(name)
            .map(|&position| &self.mibs[position])
            .ok_or_else(|| Error::UnknownMib {
                name: name.to_string(),
            })
    }

    /// Resolve `MIB::name` to an object.
    pub fn resolve_object(&self, name: &str) -> Result<Arc<Object>> {
        let (mib, local) = parse_name(name)?;
        self.mib(mib)?.resolve_object(local)
    }

    /// Resolve `MIB::name` to a table.
    pub fn resolve_table(&self, name: &str) -> Result<Arc<Table>> {
        let (mib, local) = parse_name(name)?;
        self.mib(mib)?.resolve_table(local)
    }

    /// Resolve `MIB::name` to an object or table.
    pub fn resolve(&self, name: &str) -> Result<Member> {
        let (mib, local) = parse_name(name)?;
        let mib = self.mib(mib)?;
        mib.member(local).cloned().ok_or_else(|| Error::UnknownObject {
            mib: mib.name().to_string(),
            name: local.to_string(),
        })
    }

    /// Registered member with the longest OID prefixing `oid`, plus the
    /// remaining index arcs.
    pub fn lookup_oid<'a>(&self, oid: &'a Oid) -> Option<(&Member, &'a [u32])> {
        self.mibs
            .iter()
            .filter_map(|mib| mib.lookup_oid(oid))
            .min_by_key(|(_, rest)| rest.len())
    }

    /// Render `oid` symbolically (`IF-MIB::ifDescr.1`), falling back to dotted
    /// notation for unregistered OIDs.
    pub fn format_oid(&self, oid: &Oid) -> String {
        match self.lookup_oid(oid) {
            Some((member, [])) => member.id().to_string(),
            Some((member, rest)) => format!("{}.{}", member.id(), Oid::from_slice(rest)),
            None => oid.to_string(),
        }
    }

    /// Parse dotted notation, `MIB::name` or `MIB::name.suffix`.
    pub fn parse_oid(&self, input: &str) -> Result<Oid> {
        if !input.contains("::") {
            return Oid::parse(input);
        }

        let (name, suffix) = match input.split_once("::") {
            Some((mib, rest)) => match rest.split_once('.') {
                Some((local, suffix)) => (&input[..mib.len() + 2 + local.len()], Some(suffix)),
                None => (input, None),
            },
            None => (input, None),
        };

        let member = self.resolve(name)?;
        match suffix {
            Some(suffix) => {
                let invalid = || Error::InvalidOid {
                    input: input.into(),
                };
                let arcs = Oid::parse(suffix).map_err(|_| invalid())?;
                if arcs.is_empty() {
                    return Err(invalid());
                }
                Ok(member.id().oid().extend(arcs.arcs()))
            }
            None => Ok(member.id().oid().clone()),
        }
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    mibs: Vec<Mib>,
}

impl RegistryBuilder {
    /// Add a MIB. MIBs keep the order in which they are added.
    pub fn mib(mut self, mib: Mib) -> Self {
        self.mibs.push(mib);
        self
    }

    /// Add several MIBs.
    pub fn mibs(mut self, mibs: impl IntoIterator<Item = Mib>) -> Self {
        self.mibs.extend(mibs);
        self
    }

    /// Freeze the registry. Duplicate MIB names are rejected.
    pub fn build(self) -> Result<Registry> {
        let mut registry = Registry::default();
        for mib in self.mibs {
            if registry.names.contains_key(mib.name()) {
                return Err(Error::invalid_definition(mib.id(), "duplicate MIB"));
            }
            registry
                .names
                .insert(mib.name().to_string(), registry.mibs.len());
            registry.mibs.push(Arc::new(mib));
        }
        tracing::debug!(snmp.mibs = registry.mibs.len(), "registry built");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::syntax::Syntax;

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("IF-MIB::ifDescr").unwrap(), ("IF-MIB", "ifDescr"));
        for bad in ["ifDescr", "::ifDescr", "IF-MIB::", "A::B::C", ""] {
            assert!(matches!(parse_name(bad), Err(Error::InvalidName { .. })), "{}", bad);
        }
    }

    #[test]
    fn test_resolve_object() {
        let registry = registry();
        let object = registry.resolve_object("IF-MIB::ifDescr").unwrap();
        assert_eq!(object.oid(), &oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2));
        assert_eq!(object.syntax(), &Syntax::DisplayString);
    }

    #[test]
    fn test_resolve_misses() {
        let registry = registry();
        assert!(matches!(
            registry.resolve_object("NOPE-MIB::ifDescr"),
            Err(Error::UnknownMib { .. })
        ));
        assert!(matches!(
            registry.resolve_object("IF-MIB::nope"),
            Err(Error::UnknownObject { .. })
        ));
        assert!(matches!(
            registry.resolve_table("IF-MIB::ifDescr"),
            Err(Error::UnknownTable { .. })
        ));
    }

    #[test]
    fn test_walk_mibs_in_order() {
        let registry = registry();
        let mut names = Vec::new();
        registry.walk_mibs(|mib| names.push(mib.name().to_string()));
        assert_eq!(names, vec!["SNMPv2-MIB", "IF-MIB", "BRIDGE-MIB"]);
    }

    #[test]
    fn test_format_and_parse_oid() {
        let registry = registry();
        let oid = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3);
        assert_eq!(registry.format_oid(&oid), "IF-MIB::ifDescr.3");
        assert_eq!(registry.parse_oid("IF-MIB::ifDescr.3").unwrap(), oid);
        assert_eq!(registry.parse_oid("IF-MIB::ifDescr").unwrap(), oid.parent().unwrap());
        assert_eq!(registry.parse_oid(".1.3.6.1.2.1.2.2.1.2.3").unwrap(), oid);

        assert_eq!(registry.format_oid(&oid!(1, 3, 6, 1, 4, 1, 9)), "1.3.6.1.4.1.9");
        assert!(registry.parse_oid("IF-MIB::ifDescr.x").is_err());
        assert!(registry.parse_oid("IF-MIB::nope.1").is_err());
    }

    #[test]
    fn test_parse_oid_rejects_empty_suffix() {
        let registry = registry();
        for input in ["IF-MIB::ifDescr.", "IF-MIB::ifDescr..", "IF-MIB::ifDescr.3."] {
            assert!(
                matches!(registry.parse_oid(input), Err(Error::InvalidOid { .. })),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_lookup_oid_picks_deepest_member() {
        let registry = registry();
        let oid = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0);
        let (member, rest) = registry.lookup_oid(&oid).unwrap();
        assert_eq!(member.id().to_string(), "SNMPv2-MIB::sysName");
        assert_eq!(rest, &[0]);
    }

    #[test]
    fn test_builder_rejects_duplicate_mib() {
        let mib = || Mib::builder("TEST-MIB", oid!(1, 3, 6, 1, 4, 1, 99)).build().unwrap();
        let err = Registry::builder().mib(mib()).mib(mib()).build().unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { .. }));
    }

    #[test]
    fn test_builtin_definition_error_surfaces() {
        let registry = registry();
        assert_eq!(registry.len(), 3);

        let broken = Mib::builder("BROKEN-MIB", oid!(1, 3, 6, 1, 4, 1, 99999))
            .object("outside", oid!(1, 3, 6, 1, 2, 1, 1), Syntax::Integer)
            .build();
        let err = Registry::from_definitions(crate::mibs::builtin().into_iter().chain([broken]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { .. }));
    }

    #[test]
    fn test_global_registry() {
        // Nothing else in this test binary installs a registry
        let object = resolve_object("SNMPv2-MIB::sysDescr").unwrap();
        assert_eq!(object.oid(), &oid!(1, 3, 6, 1, 2, 1, 1, 1));

        let mut count = 0;
        walk_mibs(|_| count += 1).unwrap();
        assert_eq!(count, global().unwrap().len());

        assert!(install(Registry::default()).is_err());
    }
}
