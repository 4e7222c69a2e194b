//! Identifiers for registry members.

use std::fmt;
use std::sync::Arc;

use crate::oid::Oid;

/// Identity of a named MIB member: owning MIB, local name and absolute OID.
///
/// The MIB itself is identified by an `Id` with an empty local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id {
    mib: Arc<str>,
    name: Arc<str>,
    oid: Oid,
}

impl Id {
    /// Create an id for a member of `mib`.
    pub fn new(mib: impl Into<Arc<str>>, name: impl Into<Arc<str>>, oid: Oid) -> Self {
        Self {
            mib: mib.into(),
            name: name.into(),
            oid,
        }
    }

    /// Owning MIB name.
    pub fn mib(&self) -> &str {
        &self.mib
    }

    /// Local name within the MIB (empty for the MIB itself).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute OID.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Value key for maps, independent of which lookup produced this id.
    pub fn key(&self) -> IdKey {
        IdKey {
            mib: Arc::clone(&self.mib),
            name: Arc::clone(&self.name),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.mib)
        } else {
            write!(f, "{}::{}", self.mib, self.name)
        }
    }
}

/// Hashable, ordered map key for an [`Id`]: MIB name plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdKey {
    mib: Arc<str>,
    name: Arc<str>,
}

impl IdKey {
    /// Build a key from names.
    pub fn new(mib: &str, name: &str) -> Self {
        Self {
            mib: mib.into(),
            name: name.into(),
        }
    }

    /// MIB name.
    pub fn mib(&self) -> &str {
        &self.mib
    }

    /// Local name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.mib)
        } else {
            write!(f, "{}::{}", self.mib, self.name)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for IdKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn test_id_display() {
        let id = Id::new("IF-MIB", "ifDescr", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2));
        assert_eq!(id.to_string(), "IF-MIB::ifDescr");

        let mib = Id::new("IF-MIB", "", oid!(1, 3, 6, 1, 2, 1, 2));
        assert_eq!(mib.to_string(), "IF-MIB");
    }

    #[test]
    fn test_key_independent_of_instance() {
        let a = Id::new("IF-MIB", "ifDescr", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2));
        let b = Id::new(
            String::from("IF-MIB"),
            String::from("ifDescr"),
            oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2),
        );
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), IdKey::new("IF-MIB", "ifDescr"));
        assert_eq!(a.key().to_string(), "IF-MIB::ifDescr");
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![
            IdKey::new("IF-MIB", "ifType"),
            IdKey::new("BRIDGE-MIB", "dot1dTpFdbPort"),
            IdKey::new("IF-MIB", "ifDescr"),
        ];
        keys.sort();
        assert_eq!(keys[0].mib(), "BRIDGE-MIB");
        assert_eq!(keys[1].name(), "ifDescr");
    }
}
