//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//! An [`Oid`] is never mutated after construction; [`extend`](Oid::extend) and
//! [`child`](Oid::child) return new values.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
///
/// Ordering is lexicographic by arc, and an OID that is a strict prefix of
/// another sorts before it: `1.3.6.1.2` < `1.3.6.1.2.1` < `1.3.6.1.3`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_mibs::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// A single leading dot is accepted (`.1.3.6.1`), as printed by net-snmp.
    ///
    /// ```
    /// use snmp_mibs::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.1.0").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    /// assert!(Oid::parse("1.3..6").is_err());
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();
        for part in trimmed.split('.') {
            let arc: u32 = part.parse().map_err(|_| Error::InvalidOid { input: s.into() })?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Check if this OID is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Oid) -> bool {
        other.starts_with(self)
    }

    /// Suffix arcs of `other` relative to this OID.
    ///
    /// Returns `Some(suffix)` only when `self` is a *proper* prefix of `other`,
    /// so the suffix is never empty. Returns `None` for equal OIDs and for
    /// OIDs outside this subtree. This is a containment test, not an error.
    ///
    /// ```
    /// use snmp_mibs::oid;
    ///
    /// let if_descr = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2);
    /// assert_eq!(if_descr.index(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 7)), Some(&[7][..]));
    /// assert_eq!(if_descr.index(&if_descr), None);
    /// assert_eq!(if_descr.index(&oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 3, 7)), None);
    /// ```
    pub fn index<'a>(&self, other: &'a Oid) -> Option<&'a [u32]> {
        if other.arcs.len() > self.arcs.len() && other.starts_with(self) {
            Some(&other.arcs[self.arcs.len()..])
        } else {
            None
        }
    }

    /// Create a new OID with `arcs` appended.
    pub fn extend(&self, arcs: &[u32]) -> Oid {
        let mut extended = self.arcs.clone();
        extended.extend_from_slice(arcs);
        Oid { arcs: extended }
    }

    /// Create a child OID by appending one arc.
    pub fn child(&self, arc: u32) -> Oid {
        self.extend(&[arc])
    }

    /// Get the parent OID (all arcs except the last).
    ///
    /// Returns `None` if the OID is empty.
    pub fn parent(&self) -> Option<Oid> {
        let (_, rest) = self.arcs.split_last()?;
        Some(Oid::from_slice(rest))
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.arcs[..].cmp(&other.arcs[..])
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

/// Build an [`Oid`] from arc literals.
///
/// ```
/// use snmp_mibs::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
