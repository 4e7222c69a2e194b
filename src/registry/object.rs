//! Scalar objects.

use std::fmt;

use crate::error::Result;
use crate::oid::Oid;
use crate::syntax::Syntax;
use crate::value::Value;
use crate::varbind::VarBind;

use super::{Id, IdKey};

/// A registered leaf object: an id, its absolute OID and its syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    id: Id,
    syntax: Syntax,
}

impl Object {
    /// Create an object.
    pub fn new(id: Id, syntax: Syntax) -> Self {
        Self { id, syntax }
    }

    /// The object's identity.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Absolute OID of the object (without instance suffix).
    pub fn oid(&self) -> &Oid {
        self.id.oid()
    }

    /// Local name.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Map key for this object.
    pub fn key(&self) -> IdKey {
        self.id.key()
    }

    /// The object's syntax.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Decode a var-bind's value with this object's syntax.
    pub fn unpack(&self, varbind: &VarBind) -> Result<Value> {
        self.syntax.unpack(varbind)
    }

    /// Decode one index component with this object's syntax.
    pub fn unpack_index<'a>(&self, index: &'a [u32]) -> Result<(Value, &'a [u32])> {
        self.syntax.unpack_index(index)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
