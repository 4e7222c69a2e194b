//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with the raw value a transport decoded from the wire.
//! [`RawValue`] is the primitive wire form before any
//! [`Syntax`](crate::syntax::Syntax) interpretation.

use bytes::Bytes;

use crate::oid::Oid;

/// Wire-level SNMP value, as decoded by the transport.
///
/// One variant per SMIv2 base type plus the three exception values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RawValue {
    /// INTEGER (signed 32-bit).
    Integer(i32),
    /// OCTET STRING.
    OctetString(Bytes),
    /// NULL.
    Null,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier(Oid),
    /// IpAddress (4 octets).
    IpAddress([u8; 4]),
    /// Counter32.
    Counter32(u32),
    /// Gauge32 / Unsigned32.
    Gauge32(u32),
    /// TimeTicks (hundredths of a second).
    TimeTicks(u32),
    /// Opaque.
    Opaque(Bytes),
    /// Counter64.
    Counter64(u64),
    /// noSuchObject exception.
    NoSuchObject,
    /// noSuchInstance exception.
    NoSuchInstance,
    /// endOfMibView exception.
    EndOfMibView,
}

impl RawValue {
    /// Check if this is an exception value (noSuchObject, noSuchInstance, endOfMibView).
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Self::NoSuchObject | Self::NoSuchInstance | Self::EndOfMibView
        )
    }

    /// ASN.1 type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::OctetString(_) => "OCTET STRING",
            Self::Null => "NULL",
            Self::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            Self::IpAddress(_) => "IpAddress",
            Self::Counter32(_) => "Counter32",
            Self::Gauge32(_) => "Gauge32",
            Self::TimeTicks(_) => "TimeTicks",
            Self::Opaque(_) => "Opaque",
            Self::Counter64(_) => "Counter64",
            Self::NoSuchObject => "noSuchObject",
            Self::NoSuchInstance => "noSuchInstance",
            Self::EndOfMibView => "endOfMibView",
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "INTEGER {}", v),
            Self::OctetString(data) | Self::Opaque(data) => {
                write!(f, "{} ", self.type_name())?;
                for byte in data.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Self::ObjectIdentifier(oid) => write!(f, "OID {}", oid),
            Self::IpAddress([a, b, c, d]) => write!(f, "IpAddress {}.{}.{}.{}", a, b, c, d),
            Self::Counter32(v) | Self::Gauge32(v) | Self::TimeTicks(v) => {
                write!(f, "{} {}", self.type_name(), v)
            }
            Self::Counter64(v) => write!(f, "Counter64 {}", v),
            Self::Null | Self::NoSuchObject | Self::NoSuchInstance | Self::EndOfMibView => {
                write!(f, "{}", self.type_name())
            }
        }
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<&'static str> for RawValue {
    fn from(value: &'static str) -> Self {
        Self::OctetString(Bytes::from_static(value.as_bytes()))
    }
}

impl From<Oid> for RawValue {
    fn from(value: Oid) -> Self {
        Self::ObjectIdentifier(value)
    }
}

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The raw wire value.
    pub value: RawValue,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: impl Into<RawValue>) -> Self {
        Self {
            oid,
            value: value.into(),
        }
    }

    /// Create a VarBind with a NULL value (for GET requests).
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: RawValue::Null,
        }
    }

    /// The var-bind OID.
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    /// The raw wire value.
    pub fn value(&self) -> &RawValue {
        &self.value
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), 42);
        assert_eq!(vb.to_string(), "1.3.6.1.2.1.1.1.0 = INTEGER 42");
    }

    #[test]
    fn test_varbind_display_exception() {
        let vb = VarBind::new(oid!(1, 3, 6, 1), RawValue::NoSuchObject);
        assert!(vb.to_string().contains("noSuchObject"));
        assert!(vb.value().is_exception());
    }

    #[test]
    fn test_octet_string_display_is_hex() {
        let value = RawValue::from("ab");
        assert_eq!(value.to_string(), "OCTET STRING 6162");
    }

    #[test]
    fn test_varbind_null_constructor() {
        let vb = VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));
        assert_eq!(vb.oid(), &oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));
        assert_eq!(vb.value, RawValue::Null);
        assert!(!vb.value.is_exception());
    }
}
