//! Value syntaxes.
//!
//! A [`Syntax`] governs how an object's wire value is interpreted. Every
//! variant supports two decode paths:
//!
//! - [`Syntax::unpack`] turns a var-bind's [`RawValue`] into a [`Value`],
//!   checking the wire type and shape.
//! - [`Syntax::unpack_index`] decodes the same type from the leading arcs of a
//!   table row index (RFC 2578 Section 7.7) and returns the unconsumed arcs.
//!
//! Index encoding by syntax:
//!
//! | Syntax | Arcs consumed |
//! |--------|---------------|
//! | `Integer`, `Enum`, `Counter32`, `Gauge32`, `Unsigned32`, `TimeTicks` | 1 |
//! | `IpAddress` | 4, each an octet |
//! | `MacAddress` | 6, each an octet (fixed size, no length prefix) |
//! | `OctetString`, `DisplayString` | length `n`, then `n` octets |
//! | `ObjectIdentifier` | length `n`, then `n` arcs |
//! | `Counter64`, `Opaque` | not usable as an index, always fails |

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::value::{EnumValue, MacAddress, Value};
use crate::varbind::{RawValue, VarBind};

/// Members of an enumerated INTEGER, as `(value, label)` pairs.
pub type EnumMembers = &'static [(i32, &'static str)];

/// RFC 2579 TruthValue.
pub const TRUTH_VALUE: EnumMembers = &[(1, "true"), (2, "false")];

/// Syntax of an object: SMIv2 base types plus textual conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Syntax {
    /// INTEGER / Integer32.
    Integer,
    /// Enumerated INTEGER with known labels.
    Enum(EnumMembers),
    /// OCTET STRING, kept as raw bytes.
    OctetString,
    /// DisplayString (RFC 2579), decoded as text.
    DisplayString,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier,
    /// IpAddress.
    IpAddress,
    /// Counter32.
    Counter32,
    /// Counter64.
    Counter64,
    /// Gauge32.
    Gauge32,
    /// Unsigned32 (same wire type as Gauge32).
    Unsigned32,
    /// TimeTicks.
    TimeTicks,
    /// Opaque.
    Opaque,
    /// MacAddress (RFC 2579), an OCTET STRING of exactly 6 bytes.
    MacAddress,
}

impl Syntax {
    /// Decode a var-bind's value.
    ///
    /// `noSuchObject` and `noSuchInstance` decode to the matching [`Value`]
    /// markers under every syntax. Any other wire type or shape mismatch is an
    /// [`Error::Syntax`].
    pub fn unpack(&self, varbind: &VarBind) -> Result<Value> {
        self.unpack_value(varbind.value())
    }

    /// Decode a raw wire value.
    pub fn unpack_value(&self, raw: &RawValue) -> Result<Value> {
        let value = match (self, raw) {
            (_, RawValue::NoSuchObject) => Value::NoSuchObject,
            (_, RawValue::NoSuchInstance) => Value::NoSuchInstance,
            (Self::Integer, RawValue::Integer(v)) => Value::Integer(*v),
            (Self::Enum(members), RawValue::Integer(v)) => Value::Enum(enum_value(members, *v)),
            (Self::OctetString, RawValue::OctetString(data)) => Value::Bytes(data.clone()),
            (Self::DisplayString, RawValue::OctetString(data)) => {
                Value::String(String::from_utf8_lossy(data).into_owned())
            }
            (Self::ObjectIdentifier, RawValue::ObjectIdentifier(oid)) => {
                Value::ObjectIdentifier(oid.clone())
            }
            (Self::IpAddress, RawValue::IpAddress(octets)) => {
                Value::IpAddress(Ipv4Addr::from(*octets))
            }
            (Self::Counter32, RawValue::Counter32(v)) => Value::Counter(u64::from(*v)),
            (Self::Counter64, RawValue::Counter64(v)) => Value::Counter(*v),
            (Self::Gauge32 | Self::Unsigned32, RawValue::Gauge32(v)) => Value::Gauge(*v),
            (Self::TimeTicks, RawValue::TimeTicks(v)) => Value::TimeTicks(ticks(*v)),
            (Self::Opaque, RawValue::Opaque(data)) => Value::Bytes(data.clone()),
            (Self::MacAddress, RawValue::OctetString(data)) => MacAddress::from_slice(data)
                .map(Value::MacAddress)
                .ok_or_else(|| Error::syntax(self, raw))?,
            _ => return Err(Error::syntax(self, raw)),
        };
        Ok(value)
    }

    /// Decode one index component from the front of `index`.
    ///
    /// Returns the decoded value and the arcs left for the next index object.
    /// Fails with [`Error::SyntaxIndex`] when too few arcs remain, an octet arc
    /// exceeds 255, a length prefix overruns the arcs, or the syntax cannot be
    /// used as an index at all.
    pub fn unpack_index<'a>(&self, index: &'a [u32]) -> Result<(Value, &'a [u32])> {
        let invalid = || Error::syntax_index(self, index);

        match self {
            Self::Integer => {
                let (arc, rest) = index.split_first().ok_or_else(invalid)?;
                let v = i32::try_from(*arc).map_err(|_| invalid())?;
                Ok((Value::Integer(v), rest))
            }
            Self::Enum(members) => {
                let (arc, rest) = index.split_first().ok_or_else(invalid)?;
                let v = i32::try_from(*arc).map_err(|_| invalid())?;
                Ok((Value::Enum(enum_value(members, v)), rest))
            }
            Self::Counter32 => {
                let (arc, rest) = index.split_first().ok_or_else(invalid)?;
                Ok((Value::Counter(u64::from(*arc)), rest))
            }
            Self::Gauge32 | Self::Unsigned32 => {
                let (arc, rest) = index.split_first().ok_or_else(invalid)?;
                Ok((Value::Gauge(*arc), rest))
            }
            Self::TimeTicks => {
                let (arc, rest) = index.split_first().ok_or_else(invalid)?;
                Ok((Value::TimeTicks(ticks(*arc)), rest))
            }
            Self::IpAddress => {
                let (arcs, rest) = split_fixed(index, 4).ok_or_else(invalid)?;
                let bytes = octets(arcs).ok_or_else(invalid)?;
                let addr = Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]);
                Ok((Value::IpAddress(addr), rest))
            }
            Self::MacAddress => {
                let (arcs, rest) = split_fixed(index, 6).ok_or_else(invalid)?;
                let mac = octets(arcs)
                    .and_then(|bytes| MacAddress::from_slice(&bytes))
                    .ok_or_else(invalid)?;
                Ok((Value::MacAddress(mac), rest))
            }
            Self::OctetString => {
                let (arcs, rest) = split_length_prefixed(index).ok_or_else(invalid)?;
                let bytes = octets(arcs).ok_or_else(invalid)?;
                Ok((Value::Bytes(Bytes::from(bytes)), rest))
            }
            Self::DisplayString => {
                let (arcs, rest) = split_length_prefixed(index).ok_or_else(invalid)?;
                let bytes = octets(arcs).ok_or_else(invalid)?;
                let text = String::from_utf8_lossy(&bytes).into_owned();
                Ok((Value::String(text), rest))
            }
            Self::ObjectIdentifier => {
                let (arcs, rest) = split_length_prefixed(index).ok_or_else(invalid)?;
                Ok((Value::ObjectIdentifier(Oid::from_slice(arcs)), rest))
            }
            Self::Counter64 | Self::Opaque => Err(invalid()),
        }
    }

    /// Syntax name used in diagnostics and presentation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Enum(_) => "Enum",
            Self::OctetString => "OctetString",
            Self::DisplayString => "DisplayString",
            Self::ObjectIdentifier => "ObjectIdentifier",
            Self::IpAddress => "IpAddress",
            Self::Counter32 => "Counter32",
            Self::Counter64 => "Counter64",
            Self::Gauge32 => "Gauge32",
            Self::Unsigned32 => "Unsigned32",
            Self::TimeTicks => "TimeTicks",
            Self::Opaque => "Opaque",
            Self::MacAddress => "MacAddress",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn enum_value(members: EnumMembers, value: i32) -> EnumValue {
    let name = members
        .iter()
        .find(|(member, _)| *member == value)
        .map(|(_, name)| *name);
    EnumValue { value, name }
}

/// TimeTicks are hundredths of a second.
fn ticks(hundredths: u32) -> Duration {
    Duration::from_millis(u64::from(hundredths) * 10)
}

fn split_fixed(index: &[u32], len: usize) -> Option<(&[u32], &[u32])> {
    (index.len() >= len).then(|| index.split_at(len))
}

fn split_length_prefixed(index: &[u32]) -> Option<(&[u32], &[u32])> {
    let (len, rest) = index.split_first()?;
    split_fixed(rest, usize::try_from(*len).ok()?)
}

fn octets(arcs: &[u32]) -> Option<Vec<u8>> {
    arcs.iter().map(|arc| u8::try_from(*arc).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn vb(value: RawValue) -> VarBind {
        VarBind::new(oid!(1, 3, 6, 1, 2, 1, 17, 1, 1, 0), value)
    }

    const IF_STATUS: EnumMembers = &[(1, "up"), (2, "down"), (3, "testing")];

    #[test]
    fn test_mac_address_unpack() {
        let raw = RawValue::OctetString(Bytes::from_static(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
        let value = Syntax::MacAddress.unpack(&vb(raw)).unwrap();
        assert_eq!(value.to_string(), "00:11:22:33:44:55");
        assert_eq!(
            value,
            Value::MacAddress(MacAddress([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]))
        );
    }

    #[test]
    fn test_mac_address_unpack_wrong_length() {
        for len in [0usize, 5, 7, 8] {
            let raw = RawValue::OctetString(Bytes::from(vec![0xaa; len]));
            let err = Syntax::MacAddress.unpack(&vb(raw)).unwrap_err();
            assert!(matches!(err, Error::Syntax { syntax: Syntax::MacAddress, .. }));
        }
    }

    #[test]
    fn test_mac_address_unpack_wrong_kind() {
        let err = Syntax::MacAddress
            .unpack(&vb(RawValue::Integer(6)))
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { value: RawValue::Integer(6), .. }));

        let err = Syntax::MacAddress
            .unpack(&vb(RawValue::Opaque(Bytes::from_static(&[0; 6]))))
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_exceptions_decode_under_any_syntax() {
        for syntax in [Syntax::Integer, Syntax::MacAddress, Syntax::Counter64] {
            assert_eq!(
                syntax.unpack(&vb(RawValue::NoSuchObject)).unwrap(),
                Value::NoSuchObject
            );
            assert_eq!(
                syntax.unpack(&vb(RawValue::NoSuchInstance)).unwrap(),
                Value::NoSuchInstance
            );
            assert!(syntax.unpack(&vb(RawValue::EndOfMibView)).is_err());
        }
    }

    #[test]
    fn test_unpack_base_types() {
        assert_eq!(
            Syntax::Integer.unpack(&vb(RawValue::Integer(-5))).unwrap(),
            Value::Integer(-5)
        );
        assert_eq!(
            Syntax::DisplayString.unpack(&vb(RawValue::from("eth0"))).unwrap(),
            Value::String("eth0".into())
        );
        assert_eq!(
            Syntax::Counter32
                .unpack(&vb(RawValue::Counter32(7)))
                .unwrap(),
            Value::Counter(7)
        );
        assert_eq!(
            Syntax::Counter64
                .unpack(&vb(RawValue::Counter64(u64::MAX)))
                .unwrap(),
            Value::Counter(u64::MAX)
        );
        assert_eq!(
            Syntax::Unsigned32.unpack(&vb(RawValue::Gauge32(3))).unwrap(),
            Value::Gauge(3)
        );
        assert_eq!(
            Syntax::TimeTicks
                .unpack(&vb(RawValue::TimeTicks(150)))
                .unwrap(),
            Value::TimeTicks(Duration::from_millis(1500))
        );
        assert_eq!(
            Syntax::IpAddress
                .unpack(&vb(RawValue::IpAddress([10, 0, 0, 1])))
                .unwrap(),
            Value::IpAddress(Ipv4Addr::new(10, 0, 0, 1))
        );
        assert_eq!(
            Syntax::ObjectIdentifier
                .unpack(&vb(RawValue::from(oid!(1, 3, 6, 1, 4, 1, 9))))
                .unwrap(),
            Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 9))
        );
    }

    #[test]
    fn test_unpack_type_mismatch() {
        assert!(Syntax::Integer.unpack(&vb(RawValue::Gauge32(1))).is_err());
        assert!(Syntax::Counter32.unpack(&vb(RawValue::Counter64(1))).is_err());
        assert!(Syntax::DisplayString.unpack(&vb(RawValue::Null)).is_err());
        assert!(Syntax::Enum(TRUTH_VALUE).unpack(&vb(RawValue::from("true"))).is_err());
    }

    #[test]
    fn test_unpack_enum_labels() {
        let syntax = Syntax::Enum(IF_STATUS);
        assert_eq!(
            syntax.unpack(&vb(RawValue::Integer(2))).unwrap().to_string(),
            "down(2)"
        );
        let unknown = syntax.unpack(&vb(RawValue::Integer(99))).unwrap();
        assert_eq!(
            unknown,
            Value::Enum(EnumValue {
                value: 99,
                name: None
            })
        );
    }

    #[test]
    fn test_unpack_index_integer() {
        let (value, rest) = Syntax::Integer.unpack_index(&[5, 9]).unwrap();
        assert_eq!(value, Value::Integer(5));
        assert_eq!(rest, &[9]);

        assert!(Syntax::Integer.unpack_index(&[]).is_err());
        assert!(Syntax::Integer.unpack_index(&[u32::MAX]).is_err());
    }

    #[test]
    fn test_unpack_index_ip_address() {
        let (value, rest) = Syntax::IpAddress.unpack_index(&[192, 168, 1, 20, 161]).unwrap();
        assert_eq!(value, Value::IpAddress(Ipv4Addr::new(192, 168, 1, 20)));
        assert_eq!(rest, &[161]);

        let err = Syntax::IpAddress.unpack_index(&[10, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::SyntaxIndex { ref index, .. } if index == &[10, 0, 0]));
        assert!(Syntax::IpAddress.unpack_index(&[10, 0, 0, 256]).is_err());
    }

    #[test]
    fn test_unpack_index_mac_address() {
        let (value, rest) = Syntax::MacAddress
            .unpack_index(&[0, 17, 34, 51, 68, 85])
            .unwrap();
        assert_eq!(value.to_string(), "00:11:22:33:44:55");
        assert!(rest.is_empty());

        assert!(Syntax::MacAddress.unpack_index(&[0, 17, 34, 51, 68]).is_err());
        assert!(Syntax::MacAddress.unpack_index(&[0, 17, 34, 51, 68, 300]).is_err());
    }

    #[test]
    fn test_unpack_index_length_prefixed_string() {
        let (value, rest) = Syntax::DisplayString
            .unpack_index(&[4, 101, 116, 104, 48, 1])
            .unwrap();
        assert_eq!(value, Value::String("eth0".into()));
        assert_eq!(rest, &[1]);

        let (value, rest) = Syntax::OctetString.unpack_index(&[0]).unwrap();
        assert_eq!(value, Value::Bytes(Bytes::new()));
        assert!(rest.is_empty());

        // Length prefix overruns the remaining arcs
        assert!(Syntax::OctetString.unpack_index(&[3, 1, 2]).is_err());
        assert!(Syntax::OctetString.unpack_index(&[]).is_err());
    }

    #[test]
    fn test_unpack_index_object_identifier() {
        let (value, rest) = Syntax::ObjectIdentifier
            .unpack_index(&[3, 1, 3, 6, 42])
            .unwrap();
        assert_eq!(value, Value::ObjectIdentifier(oid!(1, 3, 6)));
        assert_eq!(rest, &[42]);
    }

    #[test]
    fn test_unpack_index_unsupported() {
        for syntax in [Syntax::Counter64, Syntax::Opaque] {
            let err = syntax.unpack_index(&[1, 2, 3]).unwrap_err();
            assert!(matches!(err, Error::SyntaxIndex { .. }));
        }
    }

    #[test]
    fn test_unpack_index_enum() {
        let (value, rest) = Syntax::Enum(TRUTH_VALUE).unpack_index(&[1]).unwrap();
        assert_eq!(value.to_string(), "true(1)");
        assert!(rest.is_empty());
    }
}
