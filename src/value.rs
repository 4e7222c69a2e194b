//! Decoded, application-level values.
//!
//! A [`Value`] is what a [`Syntax`](crate::syntax::Syntax) produces from a
//! [`RawValue`](crate::varbind::RawValue) or from a table index suffix.
//! Values are immutable and comparable.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;

use bytes::Bytes;

use crate::oid::Oid;

/// Decoded SNMP value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Value {
    /// Signed integer.
    Integer(i32),
    /// Enumerated integer, with its label when the syntax knows it.
    Enum(EnumValue),
    /// Monotonic counter (Counter32 or Counter64).
    Counter(u64),
    /// Gauge32 / Unsigned32.
    Gauge(u32),
    /// Elapsed time from TimeTicks.
    TimeTicks(Duration),
    /// Uninterpreted octets.
    Bytes(Bytes),
    /// Textual octets (DisplayString).
    String(String),
    /// Object identifier.
    ObjectIdentifier(Oid),
    /// IPv4 address.
    IpAddress(Ipv4Addr),
    /// 802 MAC address.
    MacAddress(MacAddress),
    /// The agent has no such object.
    NoSuchObject,
    /// The agent has the object but not this instance.
    NoSuchInstance,
}

impl Value {
    /// Returns true for the `NoSuchObject` / `NoSuchInstance` markers.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NoSuchObject | Self::NoSuchInstance)
    }

    /// Integer content of `Integer` and `Enum` values.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Enum(e) => Some(e.value),
            _ => None,
        }
    }

    /// Unsigned content of `Counter` and `Gauge` values.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Counter(v) => Some(*v),
            Self::Gauge(v) => Some(u64::from(*v)),
            _ => None,
        }
    }

    /// String content of `String` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Enum(e) => write!(f, "{}", e),
            Self::Counter(v) => write!(f, "{}", v),
            Self::Gauge(v) => write!(f, "{}", v),
            Self::TimeTicks(d) => write!(f, "{:?}", d),
            Self::Bytes(data) => {
                for (i, byte) in data.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Self::String(s) => write!(f, "{}", s),
            Self::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Self::IpAddress(addr) => write!(f, "{}", addr),
            Self::MacAddress(mac) => write!(f, "{}", mac),
            Self::NoSuchObject => write!(f, "noSuchObject"),
            Self::NoSuchInstance => write!(f, "noSuchInstance"),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<MacAddress> for Value {
    fn from(value: MacAddress) -> Self {
        Self::MacAddress(value)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(value: Ipv4Addr) -> Self {
        Self::IpAddress(value)
    }
}

/// An enumerated INTEGER value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Wire value.
    pub value: i32,
    /// Label from the enumeration, if the value is a known member.
    pub name: Option<&'static str>,
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{}({})", name, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// 802 MAC address, formatted as `00:11:22:33:44:55`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Build from a byte slice, which must be exactly 6 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; 6] = bytes.try_into().ok()?;
        Some(Self(octets))
    }

    /// The six octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

/// Error parsing a MAC address from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid MAC address: {0:?}")]
pub struct ParseMacAddressError(String);

impl FromStr for MacAddress {
    type Err = ParseMacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .filter(|p| !p.is_empty() && p.len() <= 2)
                .ok_or_else(|| ParseMacAddressError(s.to_string()))?;
            *octet =
                u8::from_str_radix(part, 16).map_err(|_| ParseMacAddressError(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseMacAddressError(s.to_string()));
        }
        Ok(Self(octets))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Serialize, Serializer};

    use super::{MacAddress, Value};

    impl Serialize for MacAddress {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Integer(v) => serializer.serialize_i32(*v),
                Value::Counter(v) => serializer.serialize_u64(*v),
                Value::Gauge(v) => serializer.serialize_u32(*v),
                Value::TimeTicks(d) => serializer.serialize_f64(d.as_secs_f64()),
                Value::String(s) => serializer.serialize_str(s),
                Value::NoSuchObject | Value::NoSuchInstance => serializer.serialize_none(),
                other => serializer.collect_str(other),
            }
        }
    }
}
