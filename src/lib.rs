// The Error enum carries OIDs and raw values inline for diagnostics.
#![allow(clippy::result_large_err)]

//! # snmp-mibs
//!
//! MIB registry, value syntaxes and table decoding for SNMP polling.
//!
//! The crate turns the var-binds returned by an SNMP session into typed
//! [`Value`]s and structured table rows, and sequences the requests needed to
//! probe, read and walk a remote agent. The session itself is any type
//! implementing [`Transport`].
//!
//! ## Layers
//!
//! - [`Oid`] arithmetic: containment and index suffixes.
//! - [`Syntax`]: decodes wire values and table index arcs into [`Value`]s.
//! - [`registry`]: named [`Mib`](registry::Mib)s of objects and tables, frozen
//!   after construction.
//! - [`Table::map`](registry::Table::map): groups a walk batch into rows.
//! - [`Client`]: `probe`, `probe_many`, `get_object` and `walk_table` over a
//!   transport.
//!
//! ## Decoding a table batch
//!
//! ```
//! use snmp_mibs::{VarBind, oid, registry};
//! use snmp_mibs::registry::IdKey;
//!
//! let table = registry::global().unwrap().resolve_table("IF-MIB::ifTable").unwrap();
//! let batch = [
//!     VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3), "eth0"),
//!     VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 8, 3), 1),
//! ];
//!
//! let rows = table.map(&batch).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].index[&IdKey::new("IF-MIB", "ifIndex")].to_string(), "3");
//! assert_eq!(rows[0].entry[&IdKey::new("IF-MIB", "ifOperStatus")].to_string(), "up(1)");
//! ```
//!
//! ## Features
//!
//! - `testing`: in-memory [`MockAgent`](transport::MockAgent) transport.
//! - `serde`: `Serialize` for [`index`] snapshots and values.
//! - `cli`: the `snmp-mibs` binary.

pub mod client;
pub mod error;
pub mod index;
pub mod mibs;
pub mod oid;
pub mod prelude;
pub mod registry;
pub mod syntax;
pub mod transport;
pub mod value;
pub mod varbind;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{Error, ErrorStatus, Result};
pub use oid::Oid;
pub use registry::{Id, IdKey, Object, Registry, Table};
pub use syntax::Syntax;
pub use transport::Transport;
pub use value::{MacAddress, Value};
pub use varbind::{RawValue, VarBind};
