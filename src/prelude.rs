//! Prelude module for convenient imports.
//!
//! ```rust
//! use snmp_mibs::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Client`], [`Oid`], [`Value`], [`VarBind`], [`Syntax`]
//! - Registry types: [`Registry`], [`Object`], [`Table`], [`IdKey`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`Transport`] trait
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::client::Client;
pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::registry::{IdKey, Object, Registry, Table};
pub use crate::syntax::Syntax;
pub use crate::transport::Transport;
pub use crate::value::Value;
pub use crate::varbind::VarBind;

#[doc(no_inline)]
pub use crate::oid;
