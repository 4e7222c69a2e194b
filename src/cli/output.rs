//! Output formatting for the CLI.
//!
//! Supports human-readable and JSON output.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::index::{MibIndex, ObjectIndex, TableIndex};
use crate::registry::{Member, Registry};

/// Result of resolving a name or OID against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub input: String,
    pub oid: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableIndex>,
    /// Index arcs below the matched object or table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Resolved {
    /// Resolve `input` (dotted OID, `MIB::name` or `MIB::name.suffix`).
    pub fn new(registry: &Registry, input: &str) -> Result<Self> {
        let oid = registry.parse_oid(input)?;
        let mut resolved = Self {
            input: input.to_string(),
            oid: oid.to_string(),
            name: registry.format_oid(&oid),
            object: None,
            table: None,
            instance: None,
        };

        if let Some((member, rest)) = registry.lookup_oid(&oid) {
            match member {
                Member::Object(object) => resolved.object = Some(ObjectIndex::new(object)),
                Member::Table(table) => resolved.table = Some(TableIndex::new(table)),
            }
            if !rest.is_empty() {
                resolved.instance = Some(crate::oid::Oid::from_slice(rest).to_string());
            }
        }

        Ok(resolved)
    }
}

/// Write the registry index to stdout.
pub fn write_index(format: OutputFormat, index: &[MibIndex]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Human => write_index_human(&mut stdout, index),
        OutputFormat::Json => write_json(&mut stdout, &index),
    }
}

/// Write resolution results to stdout.
pub fn write_resolved(format: OutputFormat, resolved: &[Resolved]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Human => {
            for r in resolved {
                write_resolved_human(&mut stdout, r)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(&mut stdout, &resolved),
    }
}

/// Write an error to stderr.
pub fn write_error(err: &dyn std::error::Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  caused by: {}", cause);
        source = cause.source();
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::other)?;
    writeln!(w)
}

fn write_index_human<W: Write>(w: &mut W, index: &[MibIndex]) -> io::Result<()> {
    for mib in index {
        writeln!(w, "{} ({})", mib.id, mib.oid)?;
        for object in &mib.objects {
            writeln!(w, "  {:<40} {:<28} {}", object.id, object.oid, object.syntax)?;
        }
        for table in &mib.tables {
            writeln!(w, "  {:<40} {}", table.id, table.oid)?;
            writeln!(w, "    index: {}", table.index_keys.join(", "))?;
            writeln!(w, "    entry: {}", table.entry_keys.join(", "))?;
        }
    }
    Ok(())
}

fn write_resolved_human<W: Write>(w: &mut W, resolved: &Resolved) -> io::Result<()> {
    writeln!(w, "{} = {}", resolved.name, resolved.oid)?;
    if let Some(object) = &resolved.object {
        writeln!(w, "  object: {} ({})", object.id, object.syntax)?;
    }
    if let Some(table) = &resolved.table {
        writeln!(w, "  table:  {}", table.id)?;
        writeln!(w, "  index:  {}", table.index_keys.join(", "))?;
    }
    if let Some(instance) = &resolved.instance {
        writeln!(w, "  instance: {}", instance)?;
    }
    Ok(())
}
