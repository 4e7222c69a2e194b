//! snmp-mibs: Inspect the built-in MIB registry.
//!
//! Part of the snmp-mibs CLI utilities.

use clap::{Parser, Subcommand};
use snmp_mibs::cli::args::OutputArgs;
use snmp_mibs::cli::output::{Resolved, write_error, write_index, write_resolved};
use snmp_mibs::registry;
use std::process::ExitCode;

/// List and resolve MIB objects and tables.
#[derive(Debug, Parser)]
#[command(name = "snmp-mibs", version, about)]
struct Args {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every registered MIB with its objects and tables.
    List {
        /// Only show these MIBs.
        #[arg(value_name = "MIB")]
        mibs: Vec<String>,
    },
    /// Resolve names (MIB::name, MIB::name.index) or dotted OIDs.
    Resolve {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.output.init_tracing();

    let registry = match registry::global() {
        Ok(registry) => registry,
        Err(e) => {
            write_error(&e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(snmp.mibs = registry.len(), "registry loaded");

    let result = match &args.command {
        Command::List { mibs } => {
            let mut index = snmp_mibs::index::build(registry);
            if !mibs.is_empty() {
                for name in mibs {
                    if let Err(e) = registry.mib(name) {
                        write_error(&e);
                        return ExitCode::FAILURE;
                    }
                }
                index.retain(|mib| mibs.contains(&mib.id));
            }
            write_index(args.output.format, &index)
        }
        Command::Resolve { names } => {
            let resolved: Result<Vec<_>, _> =
                names.iter().map(|name| Resolved::new(registry, name)).collect();
            match resolved {
                Ok(resolved) => write_resolved(args.output.format, &resolved),
                Err(e) => {
                    write_error(&e);
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}
