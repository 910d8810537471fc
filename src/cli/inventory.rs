use std::io::{self, Write};

use clap::Parser;
use marina::{Boat, Placement, Registry};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

pub(super) const EMPTY: &str = "No boats in the marina yet. Add one with 'marina <FILE> add'.";

#[derive(Debug, Parser, Default)]
#[command(about = "List the boats in the marina, sorted by name")]
pub struct Inventory {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Inventory {
    #[instrument(level = "debug", skip(registry))]
    pub fn run(self, registry: &Registry) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json => {
                let rows: Vec<Row> = registry.iter().map(Row::from).collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Table => {
                if registry.is_empty() {
                    println!("{}", EMPTY.dim());
                } else {
                    write_table(&mut io::stdout().lock(), registry, is_narrow())?;
                }
            }
        }
        Ok(())
    }
}

/// One boat, as it appears in JSON output.
#[derive(Debug, Serialize)]
struct Row<'a> {
    name: &'a str,
    length: f64,
    place: &'static str,
    detail: String,
    owed: f64,
}

impl<'a> From<&'a Boat> for Row<'a> {
    fn from(boat: &'a Boat) -> Self {
        Self {
            name: boat.name().as_str(),
            length: boat.length(),
            place: boat.location().as_str(),
            detail: boat.placement().detail().to_string(),
            owed: boat.owed(),
        }
    }
}

/// Writes one line per boat, in registry order.
///
/// The wide layout lines up in fixed columns; the narrow layout drops the
/// padding.
pub fn write_table<W: Write>(writer: &mut W, registry: &Registry, narrow: bool) -> io::Result<()> {
    for boat in registry {
        if narrow {
            writeln!(
                writer,
                "{} {:.0}' {} {} ${:.2}",
                boat.name(),
                boat.length(),
                boat.location(),
                boat.placement().detail(),
                boat.owed()
            )?;
        } else {
            writeln!(writer, "{}", table_row(boat))?;
        }
    }
    Ok(())
}

fn table_row(boat: &Boat) -> String {
    let detail = match boat.placement() {
        Placement::Slip(n) | Placement::Storage(n) => format!("  # {n:>2}"),
        Placement::Land(letter) => format!("     {letter}"),
        Placement::Trailor(tag) => format!("{tag:>6}"),
    };
    format!(
        "{:<22}{:>4.0}'{:4}{:<8}{detail}   Owes ${:>7.2}",
        boat.name().as_str(),
        boat.length(),
        "",
        boat.location().as_str(),
        boat.owed()
    )
}
