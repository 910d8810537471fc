//! The interactive menu.
//!
//! A thin loop that reads a one-letter choice, prompts for whatever that
//! choice needs, and reports the registry's answer. All state changes go
//! through [`Registry`] and [`billing`].

use std::io::{self, BufRead, Write};

use marina::{Rates, Registry, domain::billing};

use super::{inventory, terminal::Colorize};

pub(super) const BOAT_ADDED: &str = "Boat successfully added!";
pub(super) const MONTH_APPLIED: &str = "Amounts owed have been updated for the new month.";

const PROMPT: &str = "(I)nventory, (A)dd, (R)emove, (P)ayment, (M)onth, e(X)it : ";

/// The interactive session over one registry.
pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    registry: &'a mut Registry,
    rates: &'a Rates,
    narrow: bool,
}

/// A single menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Inventory,
    Add,
    Remove,
    Payment,
    Month,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        let choice = match chars.next()?.to_ascii_uppercase() {
            'I' => Self::Inventory,
            'A' => Self::Add,
            'R' => Self::Remove,
            'P' => Self::Payment,
            'M' => Self::Month,
            'X' => Self::Exit,
            _ => return None,
        };
        chars.next().is_none().then_some(choice)
    }
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, output: W, registry: &'a mut Registry, rates: &'a Rates) -> Self {
        Self {
            input,
            output,
            registry,
            rates,
            narrow: false,
        }
    }

    /// Use the compact inventory layout.
    pub const fn narrow(mut self, narrow: bool) -> Self {
        self.narrow = narrow;
        self
    }

    /// Runs until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "Welcome to the Boat Management System".info())?;
        writeln!(self.output, "-------------------------------------")?;

        loop {
            let Some(line) = self.prompt(PROMPT)? else {
                // End of input behaves like an explicit exit.
                writeln!(self.output)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some(choice) = Choice::parse(&line) else {
                self.error("User did not enter a valid input from the menu.")?;
                continue;
            };
            tracing::debug!(?choice, "menu choice");

            match choice {
                Choice::Inventory => self.inventory()?,
                Choice::Add => self.add()?,
                Choice::Remove => self.remove()?,
                Choice::Payment => self.payment()?,
                Choice::Month => {
                    billing::apply_monthly_charges(self.registry, self.rates);
                    self.success(MONTH_APPLIED)?;
                }
                Choice::Exit => break,
            }
        }

        writeln!(self.output, "Now exiting the Boat Management System.")?;
        self.output.flush()
    }

    fn inventory(&mut self) -> io::Result<()> {
        if self.registry.is_empty() {
            return writeln!(self.output, "{}", inventory::EMPTY.dim());
        }
        inventory::write_table(&mut self.output, self.registry, self.narrow)
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(record) = self.prompt("Please enter the boat data in CSV format: ")? else {
            return self.error("Failed to read input. Boat not added.");
        };
        let added = self.registry.add_record(&record).map(|_| ());
        match added {
            Ok(()) => self.success(BOAT_ADDED),
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn remove(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the name of the boat to remove: ")? else {
            return self.error("Failed to read input. No boats deleted.");
        };
        match self.registry.remove(&name) {
            Ok(boat) => {
                self.success(&format!("Successfully deleted {} from database!", boat.name()))
            }
            Err(e) => self.error(&format!("{e} No boats deleted.")),
        }
    }

    fn payment(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter the boat name: ")? else {
            return self.error("Failed to read input. No payment made.");
        };
        if self.registry.find(&name).is_none() {
            return self.error(&format!(
                "There is no boat named {name} in the database. No payment made."
            ));
        }

        let Some(amount) = self.prompt("Please enter the amount to be paid: ")? else {
            return self.error("Invalid payment amount.");
        };
        let Ok(amount) = amount.trim().parse::<f64>() else {
            return self.error("Invalid payment amount.");
        };

        match self.registry.pay(&name, amount) {
            Ok(_) => self.success(&format!("Amount ${amount:.2} paid.")),
            Err(e) => self.error(&e.to_string()),
        }
    }

    /// Writes `prompt` and reads one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.success())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", format!("ERROR: {message}").warning())
    }
}
