use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod inventory;
mod menu;
mod terminal;

use clap::ArgAction;
use inventory::Inventory;
use marina::{Config, Loaded, Location, Registry, domain::billing, storage};
use menu::Menu;
use terminal::Colorize;
use tracing::instrument;

/// Name of the configuration file looked for next to the inventory.
const DEFAULT_CONFIG_FILE: &str = "marina.toml";

const TRUNCATED: &str = "Marina is full. Only the first 120 boats were loaded.";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file.
    ///
    /// Defaults to 'marina.toml' in the same directory as the inventory file,
    /// if it exists.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// The CSV inventory file
    inventory: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&self.inventory));
        let config = load_config(&config_path, self.config.is_some())?;

        self.command
            .unwrap_or(Command::Menu)
            .run(&self.inventory, &config, &config_path)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn default_config_path(inventory: &Path) -> PathBuf {
    inventory
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_CONFIG_FILE)
}

/// Loads the configuration.
///
/// An explicitly requested file must load. The default file is optional, and
/// defaults are used if it is missing or broken.
fn load_config(path: &Path, explicit: bool) -> anyhow::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        Err(e) if explicit => Err(anyhow::anyhow!("{e}")),
        Err(e) => {
            tracing::debug!("Failed to load config: {e}");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu,

    /// List the boats in the marina
    Inventory(Inventory),

    /// Add a boat from a CSV record
    Add(Add),

    /// Remove a boat by name
    Remove(Remove),

    /// Record a payment against a boat
    Pay(Pay),

    /// Add one month's charges to every boat
    Month,

    /// Show or write the configuration
    Config(ConfigCommand),
}

impl Command {
    fn run(self, inventory: &Path, config: &Config, config_path: &Path) -> anyhow::Result<()> {
        let rates = config.rates();
        match self {
            Self::Config(command) => command.run(config, config_path),
            Self::Menu => with_registry(inventory, |registry| {
                let stdin = io::stdin();
                Menu::new(stdin.lock(), io::stdout(), registry, rates)
                    .narrow(terminal::is_narrow())
                    .run()?;
                Ok(true)
            }),
            Self::Inventory(command) => with_registry(inventory, |registry| {
                command.run(registry)?;
                Ok(false)
            }),
            Self::Add(command) => with_registry(inventory, |registry| command.run(registry)),
            Self::Remove(command) => with_registry(inventory, |registry| command.run(registry)),
            Self::Pay(command) => with_registry(inventory, |registry| command.run(registry)),
            Self::Month => with_registry(inventory, |registry| {
                billing::apply_monthly_charges(registry, rates);
                println!("{}", menu::MONTH_APPLIED.success());
                Ok(true)
            }),
        }
    }
}

/// Loads the inventory, runs `f` against it, and saves it again if `f`
/// returns `true`.
///
/// Failing to load or save ends the command with an error; nothing is saved
/// if `f` fails.
fn with_registry<F>(inventory: &Path, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut Registry) -> anyhow::Result<bool>,
{
    let loaded = storage::load(inventory)?;
    report_load(&mut io::stderr().lock(), &loaded)?;

    let mut registry = loaded.registry;
    if f(&mut registry)? {
        storage::save(inventory, &registry)?;
    }
    Ok(())
}

/// Writes the lines that were skipped while loading, and whether the file
/// was cut short.
fn report_load<W: Write>(writer: &mut W, loaded: &Loaded) -> io::Result<()> {
    for skipped in &loaded.skipped {
        writeln!(writer, "{}", skipped.to_string().warning())?;
    }
    if loaded.truncated {
        writeln!(writer, "{}", TRUNCATED.warning())?;
    }
    Ok(())
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The boat in inventory format: name,length,place,detail,owed
    ///
    /// For example: 'Highlander,44,slip,14,50000.00'
    record: String,
}

impl Add {
    #[instrument(skip(registry))]
    fn run(self, registry: &mut Registry) -> anyhow::Result<bool> {
        registry.add_record(&self.record)?;
        println!("{}", menu::BOAT_ADDED.success());
        Ok(true)
    }
}

#[derive(Debug, clap::Parser)]
pub struct Remove {
    /// The name of the boat (case-insensitive)
    name: String,
}

impl Remove {
    #[instrument(skip(registry))]
    fn run(self, registry: &mut Registry) -> anyhow::Result<bool> {
        let boat = registry
            .remove(&self.name)
            .map_err(|e| anyhow::anyhow!("{e} No boats deleted."))?;
        println!(
            "{}",
            format!("Successfully deleted {} from database!", boat.name()).success()
        );
        Ok(true)
    }
}

#[derive(Debug, clap::Parser)]
pub struct Pay {
    /// The name of the boat (case-insensitive)
    name: String,

    /// The amount to pay, in dollars
    #[arg(allow_negative_numbers = true)]
    amount: f64,
}

impl Pay {
    #[instrument(skip(registry))]
    fn run(self, registry: &mut Registry) -> anyhow::Result<bool> {
        let remaining = registry.pay(&self.name, self.amount)?;
        println!(
            "{}",
            format!("Amount ${:.2} paid. ${remaining:.2} still owed.", self.amount).success()
        );
        Ok(true)
    }
}

#[derive(Debug, clap::Parser)]
pub struct ConfigCommand {
    /// Write the effective configuration to the config file
    #[arg(long)]
    write: bool,
}

impl ConfigCommand {
    #[instrument(skip(config))]
    fn run(self, config: &Config, path: &Path) -> anyhow::Result<()> {
        if self.write {
            config.save(path).map_err(|e| anyhow::anyhow!("{e}"))?;
            println!(
                "{}",
                format!("Wrote configuration to {}", path.display()).success()
            );
            return Ok(());
        }

        let rates = config.rates();
        println!("Monthly rates (per foot)");
        println!("{}", "────────────────────────".dim());
        for location in Location::ALL {
            println!("{:<8} ${:>6.2}", location.as_str(), rates.rate(location));
        }
        Ok(())
    }
}
