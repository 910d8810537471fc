//! The inventory file.
//!
//! One boat per line, no header, no escaping:
//!
//! ```text
//! name,length,place,detail,owed
//! Highlander,44,slip,14,50000.00
//! ```
//!
//! Length is written with no decimal places and the balance with exactly two.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{Boat, InsertError, Registry};

/// The result of loading an inventory file.
#[derive(Debug, Default)]
pub struct Loaded {
    /// The boats that were accepted, sorted by name.
    pub registry: Registry,
    /// Lines that were rejected.
    pub skipped: Vec<SkippedLine>,
    /// Whether reading stopped early because the marina was full.
    pub truncated: bool,
}

/// A line of the inventory file that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub number: usize,
    /// The offending text.
    pub line: String,
    /// Why it was skipped.
    pub reason: InsertError,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping malformed line {}: {} ({})",
            self.number, self.line, self.reason
        )
    }
}

/// I/O failures reading or writing the inventory file.
///
/// These are unrecoverable: the caller should stop rather than continue with
/// data it cannot persist.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened for reading.
    #[error("Issue opening file {}: {source}", .path.display())]
    Open {
        /// The inventory path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Reading from the file failed part way through.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// The inventory path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file could not be created or truncated for writing.
    #[error("Could not open {} to save changes: {source}", .path.display())]
    Create {
        /// The inventory path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// Writing, flushing or closing the file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// The inventory path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// Loads the inventory file at `path`.
///
/// Bad lines are skipped and reported in [`Loaded::skipped`]. Once the
/// registry is full, any further line ends the load with
/// [`Loaded::truncated`] set.
///
/// # Errors
///
/// Returns an [`Error`] if the file cannot be opened or read.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<Loaded, Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = read(&mut BufReader::new(file)).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        boats = loaded.registry.len(),
        skipped = loaded.skipped.len(),
        "loaded {}",
        path.display()
    );
    Ok(loaded)
}

/// Reads inventory records from `reader`.
///
/// # Errors
///
/// Returns an error only if the underlying reader fails. Invalid content is
/// reported through [`Loaded::skipped`].
pub fn read<R: BufRead>(reader: &mut R) -> io::Result<Loaded> {
    let mut loaded = Loaded::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        if loaded.registry.is_full() {
            tracing::debug!("Marina is full; ignoring the rest of the file");
            loaded.truncated = true;
            break;
        }

        let result = Boat::parse_record(line)
            .map_err(InsertError::from)
            .and_then(|boat| loaded.registry.insert(boat).map(|_| ()));
        if let Err(reason) = result {
            let skipped = SkippedLine {
                number: index + 1,
                line: line.to_string(),
                reason,
            };
            tracing::debug!("{skipped}");
            loaded.skipped.push(skipped);
        }
    }

    Ok(loaded)
}

/// Overwrites the inventory file at `path` with the contents of `registry`.
///
/// # Errors
///
/// Returns an [`Error`] if the file cannot be created, written, flushed or
/// synced to disk.
#[instrument(level = "debug", skip(registry))]
pub fn save(path: &Path, registry: &Registry) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    write(&mut writer, registry).map_err(write_error)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_error(e.into_error()))?;
    file.sync_all().map_err(write_error)?;

    tracing::info!(boats = registry.len(), "saved {}", path.display());
    Ok(())
}

/// Writes every boat in `registry`, in order, one record per line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write<W: Write>(writer: &mut W, registry: &Registry) -> io::Result<()> {
    for boat in registry {
        writeln!(writer, "{}", format_record(boat))?;
    }
    writer.flush()
}

/// Formats `boat` as an inventory record, without the trailing newline.
#[must_use]
pub fn format_record(boat: &Boat) -> String {
    format!(
        "{},{:.0},{},{},{:.2}",
        boat.name(),
        boat.length(),
        boat.location(),
        boat.placement().detail(),
        boat.owed()
    )
}
