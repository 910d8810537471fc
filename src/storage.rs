//! Persistence for the marina inventory.

pub mod inventory;
pub use inventory::{Loaded, SkippedLine, format_record, load, save};
