//! Domain models for marina management.
//!
//! This module contains the core domain types: boats and their placements,
//! the sorted boat registry, billing, and configuration.

/// Boat records and the record parser.
pub mod boat;
pub use boat::{Boat, BoatError};

pub mod billing;
pub use billing::{InvalidRate, PaymentError, Rates};

mod config;
pub use config::Config;

pub mod location;
pub use location::{DetailError, Location, Placement};

/// Boat names, the registry key.
pub mod name;
pub use name::{BoatName, InvalidNameError};

pub mod registry;
pub use registry::{CAPACITY, InsertError, NotFound, Registry};
