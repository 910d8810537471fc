//! Marina Management
//!
//! Boats are tracked in a sorted, capacity-limited registry that is loaded
//! from and saved to a flat CSV inventory file.

pub mod domain;
pub use domain::{
    Boat, BoatError, BoatName, Config, InsertError, InvalidRate, Location, NotFound, PaymentError,
    Placement, Rates, Registry,
};

/// Reading and writing the inventory file.
pub mod storage;
pub use storage::{Loaded, SkippedLine};
