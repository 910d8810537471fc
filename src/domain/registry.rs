//! In-memory registry of the boats in the marina.
//!
//! The [`Registry`] knows nothing about the filesystem. It keeps its boats in
//! a vector sorted by case-insensitive name, so lookups are a binary search
//! and removal is a shift that leaves no gaps.

use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Boat,
    billing::{self, PaymentError},
    name::compare_names,
};

/// The most boats the marina can hold.
pub const CAPACITY: usize = 120;

/// The set of boats in the marina, sorted by name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    boats: Vec<Boat>,
}

/// Errors that can occur when adding a boat.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InsertError {
    /// The registry already holds [`CAPACITY`] boats.
    #[error("120 boats are already in the marina. No new boats can be added.")]
    Full,

    /// A boat with the same name (ignoring case) is already registered.
    #[error("A boat named {0} already exists. Boat not added.")]
    Duplicate(String),

    /// The record could not be parsed into a boat.
    #[error("{0}. Boat not added.")]
    Invalid(#[from] crate::domain::BoatError),
}

/// The named boat is not in the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("There is no boat named {0} in the database.")]
pub struct NotFound(pub String);

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary search for `name`, ignoring case.
    ///
    /// Returns the boat's index in [`Registry::list`] order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.boats
            .binary_search_by(|boat| compare_names(boat.name(), name))
            .ok()
    }

    /// Looks up a boat by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Boat> {
        self.find(name).map(|index| &self.boats[index])
    }

    /// Looks up a boat by name for billing.
    ///
    /// A boat's name cannot be changed through the returned reference, so the
    /// registry stays sorted.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Boat> {
        self.find(name).map(|index| &mut self.boats[index])
    }

    /// Adds a boat, keeping the registry sorted.
    ///
    /// Returns a reference to the boat in its new position.
    ///
    /// # Errors
    ///
    /// - [`InsertError::Full`] if the registry already holds [`CAPACITY`] boats
    /// - [`InsertError::Duplicate`] if the name is already taken, ignoring case
    #[instrument(level = "debug", skip_all, fields(name = %boat.name()))]
    pub fn insert(&mut self, boat: Boat) -> Result<&Boat, InsertError> {
        if self.is_full() {
            return Err(InsertError::Full);
        }
        match self
            .boats
            .binary_search_by(|existing| existing.name().cmp(boat.name()))
        {
            Ok(_) => Err(InsertError::Duplicate(boat.name().to_string())),
            Err(position) => {
                self.boats.insert(position, boat);
                Ok(&self.boats[position])
            }
        }
    }

    /// Parses a record and adds the resulting boat.
    ///
    /// A full registry is reported before the record is even parsed.
    ///
    /// # Errors
    ///
    /// See [`Registry::insert`]. Parse failures are returned as
    /// [`InsertError::Invalid`].
    pub fn add_record(&mut self, record: &str) -> Result<&Boat, InsertError> {
        if self.is_full() {
            return Err(InsertError::Full);
        }
        let boat = Boat::parse_record(record)?;
        self.insert(boat)
    }

    /// Removes a boat by name, shifting later boats down to close the gap.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no boat has that name.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, name: &str) -> Result<Boat, NotFound> {
        let index = self.find(name).ok_or_else(|| NotFound(name.to_string()))?;
        Ok(self.boats.remove(index))
    }

    /// Applies a payment to the named boat.
    ///
    /// Returns the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NotFound`] if no boat has that name, otherwise
    /// see [`billing::apply_payment`].
    pub fn pay(&mut self, name: &str, amount: f64) -> Result<f64, PaymentError> {
        let boat = self
            .get_mut(name)
            .ok_or_else(|| PaymentError::NotFound(name.to_string()))?;
        billing::apply_payment(boat, amount)
    }

    /// The boats in name order.
    #[must_use]
    pub fn list(&self) -> &[Boat] {
        &self.boats
    }

    /// Iterates over the boats in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Boat> {
        self.boats.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Boat> {
        self.boats.iter_mut()
    }

    /// The number of boats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boats.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Whether the registry has reached [`CAPACITY`].
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.boats.len() >= CAPACITY
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Boat;
    type IntoIter = std::slice::Iter<'a, Boat>;

    fn into_iter(self) -> Self::IntoIter {
        self.boats.iter()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn boat(name: &str) -> Boat {
        format!("{name},20,slip,1,0").parse().unwrap()
    }

    fn names(registry: &Registry) -> Vec<&str> {
        registry.iter().map(|boat| boat.name().as_str()).collect()
    }

    fn assert_sorted(registry: &Registry) {
        assert!(
            registry
                .list()
                .windows(2)
                .all(|pair| compare_names(pair[0].name(), pair[1].name()).is_lt()),
            "registry not sorted: {:?}",
            names(registry)
        );
    }

    #[test]
    fn insert_keeps_name_order() {
        let mut registry = Registry::new();
        for name in ["pelican", "Albatross", "gull", "Tern", "cormorant"] {
            registry.insert(boat(name)).unwrap();
            assert_sorted(&registry);
        }
        assert_eq!(
            names(&registry),
            ["Albatross", "cormorant", "gull", "pelican", "Tern"]
        );
    }

    /// Applies `+name` (insert) and `-name` (remove) steps, checking after
    /// every step that the order holds and that each boat is found where it
    /// sits.
    #[test_case(&["+m", "+c", "-m", "+x", "+a", "-c", "+C"], &["a", "C", "x"]; "interleaved")]
    #[test_case(&["+Zed", "+yak", "+Xi", "-yak", "-Zed", "+wren", "+YAK"], &["wren", "Xi", "YAK"]; "mixed case")]
    #[test_case(&["+b", "+a", "+c", "-a", "-b", "-c", "+b"], &["b"]; "drain and refill")]
    #[test_case(&["+d", "+b", "+f", "-b", "-f", "+a", "+e", "+c", "-d"], &["a", "c", "e"]; "remove at both ends")]
    fn order_holds_through_inserts_and_removes(steps: &[&str], expected: &[&str]) {
        let mut registry = Registry::new();
        for step in steps {
            let (op, name) = step.split_at(1);
            if op == "+" {
                registry.insert(boat(name)).unwrap();
            } else {
                registry.remove(name).unwrap();
                assert_eq!(registry.find(name), None, "{name} still found after removal");
            }

            assert_sorted(&registry);
            for (index, boat) in registry.iter().enumerate() {
                assert_eq!(registry.find(boat.name()), Some(index), "after {step}");
            }
        }
        assert_eq!(names(&registry), expected);
    }

    #[test]
    fn duplicate_names_are_rejected_ignoring_case() {
        let mut registry = Registry::new();
        registry.insert(boat("Sea Breeze")).unwrap();
        let before = registry.clone();

        assert_eq!(
            registry.insert(boat("SEA BREEZE")),
            Err(InsertError::Duplicate("SEA BREEZE".to_string()))
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn find_locates_every_present_name() {
        let mut registry = Registry::new();
        let inserted = ["delta", "Alpha", "echo", "Charlie", "bravo", "foxtrot"];
        for name in inserted {
            registry.insert(boat(name)).unwrap();
        }
        registry.remove("echo").unwrap();

        for (index, boat) in registry.iter().enumerate() {
            assert_eq!(registry.find(boat.name()), Some(index));
            assert_eq!(registry.find(&boat.name().to_uppercase()), Some(index));
        }
        assert_eq!(registry.find("echo"), None);
        assert_eq!(registry.find("golf"), None);
    }

    #[test]
    fn remove_compacts_and_preserves_order() {
        let mut registry = Registry::new();
        for name in ["a", "b", "c", "d"] {
            registry.insert(boat(name)).unwrap();
        }

        let removed = registry.remove("B").unwrap();
        assert_eq!(removed.name().as_str(), "b");
        assert_eq!(names(&registry), ["a", "c", "d"]);
        assert_sorted(&registry);

        assert_eq!(registry.remove("b"), Err(NotFound("b".to_string())));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut registry = Registry::new();
        for i in 0..CAPACITY {
            registry.insert(boat(&format!("boat{i:03}"))).unwrap();
        }
        assert!(registry.is_full());
        assert_eq!(registry.insert(boat("one-too-many")), Err(InsertError::Full));
        assert_eq!(registry.add_record("garbage"), Err(InsertError::Full));
        assert_eq!(registry.len(), CAPACITY);

        registry.remove("boat000").unwrap();
        assert!(registry.insert(boat("one-too-many")).is_ok());
    }

    #[test]
    fn add_record_validates_before_inserting() {
        let mut registry = Registry::new();
        let added = registry.add_record("Highlander,44,slip,14,50000.00").unwrap();
        assert_eq!(added.name().as_str(), "Highlander");

        assert!(matches!(
            registry.add_record("Broken,44,slip,99,0"),
            Err(InsertError::Invalid(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn pay_reports_missing_boats() {
        let mut registry = Registry::new();
        registry.add_record("Payer,10,land,C,100").unwrap();

        assert_eq!(
            registry.pay("nobody", 5.0),
            Err(PaymentError::NotFound("nobody".to_string()))
        );
        assert_eq!(registry.pay("payer", 100.0), Ok(0.0));
    }
}
