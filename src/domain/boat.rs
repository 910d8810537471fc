use std::str::FromStr;

use crate::domain::{
    location::{DetailError, Location, Placement},
    name::{BoatName, InvalidNameError},
};

/// Longest boat the marina accepts.
pub const MAX_LENGTH: f64 = 100.0;

/// A boat in the marina.
///
/// Boats are only created through [`Boat::new`] or by parsing a record with
/// [`Boat::from_str`], so every `Boat` holds a valid length, a non-negative
/// balance and a placement whose detail matches its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Boat {
    name: BoatName,
    length: f64,
    placement: Placement,
    owed: f64,
}

impl Boat {
    /// Creates a boat from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`BoatError::Length`] unless `0 <= length <= 100`, and
    /// [`BoatError::Owed`] if `owed` is negative or not finite.
    pub fn new(
        name: BoatName,
        length: f64,
        placement: Placement,
        owed: f64,
    ) -> Result<Self, BoatError> {
        if !(0.0..=MAX_LENGTH).contains(&length) {
            return Err(BoatError::Length(length));
        }
        if !owed.is_finite() || owed < 0.0 {
            return Err(BoatError::Owed(owed));
        }
        Ok(Self {
            name,
            length,
            placement,
            owed,
        })
    }

    /// Parses one inventory record of the form
    /// `name,length,place,detail,owed`.
    ///
    /// This is the single parse-and-create path, shared by interactive adds
    /// and by loading the inventory file.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoatError`] encountered, checked in field order.
    pub fn parse_record(line: &str) -> Result<Self, BoatError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [name, length, place, detail, owed] = fields[..] else {
            return Err(BoatError::Malformed(fields.len()));
        };

        let length = parse_amount(length)?;
        let owed = parse_amount(owed)?;
        let name = BoatName::try_from(name)?;

        if !(0.0..=MAX_LENGTH).contains(&length) {
            return Err(BoatError::Length(length));
        }
        let location =
            Location::parse(place.trim()).ok_or_else(|| BoatError::Location(place.to_string()))?;
        if owed < 0.0 {
            return Err(BoatError::Owed(owed));
        }
        let placement = Placement::parse(location, detail)?;

        Self::new(name, length, placement, owed)
    }

    /// The boat's name.
    #[must_use]
    pub const fn name(&self) -> &BoatName {
        &self.name
    }

    /// The boat's length in feet.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Where the boat is kept.
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// The location category of the boat.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.placement.location()
    }

    /// The outstanding balance.
    #[must_use]
    pub const fn owed(&self) -> f64 {
        self.owed
    }

    pub(crate) const fn owed_mut(&mut self) -> &mut f64 {
        &mut self.owed
    }
}

impl FromStr for Boat {
    type Err = BoatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_record(s)
    }
}

/// Parses a finite floating-point field, ignoring surrounding whitespace.
fn parse_amount(field: &str) -> Result<f64, BoatError> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| BoatError::NotANumber(field.to_string()))
}

/// Reasons a boat record is rejected.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum BoatError {
    /// The record does not have five fields.
    #[error("expected 5 comma-separated values (name,length,place,detail,owed), found {0} fields")]
    Malformed(usize),

    /// The length or amount owed is not a finite number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// The name is empty or too long.
    #[error(transparent)]
    Name(#[from] InvalidNameError),

    /// The length is outside `0..=100`.
    #[error("invalid length {0}: must be between 0 and 100 feet")]
    Length(f64),

    /// The place is not one of slip, land, trailor or storage.
    #[error("invalid location type '{0}': expected slip, land, trailor or storage")]
    Location(String),

    /// The amount owed is negative.
    #[error("invalid amount owed {0}: cannot be less than 0")]
    Owed(f64),

    /// The detail does not fit the location.
    #[error(transparent)]
    Detail(#[from] DetailError),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn parses_a_slip_record() {
        let boat: Boat = "Highlander,44,slip,14,50000.00".parse().unwrap();
        assert_eq!(boat.name().as_str(), "Highlander");
        assert!((boat.length() - 44.0).abs() < f64::EPSILON);
        assert_eq!(boat.placement(), &Placement::Slip(14));
        assert!((boat.owed() - 50000.0).abs() < f64::EPSILON);
    }

    #[test_case("Brooks,24,land,K,0.00", Placement::Land('K'); "land")]
    #[test_case("Moby,33,TRAILOR,MOBY1,10.50", Placement::Trailor("MOBY1".to_string()); "trailor")]
    #[test_case("Ark,12, Storage ,50,1", Placement::Storage(50); "storage with padded place")]
    fn parses_each_location(line: &str, expected: Placement) {
        let boat = Boat::parse_record(line).unwrap();
        assert_eq!(boat.placement(), &expected);
    }

    #[test_case("0", true; "zero length")]
    #[test_case("100", true; "maximum length")]
    #[test_case("100.01", false; "just over maximum")]
    #[test_case("-1", false; "negative length")]
    fn length_bounds(length: &str, valid: bool) {
        let line = format!("Dinghy,{length},slip,1,0");
        assert_eq!(Boat::parse_record(&line).is_ok(), valid);
    }

    #[test_case("Only,three,fields", BoatError::Malformed(3); "too few fields")]
    #[test_case("A,1,slip,1,0,extra", BoatError::Malformed(6); "too many fields")]
    #[test_case("A,long,slip,1,0", BoatError::NotANumber("long".to_string()); "length not a number")]
    #[test_case("A,10,slip,1,lots", BoatError::NotANumber("lots".to_string()); "owed not a number")]
    #[test_case("A,inf,slip,1,0", BoatError::NotANumber("inf".to_string()); "infinite length")]
    #[test_case("A,10,slip,1,NaN", BoatError::NotANumber("NaN".to_string()); "nan owed")]
    #[test_case("A,101,slip,1,0", BoatError::Length(101.0); "length too long")]
    #[test_case("A,10,dock,1,0", BoatError::Location("dock".to_string()); "unknown place")]
    #[test_case("A,10,slip,1,-5", BoatError::Owed(-5.0); "negative owed")]
    #[test_case("A,10,slip,86,0", BoatError::Detail(DetailError::Slip("86".to_string())); "bad slip")]
    #[test_case("A,10,land,a,0", BoatError::Detail(DetailError::Bay("a".to_string())); "lowercase bay")]
    #[test_case("A,10,trailor,TOOLONG,0", BoatError::Detail(DetailError::Tag("TOOLONG".to_string())); "long tag")]
    #[test_case("A,10,storage,0,0", BoatError::Detail(DetailError::Storage("0".to_string())); "bad storage")]
    fn rejects_invalid_records(line: &str, expected: BoatError) {
        assert_eq!(Boat::parse_record(line), Err(expected));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            Boat::parse_record(",10,slip,1,0"),
            Err(BoatError::Name(_))
        ));
    }

    #[test]
    fn non_numeric_field_is_named_in_the_message() {
        let error = Boat::parse_record("A,forty,slip,1,0").unwrap_err();
        assert_eq!(error.to_string(), "'forty' is not a number");
    }

    #[test]
    fn constructor_rejects_nan() {
        let name = BoatName::try_from("Ghost").unwrap();
        assert!(Boat::new(name.clone(), f64::NAN, Placement::Slip(1), 0.0).is_err());
        assert!(Boat::new(name, 10.0, Placement::Slip(1), f64::NAN).is_err());
    }
}
