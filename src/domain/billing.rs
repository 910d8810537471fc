//! Monthly charges and payments.

use serde::{Deserialize, Serialize};

use crate::domain::{Boat, Location, Registry};

/// Monthly charge per foot of boat length, by location category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Rate for boats in a slip.
    pub slip: f64,
    /// Rate for boats in a land bay.
    pub land: f64,
    /// Rate for boats on a trailor.
    pub trailor: f64,
    /// Rate for boats in a storage space.
    pub storage: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            slip: 12.50,
            land: 14.00,
            trailor: 25.00,
            storage: 11.20,
        }
    }
}

impl Rates {
    /// The per-foot rate for `location`.
    #[must_use]
    pub const fn rate(&self, location: Location) -> f64 {
        match location {
            Location::Slip => self.slip,
            Location::Land => self.land,
            Location::Trailor => self.trailor,
            Location::Storage => self.storage,
        }
    }

    /// Checks that every rate is a finite amount of at least 0.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidRate`] in [`Location::ALL`] order.
    pub fn validate(&self) -> Result<(), InvalidRate> {
        Location::ALL
            .into_iter()
            .map(|location| (location, self.rate(location)))
            .find(|(_, rate)| !rate.is_finite() || *rate < 0.0)
            .map_or(Ok(()), |(location, rate)| {
                Err(InvalidRate { location, rate })
            })
    }

    /// The amount one month adds to `boat`'s balance.
    #[must_use]
    pub fn monthly_charge(&self, boat: &Boat) -> f64 {
        boat.length() * self.rate(boat.location())
    }
}

/// Adds one month's charge to every boat in the registry.
///
/// Returns the number of boats charged.
pub fn apply_monthly_charges(registry: &mut Registry, rates: &Rates) -> usize {
    let mut charged = 0;
    for boat in registry.iter_mut() {
        let charge = rates.monthly_charge(boat);
        *boat.owed_mut() += charge;
        charged += 1;
    }
    tracing::info!(charged, "applied monthly charges");
    charged
}

/// Applies a payment of `amount` to `boat`.
///
/// Payments are all-or-nothing: an amount larger than the balance is rejected
/// rather than clamped. On success the remaining balance is returned.
///
/// # Errors
///
/// - [`PaymentError::NonPositive`] if `amount` is zero, negative or not a
///   finite number
/// - [`PaymentError::ExceedsBalance`] if `amount` is more than the boat owes
pub fn apply_payment(boat: &mut Boat, amount: f64) -> Result<f64, PaymentError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::NonPositive(amount));
    }
    if amount > boat.owed() {
        return Err(PaymentError::ExceedsBalance { owed: boat.owed() });
    }
    let owed = boat.owed_mut();
    *owed -= amount;
    Ok(*owed)
}

/// A monthly rate that would make a balance negative or non-finite.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq)]
#[error("invalid {location} rate {rate}: must be a finite amount of at least 0")]
pub struct InvalidRate {
    /// The location the rate applies to.
    pub location: Location,
    /// The rejected rate.
    pub rate: f64,
}

/// Reasons a payment is refused.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PaymentError {
    /// No boat has the given name.
    #[error("There is no boat named {0} in the database. No payment made.")]
    NotFound(String),

    /// The amount is zero or negative.
    #[error("Payment must be a positive amount, got {0}. No payment made.")]
    NonPositive(f64),

    /// The amount is more than the boat owes.
    #[error("That is more than the amount owed, ${owed:.2}. No payment made.")]
    ExceedsBalance {
        /// The balance at the time of the attempt.
        owed: f64,
    },
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn boat(record: &str) -> Boat {
        record.parse().unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test_case("S,20,slip,1,0", 250.0; "slip")]
    #[test_case("L,20,land,A,0", 280.0; "land")]
    #[test_case("T,20,trailor,T1,0", 500.0; "trailor")]
    #[test_case("G,20,storage,1,0", 224.0; "storage")]
    fn monthly_charge_by_location(record: &str, expected: f64) {
        assert!(approx(Rates::default().monthly_charge(&boat(record)), expected));
    }

    #[test]
    fn default_rates_are_valid() {
        assert_eq!(Rates::default().validate(), Ok(()));
    }

    #[test_case(Rates { slip: -5.0, ..Rates::default() }, Location::Slip; "negative")]
    #[test_case(Rates { land: f64::NAN, ..Rates::default() }, Location::Land; "nan")]
    #[test_case(Rates { storage: f64::INFINITY, ..Rates::default() }, Location::Storage; "infinite")]
    fn unchargeable_rates_are_rejected(rates: Rates, location: Location) {
        let error = rates.validate().unwrap_err();
        assert_eq!(error.location, location);
    }

    #[test]
    fn zero_rate_is_allowed() {
        let rates = Rates {
            trailor: 0.0,
            ..Rates::default()
        };
        assert_eq!(rates.validate(), Ok(()));
    }

    #[test]
    fn monthly_charges_accumulate() {
        let mut registry = Registry::default();
        registry.insert(boat("Slipper,20,slip,3,0.00")).unwrap();
        registry.insert(boat("Lander,10,land,B,5.00")).unwrap();

        let rates = Rates::default();
        assert_eq!(apply_monthly_charges(&mut registry, &rates), 2);
        assert_eq!(apply_monthly_charges(&mut registry, &rates), 2);

        assert!(approx(registry.get("slipper").unwrap().owed(), 500.0));
        assert!(approx(registry.get("LANDER").unwrap().owed(), 285.0));
    }

    #[test]
    fn paying_the_full_balance_zeroes_it() {
        let mut boat = boat("Payer,30,slip,4,120.50");
        assert_eq!(apply_payment(&mut boat, 120.50), Ok(0.0));
        assert!(approx(boat.owed(), 0.0));
    }

    #[test]
    fn overpayment_is_rejected() {
        let mut boat = boat("Payer,30,slip,4,120.50");
        assert_eq!(
            apply_payment(&mut boat, 120.51),
            Err(PaymentError::ExceedsBalance { owed: 120.50 })
        );
        assert!(approx(boat.owed(), 120.50));
    }

    #[test_case(0.0; "zero")]
    #[test_case(-10.0; "negative")]
    fn non_positive_payment_is_rejected(amount: f64) {
        let mut boat = boat("Payer,30,slip,4,120.50");
        assert_eq!(
            apply_payment(&mut boat, amount),
            Err(PaymentError::NonPositive(amount))
        );
        assert!(approx(boat.owed(), 120.50));
    }

    #[test]
    fn nan_payment_is_rejected() {
        let mut boat = boat("Payer,30,slip,4,120.50");
        assert!(matches!(
            apply_payment(&mut boat, f64::NAN),
            Err(PaymentError::NonPositive(_))
        ));
    }

    #[test]
    fn partial_payment_reduces_balance() {
        let mut boat = boat("Payer,30,slip,4,100.00");
        let remaining = apply_payment(&mut boat, 40.0).unwrap();
        assert!(approx(remaining, 60.0));
    }
}
