use std::{cmp::Ordering, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// Maximum length of a boat name, in bytes.
pub const MAX_NAME_LEN: usize = 127;

/// A validated boat name.
///
/// Names are the registry key. They keep their original spelling for display
/// and persistence, but compare case-insensitively (ASCII case folding), so
/// `"Sea Breeze"` and `"SEA BREEZE"` are the same boat.
#[derive(Debug, Clone)]
pub struct BoatName(NonEmptyString);

impl BoatName {
    /// Creates a new `BoatName`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is empty, longer than
    /// [`MAX_NAME_LEN`] bytes, or contains a comma or line break (the
    /// inventory file has no escaping).
    pub fn new(s: String) -> Result<Self, InvalidNameError> {
        if s.len() > MAX_NAME_LEN || s.contains([',', '\n', '\r']) {
            return Err(InvalidNameError(s));
        }
        NonEmptyString::new(s).map(Self).map_err(InvalidNameError)
    }

    /// Returns the name as originally spelled.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Compares two names the way the registry orders them: byte-wise after ASCII
/// lowercasing.
///
/// Sorting and lookup must both go through this function so that binary
/// search agrees with the stored order.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl PartialEq for BoatName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for BoatName {}

impl PartialOrd for BoatName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoatName {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_names(self.as_str(), other.as_str())
    }
}

impl TryFrom<String> for BoatName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for BoatName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for BoatName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for BoatName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for BoatName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for BoatName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a boat name is empty, too long, or contains a
/// separator character.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error(
    "Invalid boat name '{0}': must be 1-127 bytes and contain no commas or line breaks"
)]
pub struct InvalidNameError(String);
