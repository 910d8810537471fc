//! Where a boat is kept, and the location-specific detail that goes with it.
//!
//! A [`Placement`] ties the [`Location`] category and its detail together so
//! that a boat can never hold, say, a slip number while being stored on land.

use std::fmt;

/// Maximum length of a trailor tag, in bytes.
pub const MAX_TAG_LEN: usize = 6;

/// The rendered form of an unrecognised place name.
///
/// This never appears in a stored record; it exists for diagnostics only.
pub const NO_PLACE: &str = "no_place";

/// The category of berth a boat occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// A numbered slip in the water.
    Slip,
    /// A lettered bay on land.
    Land,
    /// A trailor, identified by its tag.
    Trailor,
    /// A numbered indoor storage space.
    Storage,
}

impl Location {
    /// All locations, in declaration order.
    pub const ALL: [Self; 4] = [Self::Slip, Self::Land, Self::Trailor, Self::Storage];

    /// Matches a place name case-insensitively.
    ///
    /// Returns `None` for anything other than `slip`, `land`, `trailor` or
    /// `storage`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str().eq_ignore_ascii_case(text))
    }

    /// The canonical lowercase name used in the inventory file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slip => "slip",
            Self::Land => "land",
            Self::Trailor => "trailor",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the result of [`Location::parse`], including the no-placement
/// sentinel.
#[must_use]
pub const fn render_place(place: Option<Location>) -> &'static str {
    match place {
        Some(location) => location.as_str(),
        None => NO_PLACE,
    }
}

/// A validated location together with its detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Slip number, 1 to 85.
    Slip(u8),
    /// Bay letter, `'A'` to `'Z'`.
    Land(char),
    /// Trailor tag, 1 to 6 bytes.
    Trailor(String),
    /// Storage space number, 1 to 50.
    Storage(u8),
}

impl Placement {
    /// Validates `detail` against the rules for `location`.
    ///
    /// Numeric details must be plain decimal integers: leading whitespace is
    /// tolerated, trailing characters are not, so `"12abc"` is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`DetailError`] naming the location whose rule was broken.
    pub fn parse(location: Location, detail: &str) -> Result<Self, DetailError> {
        match location {
            Location::Slip => parse_number(detail, 85)
                .map(Self::Slip)
                .ok_or_else(|| DetailError::Slip(detail.to_string())),
            Location::Land => {
                let mut chars = detail.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter @ 'A'..='Z'), None) => Ok(Self::Land(letter)),
                    _ => Err(DetailError::Bay(detail.to_string())),
                }
            }
            Location::Trailor => {
                if detail.is_empty() || detail.len() > MAX_TAG_LEN {
                    Err(DetailError::Tag(detail.to_string()))
                } else {
                    Ok(Self::Trailor(detail.to_string()))
                }
            }
            Location::Storage => parse_number(detail, 50)
                .map(Self::Storage)
                .ok_or_else(|| DetailError::Storage(detail.to_string())),
        }
    }

    /// The location category of this placement.
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::Slip(_) => Location::Slip,
            Self::Land(_) => Location::Land,
            Self::Trailor(_) => Location::Trailor,
            Self::Storage(_) => Location::Storage,
        }
    }

    /// Returns a displayable form of the detail field, exactly as it is
    /// written to the inventory file.
    #[must_use]
    pub const fn detail(&self) -> Detail<'_> {
        Detail(self)
    }
}

/// The detail half of a [`Placement`], formatted for persistence.
///
/// Integers are plain decimal, letters and tags are written as-is, and
/// nothing is padded.
#[derive(Debug, Clone, Copy)]
pub struct Detail<'a>(&'a Placement);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Placement::Slip(n) | Placement::Storage(n) => write!(f, "{n}"),
            Placement::Land(letter) => write!(f, "{letter}"),
            Placement::Trailor(tag) => f.write_str(tag),
        }
    }
}

/// Parses a strictly numeric detail in `1..=max`.
fn parse_number(detail: &str, max: u8) -> Option<u8> {
    let value: i64 = detail.trim_start().parse().ok()?;
    u8::try_from(value)
        .ok()
        .filter(|n| (1..=max).contains(n))
}

/// A location detail that does not satisfy its location's rule.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DetailError {
    /// Slip numbers must be integers from 1 to 85.
    #[error("invalid slip number '{0}': expected an integer from 1 to 85")]
    Slip(String),
    /// Bay letters must be a single uppercase letter.
    #[error("invalid bay letter '{0}': expected a single letter from A to Z")]
    Bay(String),
    /// Trailor tags must be 1 to 6 characters.
    #[error("invalid trailor tag '{0}': expected 1 to 6 characters")]
    Tag(String),
    /// Storage numbers must be integers from 1 to 50.
    #[error("invalid storage number '{0}': expected an integer from 1 to 50")]
    Storage(String),
}
