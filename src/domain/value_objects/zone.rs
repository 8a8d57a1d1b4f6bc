//! # Postal Codes and Delivery Zones
//!
//! Lane classification for the Indian domestic network.
//!
//! Rate cards key their rule sets by [`Zone`]. A zone is derived from the
//! origin/destination postal-code pair using the standard courier ladder:
//! local (same city cluster), regional (same state), metro-to-metro,
//! rest of nation, and special lanes (J&K, North-East).
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::zone::{PostalCode, Zone};
//!
//! let origin = PostalCode::new("110001").unwrap();
//! let dest = PostalCode::new("110045").unwrap();
//! assert_eq!(Zone::resolve(&origin, &dest), Zone::Local);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Metro city pincode prefixes (Delhi, Mumbai, Bengaluru, Chennai,
/// Kolkata, Hyderabad, Pune, Ahmedabad).
const METRO_PREFIXES: [&str; 8] = ["110", "400", "560", "600", "700", "500", "411", "380"];

/// State prefixes billed as special lanes (J&K, Himachal, North-East).
const SPECIAL_PREFIXES: [&str; 4] = ["18", "19", "78", "79"];

/// Error type for postal code validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostalCodeError {
    /// The code is not exactly six digits.
    #[error("postal code must be exactly 6 digits, got {0:?}")]
    InvalidFormat(String),
}

/// A validated six-digit Indian postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Creates a postal code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PostalCodeError::InvalidFormat` unless the trimmed input
    /// is exactly six ASCII digits.
    pub fn new(code: impl AsRef<str>) -> Result<Self, PostalCodeError> {
        let trimmed = code.as_ref().trim();
        if trimmed.len() != 6 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PostalCodeError::InvalidFormat(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the postal code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first three digits, identifying the sorting district.
    #[must_use]
    pub fn district_prefix(&self) -> &str {
        self.0.get(..3).unwrap_or(&self.0)
    }

    /// The first two digits, approximating the state circle.
    #[must_use]
    pub fn state_prefix(&self) -> &str {
        self.0.get(..2).unwrap_or(&self.0)
    }

    /// Returns true if both codes fall in the same state circle.
    ///
    /// This drives the intra-state vs inter-state tax treatment.
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        self.state_prefix() == other.state_prefix()
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A delivery lane classification.
///
/// Rate card rule sets are keyed by zone; every zone a request resolves
/// to must have a configured rule (a missing rule is a configuration
/// error, never defaulted).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    /// Same sorting district (intra-city).
    Local,
    /// Same state circle.
    Regional,
    /// Metro to metro.
    Metro,
    /// Anywhere else in the country.
    RestOfNation,
    /// Hard-to-serve lanes (J&K, North-East).
    Special,
}

impl Zone {
    /// All zones, in ladder order.
    pub const ALL: [Self; 5] = [
        Self::Local,
        Self::Regional,
        Self::Metro,
        Self::RestOfNation,
        Self::Special,
    ];

    /// Parses a zone from a configuration key.
    ///
    /// Keys are normalized: surrounding whitespace is trimmed and the
    /// comparison is case-insensitive. Single-letter ladder aliases
    /// (`a`..`e`) are accepted.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "a" | "local" => Some(Self::Local),
            "b" | "regional" => Some(Self::Regional),
            "c" | "metro" => Some(Self::Metro),
            "d" | "rest_of_nation" | "roi" => Some(Self::RestOfNation),
            "e" | "special" => Some(Self::Special),
            _ => None,
        }
    }

    /// Classifies the lane for an origin/destination pair.
    ///
    /// Precedence: local, then regional, then special, then metro, then
    /// rest of nation. A special destination inside the origin state is
    /// still regional; special outranks metro for cross-state lanes.
    #[must_use]
    pub fn resolve(origin: &PostalCode, destination: &PostalCode) -> Self {
        if origin.district_prefix() == destination.district_prefix() {
            return Self::Local;
        }
        if origin.same_state(destination) {
            return Self::Regional;
        }
        if SPECIAL_PREFIXES.contains(&destination.state_prefix()) {
            return Self::Special;
        }
        let both_metro = METRO_PREFIXES.contains(&origin.district_prefix())
            && METRO_PREFIXES.contains(&destination.district_prefix());
        if both_metro {
            return Self::Metro;
        }
        Self::RestOfNation
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            Self::Regional => write!(f, "REGIONAL"),
            Self::Metro => write!(f, "METRO"),
            Self::RestOfNation => write!(f, "REST_OF_NATION"),
            Self::Special => write!(f, "SPECIAL"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pc(code: &str) -> PostalCode {
        PostalCode::new(code).unwrap()
    }

    mod postal_code {
        use super::*;

        #[test]
        fn accepts_six_digits_and_trims() {
            let code = PostalCode::new(" 110001 ").unwrap();
            assert_eq!(code.as_str(), "110001");
        }

        #[test]
        fn rejects_wrong_length_and_non_digits() {
            assert!(PostalCode::new("1100").is_err());
            assert!(PostalCode::new("11000a").is_err());
            assert!(PostalCode::new("1100011").is_err());
        }

        #[test]
        fn prefixes() {
            let code = pc("560034");
            assert_eq!(code.district_prefix(), "560");
            assert_eq!(code.state_prefix(), "56");
        }

        #[test]
        fn same_state_uses_state_prefix() {
            assert!(pc("560034").same_state(&pc("562125")));
            assert!(!pc("560034").same_state(&pc("110001")));
        }

        #[test]
        fn serde_roundtrip() {
            let code = pc("400001");
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, "\"400001\"");
            let back: PostalCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, back);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<PostalCode, _> = serde_json::from_str("\"12\"");
            assert!(result.is_err());
        }
    }

    mod zone {
        use super::*;

        #[test]
        fn same_district_is_local() {
            assert_eq!(Zone::resolve(&pc("110001"), &pc("110045")), Zone::Local);
        }

        #[test]
        fn same_state_is_regional() {
            assert_eq!(Zone::resolve(&pc("560034"), &pc("562125")), Zone::Regional);
        }

        #[test]
        fn metro_pair_is_metro() {
            assert_eq!(Zone::resolve(&pc("110001"), &pc("400001")), Zone::Metro);
        }

        #[test]
        fn cross_state_non_metro_is_rest_of_nation() {
            assert_eq!(
                Zone::resolve(&pc("110001"), &pc("452001")),
                Zone::RestOfNation
            );
        }

        #[test]
        fn special_destination_wins_over_metro() {
            // Delhi -> Guwahati (78x) is a special lane even though Delhi is metro
            assert_eq!(Zone::resolve(&pc("110001"), &pc("781001")), Zone::Special);
            // Srinagar (19x)
            assert_eq!(Zone::resolve(&pc("400001"), &pc("190001")), Zone::Special);
        }

        #[test]
        fn from_key_normalizes_and_accepts_aliases() {
            assert_eq!(Zone::from_key("  LOCAL "), Some(Zone::Local));
            assert_eq!(Zone::from_key("b"), Some(Zone::Regional));
            assert_eq!(Zone::from_key("roi"), Some(Zone::RestOfNation));
            assert_eq!(Zone::from_key("E"), Some(Zone::Special));
            assert_eq!(Zone::from_key("unknown"), None);
        }

        #[test]
        fn display_values() {
            assert_eq!(Zone::RestOfNation.to_string(), "REST_OF_NATION");
        }
    }
}
