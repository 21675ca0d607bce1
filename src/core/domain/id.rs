//! Domain identifier and enum types shared across the store, scanner, and
//! venue adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the venue (exchange) an [`Order`](super::order::Order) came
/// from. A newtype over `String` rather than a fixed enum so a new venue
/// adapter can be added without changing the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Option leg type, parsed from the `C`/`P` token in an instrument name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse the single-letter venue token (`"C"` / `"P"`).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "C" => Some(Self::Call),
            "P" => Some(Self::Put),
            _ => None,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_id_roundtrip() {
        let v = VenueId::from("aevo");
        assert_eq!(v.as_str(), "aevo");
        assert_eq!(format!("{v}"), "aevo");
    }

    #[test]
    fn option_type_parses_known_tokens() {
        assert_eq!(OptionType::parse("C"), Some(OptionType::Call));
        assert_eq!(OptionType::parse("P"), Some(OptionType::Put));
        assert_eq!(OptionType::parse("X"), None);
    }
}
