//! Supported regions and their locale, alphabet and wire names.

use crate::locale::Locale;
use serde::{Serialize, Serializer};
use std::fmt;

const LATIN_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
const SPANISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzñáéíóúü";

/// A region selects the locale tables, the address/phone layout and the
/// alphabet used for inserted typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    Mexico,
    #[default]
    UnitedStates,
    GreatBritain,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Mexico, Region::UnitedStates, Region::GreatBritain];

    /// Parse a region name, accepting the legacy `USA` / `UK` aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Mexico" => Some(Region::Mexico),
            "United_States" | "USA" => Some(Region::UnitedStates),
            "Great_Britain" | "UK" => Some(Region::GreatBritain),
            _ => None,
        }
    }

    /// Parse a region name, falling back to United States for anything
    /// unrecognized.
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(region = s, "unknown region, falling back to United_States");
            Region::UnitedStates
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Mexico => "Mexico",
            Region::UnitedStates => "United_States",
            Region::GreatBritain => "Great_Britain",
        }
    }

    pub fn locale(&self) -> Locale {
        match self {
            Region::Mexico => Locale::EsMx,
            Region::UnitedStates => Locale::EnUs,
            Region::GreatBritain => Locale::EnGb,
        }
    }

    /// Characters a random insertion may draw from.
    pub fn alphabet(&self) -> &'static str {
        match self {
            Region::Mexico => SPANISH_ALPHABET,
            Region::UnitedStates | Region::GreatBritain => LATIN_ALPHABET,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_regions() {
        assert_eq!(Region::parse("Mexico"), Some(Region::Mexico));
        assert_eq!(Region::parse("United_States"), Some(Region::UnitedStates));
        assert_eq!(Region::parse("Great_Britain"), Some(Region::GreatBritain));
        assert_eq!(Region::parse("USA"), Some(Region::UnitedStates));
        assert_eq!(Region::parse("UK"), Some(Region::GreatBritain));
    }

    #[test]
    fn test_unknown_region_falls_back() {
        assert_eq!(Region::parse("Atlantis"), None);
        assert_eq!(Region::parse_lossy("Atlantis"), Region::UnitedStates);
        assert_eq!(Region::parse_lossy(""), Region::UnitedStates);
        assert_eq!(Region::parse_lossy("mexico"), Region::UnitedStates);
    }

    #[test]
    fn test_round_trip_names() {
        for region in Region::ALL {
            assert_eq!(Region::parse(region.as_str()), Some(region));
        }
    }

    #[test]
    fn test_alphabets() {
        assert_eq!(Region::UnitedStates.alphabet().chars().count(), 26);
        assert_eq!(Region::GreatBritain.alphabet().chars().count(), 26);
        assert_eq!(Region::Mexico.alphabet().chars().count(), 33);
        assert!(Region::Mexico.alphabet().contains('ñ'));
    }
}
