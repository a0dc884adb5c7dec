//! Creature keywords.
//!
//! Keywords are a closed set. The catalog spells them as string tokens
//! (`"guard"`, `"armored_2"`); they are parsed once when the catalog is
//! loaded, so combat never looks at strings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use crate::error::CatalogError;

/// A single creature keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Keyword {
    /// Must be attacked before anything else its controller owns.
    Guard,
    /// Ignores summoning sickness.
    Charge,
    /// Nonzero combat damage it deals is lethal.
    Venomous,
    /// Reduces each instance of incoming damage by the given amount.
    Armored(u32),
}

impl FromStr for Keyword {
    type Err = CatalogError;

    /// Parse a catalog token. A bare `armored` means `Armored(1)`.
    ///
    /// ```
    /// use stonefire_engine::cards::Keyword;
    ///
    /// assert_eq!("guard".parse::<Keyword>().unwrap(), Keyword::Guard);
    /// assert_eq!("armored_3".parse::<Keyword>().unwrap(), Keyword::Armored(3));
    /// assert_eq!("armored".parse::<Keyword>().unwrap(), Keyword::Armored(1));
    /// assert!("flying".parse::<Keyword>().is_err());
    /// ```
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "guard" => Ok(Self::Guard),
            "charge" => Ok(Self::Charge),
            "venomous" => Ok(Self::Venomous),
            "armored" => Ok(Self::Armored(1)),
            other => other
                .strip_prefix("armored_")
                .and_then(|n| n.parse().ok())
                .map(Self::Armored)
                .ok_or_else(|| CatalogError::UnknownKeyword(other.to_string())),
        }
    }
}

impl TryFrom<String> for Keyword {
    type Error = CatalogError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        keyword.to_string()
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guard => write!(f, "guard"),
            Self::Charge => write!(f, "charge"),
            Self::Venomous => write!(f, "venomous"),
            Self::Armored(n) => write!(f, "armored_{}", n),
        }
    }
}

/// The keywords on one card.
///
/// Most creatures carry zero to two keywords, so the set is inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(SmallVec<[Keyword; 4]>);

impl KeywordSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword. Armor replaces any existing armor value.
    pub fn insert(&mut self, keyword: Keyword) {
        if let Keyword::Armored(_) = keyword {
            self.0.retain(|k| !matches!(k, Keyword::Armored(_)));
        } else if self.contains(keyword) {
            return;
        }
        self.0.push(keyword);
    }

    #[must_use]
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.0.contains(&keyword)
    }

    #[must_use]
    pub fn has_guard(&self) -> bool {
        self.contains(Keyword::Guard)
    }

    #[must_use]
    pub fn has_charge(&self) -> bool {
        self.contains(Keyword::Charge)
    }

    #[must_use]
    pub fn is_venomous(&self) -> bool {
        self.contains(Keyword::Venomous)
    }

    /// Armor value, 0 when not armored.
    #[must_use]
    pub fn armor(&self) -> u32 {
        self.0
            .iter()
            .find_map(|k| match k {
                Keyword::Armored(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = Self::new();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("charge".parse::<Keyword>().unwrap(), Keyword::Charge);
        assert_eq!("venomous".parse::<Keyword>().unwrap(), Keyword::Venomous);
        assert_eq!("armored_2".parse::<Keyword>().unwrap(), Keyword::Armored(2));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "armored_x".parse::<Keyword>(),
            Err(CatalogError::UnknownKeyword(token)) if token == "armored_x"
        ));
        assert!("".parse::<Keyword>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for keyword in [Keyword::Guard, Keyword::Charge, Keyword::Venomous, Keyword::Armored(4)] {
            assert_eq!(keyword.to_string().parse::<Keyword>().unwrap(), keyword);
        }
    }

    #[test]
    fn test_set_queries() {
        let set: KeywordSet = [Keyword::Guard, Keyword::Armored(2)].into_iter().collect();
        assert!(set.has_guard());
        assert!(!set.has_charge());
        assert!(!set.is_venomous());
        assert_eq!(set.armor(), 2);
        assert_eq!(KeywordSet::new().armor(), 0);
    }

    #[test]
    fn test_set_insert_dedups_and_replaces_armor() {
        let mut set = KeywordSet::new();
        set.insert(Keyword::Charge);
        set.insert(Keyword::Charge);
        set.insert(Keyword::Armored(1));
        set.insert(Keyword::Armored(3));

        assert_eq!(set.len(), 2);
        assert_eq!(set.armor(), 3);
    }

    #[test]
    fn test_set_json_uses_tokens() {
        let set: KeywordSet = [Keyword::Venomous, Keyword::Armored(2)].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["venomous","armored_2"]"#);

        let parsed: KeywordSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
        assert!(serde_json::from_str::<KeywordSet>(r#"["stealth"]"#).is_err());
    }
}
