//! Filter identifiers and recognized genders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four selectable camera filters.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct FilterId(u8);

impl FilterId {
    pub const ONE: FilterId = FilterId(1);
    pub const TWO: FilterId = FilterId(2);
    pub const THREE: FilterId = FilterId(3);
    pub const FOUR: FilterId = FilterId(4);

    /// Every filter, in display order.
    pub const ALL: [FilterId; 4] = [Self::ONE, Self::TWO, Self::THREE, Self::FOUR];

    /// Returns `None` for values outside `1..=4`.
    pub fn new(value: i64) -> Option<Self> {
        match value {
            1..=4 => Some(FilterId(value as u8)),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Chart/legend label, e.g. `Filter 3`.
    pub fn label(&self) -> String {
        format!("Filter {}", self.0)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for FilterId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        FilterId::new(value).ok_or_else(|| format!("filter id {} is outside 1..=4", value))
    }
}

impl From<FilterId> for i64 {
    fn from(id: FilterId) -> Self {
        id.0 as i64
    }
}

/// Genders the aggregations know how to bucket.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive match against `male` / `female`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("male") {
            Some(Gender::Male)
        } else if value.eq_ignore_ascii_case("female") {
            Some(Gender::Female)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_id_bounds() {
        assert!(FilterId::new(0).is_none());
        assert!(FilterId::new(5).is_none());
        assert!(FilterId::new(-1).is_none());
        assert_eq!(FilterId::new(3), Some(FilterId::THREE));
    }

    #[test]
    fn test_filter_id_label() {
        assert_eq!(FilterId::TWO.label(), "Filter 2");
        assert_eq!(FilterId::TWO.to_string(), "2");
    }

    #[test]
    fn test_filter_id_serde() {
        let ids: Vec<FilterId> = serde_json::from_str("[1, 4]").unwrap();
        assert_eq!(ids, vec![FilterId::ONE, FilterId::FOUR]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), "[1,4]");
        assert!(serde_json::from_str::<FilterId>("9").is_err());
    }

    #[test]
    fn test_gender_parse_is_case_insensitive() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::parse(" female "), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(Gender::parse(""), None);
    }
}
