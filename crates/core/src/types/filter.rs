//! Catalog filter and sort state.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Price ordering applied to the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep catalog order.
    #[default]
    Unsorted,
    /// Cheapest first.
    #[serde(rename = "low-high")]
    LowToHigh,
    /// Most expensive first.
    #[serde(rename = "high-low")]
    HighToLow,
}

/// Error returned when a sort order string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort order {0:?} (expected low-high, high-low or default)")]
pub struct SortOrderError(String);

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unsorted => "default",
            Self::LowToHigh => "low-high",
            Self::HighToLow => "high-low",
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Unsorted)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "none" => Ok(Self::Unsorted),
            "low-high" | "asc" | "ascending" => Ok(Self::LowToHigh),
            "high-low" | "desc" | "descending" => Ok(Self::HighToLow),
            other => Err(SortOrderError(other.to_owned())),
        }
    }
}

/// Search, category and sort inputs for the catalog view.
///
/// `debounced_search_term` trails `search_term` by the debounce window and is
/// the only term used for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_term: String,
    pub debounced_search_term: String,
    pub selected_category: Option<String>,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Whether any user-facing filter differs from its default.
    ///
    /// Uses the live search term, so the "clear filters" affordance appears
    /// as soon as the user types.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || self.selected_category.is_some()
            || !self.sort_order.is_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parses_ui_values() {
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::Unsorted);
        assert_eq!("low-high".parse::<SortOrder>().unwrap(), SortOrder::LowToHigh);
        assert_eq!("HIGH-LOW".parse::<SortOrder>().unwrap(), SortOrder::HighToLow);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_default_filter_state_is_inactive() {
        assert!(!FilterState::default().has_active_filters());
    }

    #[test]
    fn test_live_term_activates_filters_before_debounce() {
        let state = FilterState {
            search_term: "shirt".to_string(),
            ..FilterState::default()
        };
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_sort_order_alone_activates_filters() {
        let state = FilterState {
            sort_order: SortOrder::HighToLow,
            ..FilterState::default()
        };
        assert!(state.has_active_filters());
    }
}
