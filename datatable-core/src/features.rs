//! Runtime feature toggles for a table
//!
//! A table's search box, pagination footer and sortable headers can each be
//! switched on or off, either through configuration or at runtime with
//! [`TableAction::FeatureSet`](crate::TableAction::FeatureSet).
//!
//! # Usage in Reducers
//!
//! ```ignore
//! match action {
//!     TableAction::SortActivate { key, .. } if state.config.features.sortable => { /* ... */ }
//!     TableAction::SortActivate { .. } => false, // sorting disabled
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use datatable_macros::FeatureFlags;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Trait for feature flag containers
///
/// Use `#[derive(FeatureFlags)]` for automatic implementation.
///
/// Flags are addressed by name so they can be loaded from configuration
/// maps or toggled from a command palette.
///
/// # Example
///
/// ```
/// use datatable_core::{FeatureFlags, TableFeatures};
///
/// let mut features = TableFeatures::default();
/// assert_eq!(features.is_enabled("search"), Some(true));
///
/// features.disable("search");
/// assert_eq!(features.is_enabled("search"), Some(false));
/// assert_eq!(features.is_enabled("unknown"), None);
/// ```
pub trait FeatureFlags {
    /// Check if a feature is enabled by name
    ///
    /// Returns `None` if the feature doesn't exist.
    fn is_enabled(&self, name: &str) -> Option<bool>;

    /// Set a feature's enabled state
    ///
    /// Returns `false` if the feature doesn't exist.
    fn set(&mut self, name: &str, enabled: bool) -> bool;

    /// Get all available flag names
    fn all_flags() -> &'static [&'static str]
    where
        Self: Sized;

    fn enable(&mut self, name: &str) -> bool {
        self.set(name, true)
    }

    fn disable(&mut self, name: &str) -> bool {
        self.set(name, false)
    }

    /// Toggle a feature by name
    ///
    /// Returns the new state, or `None` if the feature doesn't exist.
    fn toggle(&mut self, name: &str) -> Option<bool> {
        let new_state = !self.is_enabled(name)?;
        self.set(name, new_state);
        Some(new_state)
    }

    /// Load flags from a map (e.g., from config file)
    ///
    /// Unknown flags are ignored. Returns the number of flags that were set.
    fn load_from_map(&mut self, map: &HashMap<String, bool>) -> usize {
        map.iter()
            .filter(|(name, enabled)| self.set(name, **enabled))
            .count()
    }
}

/// The individually switchable parts of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Search,
    Pagination,
    Sortable,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Search, Feature::Pagination, Feature::Sortable];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Search => "search",
            Feature::Pagination => "pagination",
            Feature::Sortable => "sortable",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TableError::UnknownFeature(s.to_string()))
    }
}

/// Which table features are on. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FeatureFlags)]
pub struct TableFeatures {
    #[flag(default = true)]
    pub search: bool,
    #[flag(default = true)]
    pub pagination: bool,
    #[flag(default = true)]
    pub sortable: bool,
}

impl TableFeatures {
    /// Whether `feature` is on
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Search => self.search,
            Feature::Pagination => self.pagination,
            Feature::Sortable => self.sortable,
        }
    }

    /// Mutable flag for `feature`
    pub fn slot(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::Search => &mut self.search,
            Feature::Pagination => &mut self.pagination,
            Feature::Sortable => &mut self.sortable,
        }
    }
}
