//! Table configuration with defaults and partial overrides
//!
//! Callers supply a [`PartialTableConfig`] (usually from JSON) holding only
//! the keys they care about. It is merged over [`TableConfig::default`]:
//! top-level keys replace their default, while the nested date format is
//! merged key by key so a lone `locale` keeps the default `style`.
//!
//! ```
//! use datatable_core::config::{DateStyle, TableConfig};
//!
//! let json = r#"{ "sortable": false, "dateFormat": { "locale": "en-US" } }"#;
//! let config = TableConfig::from_json(json).unwrap();
//! assert!(!config.features.sortable);
//! assert!(config.features.search);
//! assert_eq!(config.date_format.locale, "en-US");
//! assert_eq!(config.date_format.style, DateStyle::Long);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::features::TableFeatures;

/// Month rendering style for date cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateStyle {
    /// `01 janvier 2020`
    #[default]
    Long,
    /// `01 janv. 2020`
    Short,
    /// `01/1/2020`
    Numeric,
    /// `01/01/2020`
    #[serde(alias = "2-digit")]
    TwoDigit,
}

/// How date-typed cells are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    pub style: DateStyle,
    /// BCP 47 tag such as `fr-FR` or `en-US`
    pub locale: String,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            style: DateStyle::Long,
            locale: "fr-FR".to_string(),
        }
    }
}

/// Complete, resolved table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableConfig {
    pub features: TableFeatures,
    pub rows_per_page_options: Vec<usize>,
    pub date_format: DateFormat,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            features: TableFeatures::default(),
            rows_per_page_options: vec![5, 25, 50],
            date_format: DateFormat::default(),
        }
    }
}

/// Caller-supplied overrides; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTableConfig {
    pub search: Option<bool>,
    pub pagination: Option<bool>,
    pub sortable: Option<bool>,
    pub rows_per_page_options: Option<Vec<usize>>,
    #[serde(alias = "dates")]
    pub date_format: Option<PartialDateFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialDateFormat {
    #[serde(alias = "format")]
    pub style: Option<DateStyle>,
    #[serde(alias = "country")]
    pub locale: Option<String>,
}

impl DateFormat {
    fn merged(mut self, overrides: PartialDateFormat) -> Self {
        if let Some(style) = overrides.style {
            self.style = style;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        self
    }
}

impl TableConfig {
    /// Apply `overrides` on top of this configuration.
    ///
    /// Zero entries in `rows_per_page_options` are dropped.
    pub fn merged(mut self, overrides: PartialTableConfig) -> Self {
        let features = &mut self.features;
        features.search = overrides.search.unwrap_or(features.search);
        features.pagination = overrides.pagination.unwrap_or(features.pagination);
        features.sortable = overrides.sortable.unwrap_or(features.sortable);

        if let Some(mut options) = overrides.rows_per_page_options {
            options.retain(|n| *n > 0);
            self.rows_per_page_options = options;
        }
        if let Some(date_format) = overrides.date_format {
            self.date_format = self.date_format.merged(date_format);
        }
        self
    }

    /// Parse a JSON override object and merge it over the defaults.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let overrides: PartialTableConfig = serde_json::from_str(json).map_err(TableError::Config)?;
        Ok(Self::default().merged(overrides))
    }
}

impl From<PartialTableConfig> for TableConfig {
    fn from(overrides: PartialTableConfig) -> Self {
        TableConfig::default().merged(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_override_keeps_defaults() {
        assert_eq!(TableConfig::from_json("{}").unwrap(), TableConfig::default());
    }

    #[test]
    fn test_nested_date_format_merges_per_key() {
        let config = TableConfig::from_json(r#"{"dates":{"format":"short"}}"#).unwrap();
        assert_eq!(config.date_format.style, DateStyle::Short);
        assert_eq!(config.date_format.locale, "fr-FR");

        let config = TableConfig::from_json(r#"{"dateFormat":{"country":"en-GB"}}"#).unwrap();
        assert_eq!(config.date_format.style, DateStyle::Long);
        assert_eq!(config.date_format.locale, "en-GB");
    }

    #[test]
    fn test_rows_per_page_options_replace_and_drop_zero() {
        let config = TableConfig::from_json(r#"{"rowsPerPageOptions":[0,10,20]}"#).unwrap();
        assert_eq!(config.rows_per_page_options, vec![10, 20]);
    }

    #[test]
    fn test_two_digit_style_spelling() {
        let config = TableConfig::from_json(r#"{"dates":{"format":"two-digit"}}"#).unwrap();
        assert_eq!(config.date_format.style, DateStyle::TwoDigit);
        let config = TableConfig::from_json(r#"{"dates":{"format":"2-digit"}}"#).unwrap();
        assert_eq!(config.date_format.style, DateStyle::TwoDigit);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = TableConfig::from_json("{ search: yes }").unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
    }
}
