//! Cell text for the rendering layer
//!
//! Date-typed columns whose value passes the date classifier are rendered as
//! localized dates (two-digit day, numeric year, month per [`DateStyle`]).
//! Everything else renders as the value's display string.

use chrono::{Locale, NaiveDateTime, TimeZone, Utc};

use crate::column::{Column, SortType};
use crate::config::{DateFormat, DateStyle};
use crate::dates::date_instant;
use crate::value::Value;

/// Text shown for `value` in `column`.
pub fn format_cell(value: &Value, column: &Column, format: &DateFormat) -> String {
    if column.kind == Some(SortType::Date) {
        if let Some(instant) = date_instant(value) {
            return format_date(instant, format);
        }
    }
    value.to_string()
}

/// Render a date the way the given format and locale ask for.
///
/// ```
/// use chrono::NaiveDate;
/// use datatable_core::config::{DateFormat, DateStyle};
/// use datatable_core::format::format_date;
///
/// let d = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let fr = DateFormat { style: DateStyle::Long, locale: "fr-FR".into() };
/// assert_eq!(format_date(d, &fr), "05 janvier 2020");
/// ```
pub fn format_date(instant: NaiveDateTime, format: &DateFormat) -> String {
    let locale = locale_for_tag(&format.locale);
    let pattern = pattern_for(format.style, locale);
    Utc.from_utc_datetime(&instant)
        .format_localized(pattern, locale)
        .to_string()
}

/// Map a BCP 47 tag (`fr-FR`, `en`, `de_DE`) to a chrono locale.
///
/// Unknown tags fall back to POSIX (English month names, day-first).
pub fn locale_for_tag(tag: &str) -> Locale {
    let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
    match tag.as_str() {
        "fr" | "fr-fr" => Locale::fr_FR,
        "fr-be" => Locale::fr_BE,
        "fr-ca" => Locale::fr_CA,
        "en" | "en-us" => Locale::en_US,
        "en-gb" => Locale::en_GB,
        "de" | "de-de" => Locale::de_DE,
        "es" | "es-es" => Locale::es_ES,
        "it" | "it-it" => Locale::it_IT,
        "pt-br" => Locale::pt_BR,
        "pt" | "pt-pt" => Locale::pt_PT,
        "nl" | "nl-nl" => Locale::nl_NL,
        _ => Locale::POSIX,
    }
}

fn pattern_for(style: DateStyle, locale: Locale) -> &'static str {
    match (locale, style) {
        (Locale::en_US, DateStyle::Long) => "%B %d, %Y",
        (Locale::en_US, DateStyle::Short) => "%b %d, %Y",
        (Locale::en_US, DateStyle::Numeric) => "%-m/%d/%Y",
        (Locale::en_US, DateStyle::TwoDigit) => "%m/%d/%Y",
        (Locale::de_DE, DateStyle::Numeric) => "%d.%-m.%Y",
        (Locale::de_DE, DateStyle::TwoDigit) => "%d.%m.%Y",
        (_, DateStyle::Long) => "%d %B %Y",
        (_, DateStyle::Short) => "%d %b %Y",
        (_, DateStyle::Numeric) => "%d/%-m/%Y",
        (_, DateStyle::TwoDigit) => "%d/%m/%Y",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jan5() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fmt(style: DateStyle, locale: &str) -> DateFormat {
        DateFormat {
            style,
            locale: locale.to_string(),
        }
    }

    #[test]
    fn test_french_styles() {
        assert_eq!(format_date(jan5(), &fmt(DateStyle::Long, "fr-FR")), "05 janvier 2020");
        assert_eq!(format_date(jan5(), &fmt(DateStyle::TwoDigit, "fr-FR")), "05/01/2020");
        assert_eq!(format_date(jan5(), &fmt(DateStyle::Numeric, "fr-FR")), "05/1/2020");
    }

    #[test]
    fn test_us_styles() {
        assert_eq!(format_date(jan5(), &fmt(DateStyle::Long, "en-US")), "January 05, 2020");
        assert_eq!(format_date(jan5(), &fmt(DateStyle::TwoDigit, "en_US")), "01/05/2020");
    }

    #[test]
    fn test_format_cell_only_formats_date_columns() {
        let fr = DateFormat::default();
        let birth = Column::new("Born", "born").unwrap().with_type(SortType::Date);
        let plain = Column::new("Code", "code").unwrap();

        assert_eq!(format_cell(&Value::from("01/05/2020"), &birth, &fr), "05 janvier 2020");
        assert_eq!(format_cell(&Value::from("01/05/2020"), &plain, &fr), "01/05/2020");
        assert_eq!(format_cell(&Value::from("soon"), &birth, &fr), "soon");
        assert_eq!(format_cell(&Value::from(7), &plain, &fr), "7");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(locale_for_tag("xx-YY"), Locale::POSIX);
        assert_eq!(locale_for_tag(" FR "), Locale::fr_FR);
    }
}
