//! String collation strategies
//!
//! String sorting goes through a [`Collator`] so tables can be tested
//! without platform locale data and callers can plug in their own rules.

use std::cmp::Ordering;
use std::fmt::Debug;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two strings for display ordering.
pub trait Collator: Debug + Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Accent- and case-aware collation approximating a locale comparison.
///
/// Comparison runs in levels, each consulted only on a tie:
/// 1. base letters (decomposed, accents stripped, lowercased)
/// 2. accents: unaccented before accented
/// 3. case: lowercase before uppercase
/// 4. raw code points
///
/// ```
/// use datatable_core::collation::{Collator, LocaleCollator};
/// use std::cmp::Ordering;
///
/// assert_eq!(LocaleCollator.compare("à", "b"), Ordering::Less);
/// assert_eq!(LocaleCollator.compare("Zoe", "émile"), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleCollator;

impl LocaleCollator {
    fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
    }

    fn accents(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd().filter(|c| is_combining_mark(*c))
    }

    fn case_bits(s: &str) -> impl Iterator<Item = bool> + '_ {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(char::is_uppercase)
    }
}

impl Collator for LocaleCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::base_letters(a)
            .cmp(Self::base_letters(b))
            .then_with(|| Self::accents(a).cmp(Self::accents(b)))
            .then_with(|| Self::case_bits(a).cmp(Self::case_bits(b)))
            .then_with(|| a.cmp(b))
    }
}

/// Plain code-point ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalCollator;

impl Collator for OrdinalCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}
