//! Country and region shortcode resolution.
//!
//! `geo.region` tags carry ISO-3166 shortcodes (`PH-MNL`, `JP-13`, ...). This
//! module resolves them to display names through the [`ShortcodeDirectory`]
//! trait. The crate ships [`EmbeddedShortcodeDirectory`], backed by a JSON
//! dataset compiled into the binary; callers can substitute their own
//! implementation (e.g. a database-backed one).

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// Resolves ISO-3166 shortcodes to country and region names.
///
/// Implementations are consulted concurrently and must be read-only.
pub trait ShortcodeDirectory: Send + Sync {
    /// Maps an ISO-3166-1 alpha-2 country code to a country name.
    ///
    /// The match is case-insensitive (`ph` and `PH` both resolve).
    fn country_name(&self, country_code: &str) -> Option<String>;

    /// Maps an ISO-3166-2 subdivision code (the part after the dash) within a
    /// country to a region name.
    fn region_name(&self, country_code: &str, region_code: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct ShortcodeData {
    countries: HashMap<String, String>,
    subdivisions: HashMap<String, HashMap<String, String>>,
}

static DATASET: LazyLock<ShortcodeData> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../data/shortcodes.json"))
        .unwrap_or_else(|e| panic!("embedded shortcode dataset is malformed: {e}"))
});

/// Shortcode directory backed by the embedded ISO-3166 dataset.
///
/// The dataset (`data/shortcodes.json`) carries the full ISO-3166-1 alpha-2
/// country list and ISO-3166-2 subdivisions for the countries that commonly
/// appear in geo meta tags. It is parsed once per process and shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedShortcodeDirectory;

impl ShortcodeDirectory for EmbeddedShortcodeDirectory {
    fn country_name(&self, country_code: &str) -> Option<String> {
        DATASET
            .countries
            .get(&country_code.to_ascii_uppercase())
            .cloned()
    }

    fn region_name(&self, country_code: &str, region_code: &str) -> Option<String> {
        DATASET
            .subdivisions
            .get(&country_code.to_ascii_uppercase())?
            .get(&region_code.to_ascii_uppercase())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup() {
        let directory = EmbeddedShortcodeDirectory;
        assert_eq!(
            directory.country_name("PH"),
            Some("Philippines".to_string())
        );
        assert_eq!(directory.country_name("JP"), Some("Japan".to_string()));
        assert_eq!(directory.country_name("XX"), None);
    }

    #[test]
    fn test_country_lookup_is_case_insensitive() {
        let directory = EmbeddedShortcodeDirectory;
        assert_eq!(
            directory.country_name("ph"),
            Some("Philippines".to_string())
        );
        assert_eq!(directory.country_name("Jp"), Some("Japan".to_string()));
    }

    #[test]
    fn test_region_lookup() {
        let directory = EmbeddedShortcodeDirectory;
        assert_eq!(
            directory.region_name("PH", "MNL"),
            Some("Manila".to_string())
        );
        assert_eq!(directory.region_name("JP", "13"), Some("Tokyo".to_string()));
        assert_eq!(directory.region_name("FR", "75"), Some("Paris".to_string()));
    }

    #[test]
    fn test_region_lookup_is_scoped_to_country() {
        let directory = EmbeddedShortcodeDirectory;
        // "13" exists in both JP and FR with different names
        assert_eq!(directory.region_name("JP", "13"), Some("Tokyo".to_string()));
        assert_ne!(directory.region_name("FR", "13"), Some("Tokyo".to_string()));
        // MNL is a Philippine code, not a Japanese one
        assert_eq!(directory.region_name("JP", "MNL"), None);
    }

    #[test]
    fn test_region_lookup_unknown_country() {
        let directory = EmbeddedShortcodeDirectory;
        assert_eq!(directory.region_name("", "13"), None);
        assert_eq!(directory.region_name("ZZ", "13"), None);
    }
}
