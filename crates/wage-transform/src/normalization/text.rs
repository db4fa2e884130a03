//! Text normalization utilities.

use wage_model::AREA_TYPE_PREFIX;

/// Removes the `Area type: ` label prefix from a `classif1.label` value.
///
/// Values without the prefix are returned unchanged. Repeated prefixes are
/// all removed, so applying this twice gives the same result as once.
///
/// # Examples
///
/// ```
/// use wage_transform::normalization::strip_area_prefix;
///
/// assert_eq!(strip_area_prefix("Area type: Rural"), "Rural");
/// assert_eq!(strip_area_prefix("National"), "National");
/// assert_eq!(strip_area_prefix("Urban Area type: "), "Urban Area type: ");
/// ```
pub fn strip_area_prefix(value: &str) -> &str {
    value.trim_start_matches(AREA_TYPE_PREFIX)
}
