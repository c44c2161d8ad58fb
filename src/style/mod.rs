//! Inline style reconciliation.
//!
//! [`patch_style`] brings an element's live style object from a previous
//! [`StyleValue`] to the next one with the smallest set of mutations:
//!
//! - an absent value removes the `style` attribute,
//! - text replaces the whole declaration block when it changed,
//! - a map sets every listed property and clears the ones that disappeared
//!   since the previous map.
//!
//! ```
//! use waterui_dom::memory::MemoryElement;
//! use waterui_dom::style::{StyleValue, patch_style};
//! use waterui_dom::surface::Surface;
//!
//! let el = MemoryElement::new("div");
//! let prev = StyleValue::from_iter([("color", "blue"), ("width", "10px")]);
//! let next = StyleValue::from_iter([("color", "red")]);
//!
//! patch_style(&el, &StyleValue::Absent, &prev);
//! patch_style(&el, &prev, &next);
//!
//! assert_eq!(el.style().get("color").as_deref(), Some("red"));
//! assert!(el.style().get("width").is_none());
//! ```

pub mod case;
pub mod prefix;

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use prefix::{PrefixCache, VENDOR_PREFIXES};

use crate::{
    error::DomError,
    surface::{Priority, StyleDeclaration, Surface},
};

static IMPORTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*!important\s*$").expect("important marker pattern should compile")
});

/// Ordered property map. A `None` entry is an explicit null and clears the
/// property.
pub type StyleMap = IndexMap<String, Option<StyleEntry>>;

/// Value assigned to a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleEntry {
    /// One value.
    Single(String),
    /// Candidate values applied in order. A surface that rejects a later
    /// value keeps the last one it accepted.
    Many(Vec<String>),
}

impl From<&str> for StyleEntry {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for StyleEntry {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for StyleEntry {
    fn from(values: Vec<S>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

/// The style prop of a virtual node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// No style at all.
    #[default]
    Absent,
    /// Raw declaration text, applied all-or-nothing.
    Text(String),
    /// Per-property declarations.
    Map(StyleMap),
}

impl StyleValue {
    /// Creates a text style value.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Parses a style value from JSON: `null`, a string, or an object whose
    /// values are `null`, strings or arrays of strings.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidStyle`] when the input is not one of those
    /// shapes.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns `true` for [`StyleValue::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<StyleMap> for StyleValue {
    fn from(map: StyleMap) -> Self {
        Self::Map(map)
    }
}

impl<K, V> FromIterator<(K, V)> for StyleValue
where
    K: Into<String>,
    V: Into<StyleEntry>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(name, value)| (name.into(), Some(value.into())))
                .collect(),
        )
    }
}

/// Patches `el` from `prev` to `next` using the process-wide [`PrefixCache`].
pub fn patch_style<S>(el: &S, prev: &StyleValue, next: &StyleValue)
where
    S: Surface + ?Sized,
{
    patch_style_with(&PrefixCache::global(), el, prev, next);
}

/// Patches `el` from `prev` to `next`, resolving vendor prefixes through
/// `prefixes`.
pub fn patch_style_with<S>(prefixes: &PrefixCache, el: &S, prev: &StyleValue, next: &StyleValue)
where
    S: Surface + ?Sized,
{
    match next {
        StyleValue::Absent => el.remove_attribute("style"),
        // Empty text counts as no style at all.
        StyleValue::Text(text) if text.is_empty() => el.remove_attribute("style"),
        StyleValue::Text(text) => {
            if !matches!(prev, StyleValue::Text(previous) if previous == text) {
                el.style().set_css_text(text);
            }
        }
        StyleValue::Map(map) => {
            let style = el.style();
            for (name, entry) in map {
                set_entry(prefixes, &style, name, entry.as_ref());
            }
            // A text or absent previous value has no per-property removal list.
            if let StyleValue::Map(previous) = prev {
                for name in previous.keys() {
                    if map.get(name).is_none_or(Option::is_none) {
                        set_style(prefixes, &style, name, "");
                    }
                }
            }
        }
    }
}

fn set_entry<D>(prefixes: &PrefixCache, style: &D, name: &str, entry: Option<&StyleEntry>)
where
    D: StyleDeclaration + ?Sized,
{
    match entry {
        None => set_style(prefixes, style, name, ""),
        Some(StyleEntry::Single(value)) => set_style(prefixes, style, name, value),
        Some(StyleEntry::Many(values)) => {
            for value in values {
                set_style(prefixes, style, name, value);
            }
        }
    }
}

/// Sets a single property on `style`.
///
/// Custom properties (`--name`) are written verbatim. Other names go through
/// the prefix resolver, and a trailing `!important` turns the write into a
/// prioritized `set_property` on the hyphenated name.
pub fn set_style<D>(prefixes: &PrefixCache, style: &D, name: &str, value: &str)
where
    D: StyleDeclaration + ?Sized,
{
    if name.starts_with("--") {
        style.set_property(name, value, Priority::Normal);
        return;
    }

    let resolved = prefixes.resolve(style, name);
    if let Some(stripped) = strip_important(value) {
        style.set_property(&case::wire_name(&resolved), stripped, Priority::Important);
    } else {
        style.assign(&resolved, value);
    }
}

/// Returns `value` without its trailing `!important` marker, or `None` when
/// the marker is missing. Whitespace around the marker is dropped as well.
pub(crate) fn strip_important(value: &str) -> Option<&str> {
    IMPORTANT.find(value).map(|found| &value[..found.start()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryElement, MemoryStyle};

    fn element() -> MemoryElement {
        MemoryElement::new("div")
    }

    #[test]
    fn absent_next_removes_style_attribute() {
        let el = element();
        let cache = PrefixCache::new();
        patch_style_with(&cache, &el, &StyleValue::Absent, &"color: red".into());
        assert!(el.attribute("style").is_some());

        patch_style_with(&cache, &el, &"color: red".into(), &StyleValue::Absent);
        assert!(el.attribute("style").is_none());

        let map = StyleValue::from_iter([("color", "red")]);
        patch_style_with(&cache, &el, &StyleValue::Absent, &map);
        patch_style_with(&cache, &el, &map, &StyleValue::Absent);
        assert!(el.attribute("style").is_none());
    }

    #[test]
    fn empty_text_removes_style_attribute() {
        let el = element();
        let cache = PrefixCache::new();
        let prev = StyleValue::text("color: red");

        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &StyleValue::text(""));

        assert!(el.attribute("style").is_none());
        assert_eq!(el.style().css_text_writes(), 1);

        let parsed = StyleValue::from_json(r#""""#).unwrap();
        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &parsed);
        assert!(el.attribute("style").is_none());
    }

    #[test]
    fn identical_text_is_not_reassigned() {
        let el = element();
        let cache = PrefixCache::new();
        let text = StyleValue::text("color: red; width: 10px");

        patch_style_with(&cache, &el, &StyleValue::Absent, &text);
        assert_eq!(el.style().css_text_writes(), 1);

        patch_style_with(&cache, &el, &text, &text);
        assert_eq!(el.style().css_text_writes(), 1);
        assert_eq!(el.style().get("width").as_deref(), Some("10px"));
    }

    #[test]
    fn text_after_map_is_assigned() {
        let el = element();
        let cache = PrefixCache::new();
        let map = StyleValue::from_iter([("color", "red")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &map);
        patch_style_with(&cache, &el, &map, &"margin: 0".into());

        assert_eq!(el.style().css_text_writes(), 1);
        assert!(el.style().get("color").is_none());
        assert_eq!(el.style().get("margin").as_deref(), Some("0"));
    }

    #[test]
    fn missing_keys_are_removed() {
        let el = element();
        let cache = PrefixCache::new();
        let prev = StyleValue::from_iter([("color", "blue"), ("width", "10px")]);
        let next = StyleValue::from_iter([("color", "red")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &next);

        assert_eq!(el.style().get("color").as_deref(), Some("red"));
        assert!(el.style().get("width").is_none());
    }

    #[test]
    fn null_entries_clear_the_property() {
        let el = element();
        let cache = PrefixCache::new();
        let prev = StyleValue::from_iter([("color", "blue"), ("width", "10px")]);
        let mut map = StyleMap::new();
        map.insert("color".into(), Some("red".into()));
        map.insert("width".into(), None);

        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &StyleValue::Map(map));

        assert!(el.style().get("width").is_none());
        assert_eq!(el.style().get("color").as_deref(), Some("red"));
    }

    #[test]
    fn text_previous_value_is_not_diffed() {
        let el = element();
        let cache = PrefixCache::new();
        let prev = StyleValue::text("color: blue; width: 10px");
        let next = StyleValue::from_iter([("color", "red")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &next);

        assert_eq!(el.style().get("color").as_deref(), Some("red"));
        assert_eq!(el.style().get("width").as_deref(), Some("10px"));
    }

    #[test]
    fn fallback_values_keep_last_accepted() {
        let style = MemoryStyle::new();
        style.reject_value("scale(1.0, 1.0)");
        let el = MemoryElement::with_style("div", style);
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("transform", vec!["scale(1)", "scale(1.0, 1.0)"])]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        assert_eq!(el.style().get("transform").as_deref(), Some("scale(1)"));
        assert_eq!(el.style().assignments(), 2);
    }

    #[test]
    fn fallback_values_are_applied_in_order() {
        let el = element();
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("display", vec!["-webkit-box", "flex"])]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        assert_eq!(el.style().get("display").as_deref(), Some("flex"));
    }

    #[test]
    fn important_values_use_priority_setter() {
        let el = element();
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("marginTop", "10px !important")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        let style = el.style();
        assert_eq!(style.get("margin-top").as_deref(), Some("10px"));
        assert_eq!(style.priority("margin-top"), Some(Priority::Important));
    }

    #[test]
    fn important_marker_is_case_insensitive() {
        let el = element();
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("color", "red   !IMPORTANT  ")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        assert_eq!(el.style().get("color").as_deref(), Some("red"));
        assert_eq!(el.style().priority("color"), Some(Priority::Important));
    }

    #[test]
    fn important_prefixed_property_uses_wire_name() {
        let style = MemoryStyle::with_supported(["WebkitUserSelect"]);
        let el = MemoryElement::with_style("div", style);
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("user-select", "none !important")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        assert_eq!(el.style().get("-webkit-user-select").as_deref(), Some("none"));
        assert_eq!(
            el.style().priority("-webkit-user-select"),
            Some(Priority::Important)
        );
    }

    #[test]
    fn custom_properties_bypass_resolution() {
        let el = element();
        let cache = PrefixCache::new();
        let next = StyleValue::from_iter([("--accent", "#ff0 !important")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &next);

        assert_eq!(el.style().get("--accent").as_deref(), Some("#ff0 !important"));
        assert_eq!(el.style().priority("--accent"), Some(Priority::Normal));
        assert_eq!(el.style().probe_count(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn removed_custom_property_is_cleared() {
        let el = element();
        let cache = PrefixCache::new();
        let prev = StyleValue::from_iter([("--gap", "4px")]);

        patch_style_with(&cache, &el, &StyleValue::Absent, &prev);
        patch_style_with(&cache, &el, &prev, &StyleValue::from_iter([("color", "red")]));

        assert!(el.style().get("--gap").is_none());
    }

    #[test]
    fn prefixed_property_is_assigned() {
        let style = MemoryStyle::with_supported(["WebkitTransform"]);
        let el = MemoryElement::with_style("div", style);
        let cache = PrefixCache::new();

        patch_style_with(
            &cache,
            &el,
            &StyleValue::Absent,
            &StyleValue::from_iter([("transform", "rotate(1deg)")]),
        );

        assert_eq!(
            el.style().get("-webkit-transform").as_deref(),
            Some("rotate(1deg)")
        );
        assert_eq!(cache.cached("transform").as_deref(), Some("WebkitTransform"));
    }

    #[test]
    fn parses_json_shapes() {
        assert_eq!(StyleValue::from_json("null").unwrap(), StyleValue::Absent);
        assert_eq!(
            StyleValue::from_json(r#""color: red""#).unwrap(),
            StyleValue::text("color: red")
        );

        let parsed =
            StyleValue::from_json(r#"{"color":"red","width":null,"display":["-webkit-box","flex"]}"#)
                .unwrap();
        let StyleValue::Map(map) = parsed else {
            panic!("expected a map");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["color", "width", "display"]);
        assert_eq!(map["width"], None);
        assert_eq!(
            map["display"],
            Some(StyleEntry::Many(vec!["-webkit-box".into(), "flex".into()]))
        );
    }

    #[test]
    fn rejects_invalid_json_shapes() {
        let err = StyleValue::from_json("42").unwrap_err();
        assert!(matches!(err, DomError::InvalidStyle(_)));
    }
}
