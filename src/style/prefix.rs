//! Vendor prefix resolution with a memoizing cache.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::case::{camelize, capitalize};
use crate::surface::StyleDeclaration;

/// Engine prefixes probed, in priority order, when a property is not
/// supported under its standard name.
pub const VENDOR_PREFIXES: [&str; 3] = ["Webkit", "Moz", "ms"];

thread_local! {
    static GLOBAL_PREFIXES: Rc<PrefixCache> = Rc::new(PrefixCache::new());
}

/// Memoization table mapping raw property names to the name a style object
/// actually supports.
///
/// Only confirmed resolutions are stored. A name that no variant supports is
/// returned unchanged and probed again on the next lookup, so a guess never
/// poisons the table for surfaces that do support the property.
#[derive(Debug, Default)]
pub struct PrefixCache {
    resolved: RefCell<HashMap<String, String>>,
}

impl PrefixCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache shared by every renderer on this thread.
    #[must_use]
    pub fn global() -> Rc<Self> {
        GLOBAL_PREFIXES.with(Rc::clone)
    }

    /// Resolves `raw` to the property name `style` supports.
    ///
    /// The standard camel-case name wins, except for `filter`, which is never
    /// accepted directly. Otherwise `Webkit`, `Moz` and `ms` variants are
    /// probed in order. When nothing matches the raw name is returned and
    /// nothing is cached.
    pub fn resolve<D>(&self, style: &D, raw: &str) -> String
    where
        D: StyleDeclaration + ?Sized,
    {
        let cached = self.resolved.borrow().get(raw).cloned();
        if let Some(cached) = cached {
            return cached;
        }

        let name = camelize(raw);
        // `filter` collides with a legacy surface feature of the same name.
        if name != "filter" && style.supports(&name) {
            return self.remember(raw, name);
        }

        let capitalized = capitalize(&name);
        for prefix in VENDOR_PREFIXES {
            let prefixed = format!("{prefix}{capitalized}");
            if style.supports(&prefixed) {
                return self.remember(raw, prefixed);
            }
        }

        tracing::trace!(property = raw, "no supported variant, leaving unresolved");
        raw.to_owned()
    }

    /// Returns the cached resolution for `raw`, if one exists.
    #[must_use]
    pub fn cached(&self, raw: &str) -> Option<String> {
        self.resolved.borrow().get(raw).cloned()
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.borrow().len()
    }

    /// Returns `true` when nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.borrow().is_empty()
    }

    fn remember(&self, raw: &str, resolved: String) -> String {
        tracing::debug!(property = raw, resolved = %resolved, "resolved style property");
        self.resolved
            .borrow_mut()
            .insert(raw.to_owned(), resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStyle;

    #[test]
    fn standard_name_is_cached_unprefixed() {
        let cache = PrefixCache::new();
        let style = MemoryStyle::with_supported(["backgroundColor"]);

        assert_eq!(cache.resolve(&style, "background-color"), "backgroundColor");
        assert_eq!(cache.cached("background-color").as_deref(), Some("backgroundColor"));
    }

    #[test]
    fn prefixed_variant_is_cached_and_not_probed_again() {
        let cache = PrefixCache::new();
        let style = MemoryStyle::with_supported(["MozUserSelect"]);

        assert_eq!(cache.resolve(&style, "user-select"), "MozUserSelect");
        // userSelect, WebkitUserSelect, MozUserSelect
        assert_eq!(style.probe_count(), 3);

        assert_eq!(cache.resolve(&style, "user-select"), "MozUserSelect");
        assert_eq!(style.probe_count(), 3);
    }

    #[test]
    fn webkit_wins_over_later_prefixes() {
        let cache = PrefixCache::new();
        let style = MemoryStyle::with_supported(["WebkitTransform", "msTransform"]);

        assert_eq!(cache.resolve(&style, "transform"), "WebkitTransform");
    }

    #[test]
    fn unresolved_names_are_not_cached() {
        let cache = PrefixCache::new();
        let style = MemoryStyle::with_supported(["color"]);

        assert_eq!(cache.resolve(&style, "made-up"), "made-up");
        assert!(cache.cached("made-up").is_none());
        assert!(cache.is_empty());

        let probes = style.probe_count();
        cache.resolve(&style, "made-up");
        assert_eq!(style.probe_count(), probes * 2);
    }

    #[test]
    fn filter_is_never_cached_as_standard() {
        let cache = PrefixCache::new();
        let style = MemoryStyle::with_supported(["filter"]);

        assert_eq!(cache.resolve(&style, "filter"), "filter");
        assert!(cache.cached("filter").is_none());

        let prefixed = MemoryStyle::with_supported(["filter", "WebkitFilter"]);
        assert_eq!(cache.resolve(&prefixed, "filter"), "WebkitFilter");
        assert_eq!(cache.cached("filter").as_deref(), Some("WebkitFilter"));
    }

    #[test]
    fn global_cache_is_shared() {
        let first = PrefixCache::global();
        let second = PrefixCache::global();
        assert!(Rc::ptr_eq(&first, &second));
    }
}
