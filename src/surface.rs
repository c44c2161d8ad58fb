//! Traits describing the mutable display surface the renderer writes into.
//!
//! The browser implementation lives in [`crate::web`]; [`crate::memory`]
//! provides a headless implementation used on native targets and in tests.

/// Priority flag passed to [`StyleDeclaration::set_property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Regular cascade precedence.
    #[default]
    Normal,
    /// The declaration carries the `important` annotation.
    Important,
}

impl Priority {
    /// Returns the priority string understood by `CSSStyleDeclaration.setProperty`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Important => "important",
        }
    }
}

/// The live inline style object of a surface element.
///
/// Every mutating call is infallible: a surface silently ignores property
/// names or values it does not understand.
pub trait StyleDeclaration {
    /// Returns `true` when `name` is a property known to this style object.
    fn supports(&self, name: &str) -> bool;

    /// Assigns `value` to the property `name` as a plain value.
    fn assign(&self, name: &str, value: &str);

    /// Sets a property by its hyphenated name with an explicit priority.
    fn set_property(&self, name: &str, value: &str, priority: Priority);

    /// Replaces the entire declaration block with `text`.
    fn set_css_text(&self, text: &str);
}

/// A live element that owns an inline style object and markup.
pub trait Surface {
    /// Style object handle returned by [`Surface::style`].
    type Style: StyleDeclaration;

    /// Returns a handle to the element's live style object.
    fn style(&self) -> Self::Style;

    /// Sets an attribute on the element.
    fn set_attribute(&self, name: &str, value: &str);

    /// Removes an attribute from the element. Missing attributes are ignored.
    fn remove_attribute(&self, name: &str);

    /// Returns the element's current inner markup.
    fn inner_html(&self) -> String;

    /// Replaces the element's inner markup.
    fn set_inner_html(&self, html: &str);
}

/// Resolves selector strings to live elements of the current document.
pub trait Document {
    /// Element type produced by selector lookups.
    type Element: Surface;

    /// Returns the first element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
}
