//! Headless document, element and style object.
//!
//! These types implement the [`surface`](crate::surface) traits without a
//! browser. They back server-side and native usage and double as test
//! instruments: a [`MemoryStyle`] counts support probes and writes, and can be
//! told to reject specific values the way a browser drops values it does not
//! understand.

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

use indexmap::IndexMap;

use crate::{
    style::{case::wire_name, strip_important},
    surface::{Document, Priority, StyleDeclaration, Surface},
};

/// Camel-case properties a [`MemoryStyle::new`] style object supports.
pub const STANDARD_PROPERTIES: &[&str] = &[
    "alignItems",
    "animation",
    "background",
    "backgroundColor",
    "border",
    "borderColor",
    "borderRadius",
    "borderWidth",
    "bottom",
    "boxShadow",
    "boxSizing",
    "color",
    "cursor",
    "display",
    "filter",
    "flex",
    "flexDirection",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "gap",
    "height",
    "justifyContent",
    "left",
    "lineHeight",
    "margin",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "marginTop",
    "opacity",
    "overflow",
    "padding",
    "position",
    "right",
    "textAlign",
    "top",
    "transform",
    "transition",
    "visibility",
    "width",
    "zIndex",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    value: String,
    priority: Priority,
}

#[derive(Debug)]
struct StyleState {
    supported: HashSet<String>,
    rejected: RefCell<HashSet<String>>,
    declarations: RefCell<IndexMap<String, Declaration>>,
    present: Cell<bool>,
    probes: Cell<usize>,
    assignments: Cell<usize>,
    css_text_writes: Cell<usize>,
}

/// In-memory inline style object.
///
/// Declarations are stored under their hyphenated name, so `backgroundColor`
/// and `background-color` address the same entry. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryStyle {
    state: Rc<StyleState>,
}

impl Default for MemoryStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStyle {
    /// Creates a style object supporting [`STANDARD_PROPERTIES`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_supported(STANDARD_PROPERTIES.iter().copied())
    }

    /// Creates a style object that supports exactly `properties`
    /// (camel-case, including vendor-prefixed names such as `WebkitTransform`).
    pub fn with_supported<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Rc::new(StyleState {
                supported: properties.into_iter().map(Into::into).collect(),
                rejected: RefCell::default(),
                declarations: RefCell::default(),
                present: Cell::new(false),
                probes: Cell::new(0),
                assignments: Cell::new(0),
                css_text_writes: Cell::new(0),
            }),
        }
    }

    /// Makes every later write of exactly `value` a silent no-op.
    pub fn reject_value(&self, value: impl Into<String>) {
        self.state.rejected.borrow_mut().insert(value.into());
    }

    /// Returns the value currently declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.state
            .declarations
            .borrow()
            .get(&wire_name(name))
            .map(|declaration| declaration.value.clone())
    }

    /// Returns the priority currently declared for `name`.
    #[must_use]
    pub fn priority(&self, name: &str) -> Option<Priority> {
        self.state
            .declarations
            .borrow()
            .get(&wire_name(name))
            .map(|declaration| declaration.priority)
    }

    /// Serializes the declaration block the way `cssText` reads back.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.state
            .declarations
            .borrow()
            .iter()
            .map(|(name, declaration)| match declaration.priority {
                Priority::Normal => format!("{name}: {};", declaration.value),
                Priority::Important => format!("{name}: {} !important;", declaration.value),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns `true` while the owning element carries a `style` attribute.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.state.present.get()
    }

    /// Number of [`StyleDeclaration::supports`] calls so far.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.state.probes.get()
    }

    /// Number of property writes attempted, rejected ones included.
    #[must_use]
    pub fn assignments(&self) -> usize {
        self.state.assignments.get()
    }

    /// Number of [`StyleDeclaration::set_css_text`] calls so far.
    #[must_use]
    pub fn css_text_writes(&self) -> usize {
        self.state.css_text_writes.get()
    }

    fn clear(&self) {
        self.state.declarations.borrow_mut().clear();
        self.state.present.set(false);
    }

    fn write(&self, name: String, value: &str, priority: Priority) {
        self.state.assignments.set(self.state.assignments.get() + 1);
        if self.state.rejected.borrow().contains(value) {
            return;
        }
        self.state.present.set(true);
        let mut declarations = self.state.declarations.borrow_mut();
        if value.is_empty() {
            declarations.shift_remove(&name);
        } else {
            declarations.insert(
                name,
                Declaration {
                    value: value.to_owned(),
                    priority,
                },
            );
        }
    }
}

impl StyleDeclaration for MemoryStyle {
    fn supports(&self, name: &str) -> bool {
        self.state.probes.set(self.state.probes.get() + 1);
        self.state.supported.contains(name)
    }

    fn assign(&self, name: &str, value: &str) {
        self.write(wire_name(name), value, Priority::Normal);
    }

    fn set_property(&self, name: &str, value: &str, priority: Priority) {
        self.write(name.to_owned(), value, priority);
    }

    fn set_css_text(&self, text: &str) {
        self.state
            .css_text_writes
            .set(self.state.css_text_writes.get() + 1);
        self.clear();
        self.state.present.set(true);

        let mut declarations = self.state.declarations.borrow_mut();
        for chunk in text.split(';') {
            let Some((name, value)) = chunk.split_once(':') else {
                continue;
            };
            let (value, priority) = match strip_important(value) {
                Some(stripped) => (stripped, Priority::Important),
                None => (value, Priority::Normal),
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            declarations.insert(
                name.to_owned(),
                Declaration {
                    value: value.to_owned(),
                    priority,
                },
            );
        }
    }
}

#[derive(Debug)]
struct ElementState {
    tag: String,
    attributes: RefCell<IndexMap<String, String>>,
    inner_html: RefCell<String>,
    style: MemoryStyle,
}

/// In-memory element. Clones refer to the same element.
#[derive(Debug, Clone)]
pub struct MemoryElement {
    state: Rc<ElementState>,
}

impl MemoryElement {
    /// Creates an element with a default [`MemoryStyle`].
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_style(tag, MemoryStyle::new())
    }

    /// Creates an element backed by the given style object.
    #[must_use]
    pub fn with_style(tag: impl Into<String>, style: MemoryStyle) -> Self {
        Self {
            state: Rc::new(ElementState {
                tag: tag.into(),
                attributes: RefCell::default(),
                inner_html: RefCell::default(),
                style,
            }),
        }
    }

    /// Sets an attribute and returns the element, for building fixtures.
    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets the inner markup and returns the element, for building fixtures.
    #[must_use]
    pub fn with_inner_html(self, html: &str) -> Self {
        self.set_inner_html(html);
        self
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.state.tag
    }

    /// Reads an attribute. `style` reflects the live style object.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        if name == "style" {
            let style = &self.state.style;
            return style.is_present().then(|| style.css_text());
        }
        self.state.attributes.borrow().get(name).cloned()
    }

    /// Returns `true` when both handles refer to the same element.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return self.attribute("id").as_deref() == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self
                .attribute("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class));
        }
        self.state.tag.eq_ignore_ascii_case(selector)
    }
}

impl Surface for MemoryElement {
    type Style = MemoryStyle;

    fn style(&self) -> MemoryStyle {
        self.state.style.clone()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if name == "style" {
            self.state.style.set_css_text(value);
            return;
        }
        self.state
            .attributes
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&self, name: &str) {
        if name == "style" {
            self.state.style.clear();
            return;
        }
        self.state.attributes.borrow_mut().shift_remove(name);
    }

    fn inner_html(&self) -> String {
        self.state.inner_html.borrow().clone()
    }

    fn set_inner_html(&self, html: &str) {
        *self.state.inner_html.borrow_mut() = html.to_owned();
    }
}

/// In-memory document holding a flat list of elements.
///
/// Selector lookups understand `#id`, `.class` and bare tag names and return
/// the first match in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Rc<RefCell<Vec<MemoryElement>>>,
}

impl MemoryDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element to the document.
    pub fn insert(&self, element: MemoryElement) {
        self.elements.borrow_mut().push(element);
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns `true` when the document holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        let selector = selector.trim();
        self.elements
            .borrow()
            .iter()
            .find(|element| element.matches(selector))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_and_hyphenated_names_share_a_declaration() {
        let style = MemoryStyle::new();
        style.assign("backgroundColor", "red");
        assert_eq!(style.get("background-color").as_deref(), Some("red"));
        assert_eq!(style.css_text(), "background-color: red;");
    }

    #[test]
    fn css_text_round_trips_priority() {
        let style = MemoryStyle::new();
        style.set_css_text("color: red !important; width: 10px");
        assert_eq!(style.priority("color"), Some(Priority::Important));
        assert_eq!(style.get("width").as_deref(), Some("10px"));
        assert_eq!(style.css_text(), "color: red !important; width: 10px;");
    }

    #[test]
    fn empty_value_removes_declaration() {
        let style = MemoryStyle::new();
        style.assign("color", "red");
        style.assign("color", "");
        assert!(style.get("color").is_none());
    }

    #[test]
    fn style_attribute_tracks_presence() {
        let el = MemoryElement::new("div");
        assert!(el.attribute("style").is_none());
        el.set_attribute("style", "color: red");
        assert_eq!(el.attribute("style").as_deref(), Some("color: red;"));
        el.remove_attribute("style");
        assert!(el.attribute("style").is_none());
    }

    #[test]
    fn selectors_match_id_class_and_tag() {
        let doc = MemoryDocument::new();
        let app = MemoryElement::new("div").with_attribute("id", "app");
        let card = MemoryElement::new("section").with_attribute("class", "card wide");
        doc.insert(app.clone());
        doc.insert(card.clone());

        assert!(doc.query_selector("#app").is_some_and(|el| el.ptr_eq(&app)));
        assert!(doc.query_selector(".wide").is_some_and(|el| el.ptr_eq(&card)));
        assert!(doc.query_selector("section").is_some_and(|el| el.ptr_eq(&card)));
        assert!(doc.query_selector("#missing").is_none());
    }
}
