//! Browser surface built on `web-sys`.
//!
//! DOM exceptions never reach the renderer: they are converted to
//! [`DomError`], logged and dropped.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Element};

use crate::{
    error::DomError,
    surface::{Document, Priority, StyleDeclaration, Surface},
};

/// The browser document of the current window.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Option<web_sys::Document>,
}

impl Default for WebDocument {
    fn default() -> Self {
        match Self::from_window() {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(error = %err, "no browser document, selectors will not resolve");
                Self { document: None }
            }
        }
    }
}

impl WebDocument {
    /// Wraps the document of the current window.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::DomUnavailable`] outside of a browser.
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::DomUnavailable)?;
        let document = window.document().ok_or(DomError::DomUnavailable)?;
        Ok(Self::new(document))
    }

    /// Wraps an existing document.
    #[must_use]
    pub const fn new(document: web_sys::Document) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// Returns the wrapped document, if any.
    #[must_use]
    pub const fn raw(&self) -> Option<&web_sys::Document> {
        self.document.as_ref()
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        let document = self.document.as_ref()?;
        match document.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(err) => {
                tracing::debug!(selector, error = %DomError::from(err), "invalid selector");
                None
            }
        }
    }
}

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(pub Element);

impl WebElement {
    /// Returns the wrapped element.
    #[must_use]
    pub const fn raw(&self) -> &Element {
        &self.0
    }
}

impl From<Element> for WebElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl Surface for WebElement {
    type Style = WebStyle;

    fn style(&self) -> WebStyle {
        // SVG and MathML elements expose `style` too, so read it off the object.
        let style = Reflect::get(&self.0, &JsValue::from_str("style"))
            .map_err(DomError::from)
            .and_then(|value| {
                value
                    .dyn_into::<CssStyleDeclaration>()
                    .map_err(DomError::from)
            });
        match style {
            Ok(style) => WebStyle(Some(style)),
            Err(err) => {
                tracing::debug!(error = %err, "element has no inline style object");
                WebStyle(None)
            }
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            log_failure("setAttribute", name, err);
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.0.remove_attribute(name) {
            log_failure("removeAttribute", name, err);
        }
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

/// Inline style object of a [`WebElement`]. Empty when the element has none.
#[derive(Debug, Clone)]
pub struct WebStyle(Option<CssStyleDeclaration>);

impl StyleDeclaration for WebStyle {
    fn supports(&self, name: &str) -> bool {
        self.0.as_ref().is_some_and(|style| {
            Reflect::has(style, &JsValue::from_str(name)).unwrap_or(false)
        })
    }

    fn assign(&self, name: &str, value: &str) {
        let Some(style) = &self.0 else { return };
        if let Err(err) = Reflect::set(style, &JsValue::from_str(name), &JsValue::from_str(value)) {
            log_failure("style assignment", name, err);
        }
    }

    fn set_property(&self, name: &str, value: &str, priority: Priority) {
        let Some(style) = &self.0 else { return };
        if let Err(err) = style.set_property_with_priority(name, value, priority.as_str()) {
            log_failure("setProperty", name, err);
        }
    }

    fn set_css_text(&self, text: &str) {
        if let Some(style) = &self.0 {
            style.set_css_text(text);
        }
    }
}

fn log_failure(operation: &str, name: &str, err: JsValue) {
    tracing::warn!(operation, name, error = %DomError::from(err), "DOM call failed");
}
