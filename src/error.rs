use thiserror::Error;

/// Error type produced by the DOM binding.
///
/// None of the public rendering entry points return it: DOM failures are
/// logged and absorbed. It surfaces from helpers such as
/// [`StyleValue::from_json`](crate::style::StyleValue::from_json) and from the
/// web surface's internal plumbing.
#[derive(Debug, Error)]
pub enum DomError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
    /// A style value did not have one of the accepted shapes.
    #[error("invalid style value: {0}")]
    InvalidStyle(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}
