//! Runtime configuration for the DOM binding.

/// Attribute removed from a mount target after the first render.
pub const DEFAULT_CLOAK_ATTRIBUTE: &str = "v-cloak";

/// Attribute marking the root element of a managed application.
pub const DEFAULT_APP_MARKER_ATTRIBUTE: &str = "data-v-app";

/// Settings shared by every application created from a [`DomRuntime`](crate::DomRuntime).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomConfig {
    dev_diagnostics: bool,
    cloak_attribute: String,
    app_marker_attribute: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        DomConfigBuilder::new().build()
    }
}

impl DomConfig {
    /// Starts a [`DomConfigBuilder`].
    #[must_use]
    pub const fn builder() -> DomConfigBuilder {
        DomConfigBuilder::new()
    }

    /// Whether development diagnostics (mount warnings, native tag check) are on.
    #[must_use]
    pub const fn dev_diagnostics(&self) -> bool {
        self.dev_diagnostics
    }

    /// Attribute stripped from the container once the app has mounted.
    #[must_use]
    pub fn cloak_attribute(&self) -> &str {
        &self.cloak_attribute
    }

    /// Attribute set on the container once the app has mounted.
    #[must_use]
    pub fn app_marker_attribute(&self) -> &str {
        &self.app_marker_attribute
    }
}

/// Builder for [`DomConfig`].
#[derive(Debug, Clone)]
pub struct DomConfigBuilder {
    dev_diagnostics: bool,
    cloak_attribute: Option<String>,
    app_marker_attribute: Option<String>,
}

impl Default for DomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DomConfigBuilder {
    /// Creates a builder. Diagnostics default to on in debug builds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dev_diagnostics: cfg!(debug_assertions),
            cloak_attribute: None,
            app_marker_attribute: None,
        }
    }

    /// Turns development diagnostics on or off.
    #[must_use]
    pub const fn dev_diagnostics(mut self, enabled: bool) -> Self {
        self.dev_diagnostics = enabled;
        self
    }

    /// Overrides the cloak attribute name.
    #[must_use]
    pub fn with_cloak_attribute(mut self, name: impl Into<String>) -> Self {
        self.cloak_attribute = Some(name.into());
        self
    }

    /// Overrides the app marker attribute name.
    #[must_use]
    pub fn with_app_marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.app_marker_attribute = Some(name.into());
        self
    }

    /// Finalises the builder.
    #[must_use]
    pub fn build(self) -> DomConfig {
        DomConfig {
            dev_diagnostics: self.dev_diagnostics,
            cloak_attribute: self
                .cloak_attribute
                .unwrap_or_else(|| DEFAULT_CLOAK_ATTRIBUTE.to_owned()),
            app_marker_attribute: self
                .app_marker_attribute
                .unwrap_or_else(|| DEFAULT_APP_MARKER_ATTRIBUTE.to_owned()),
        }
    }
}
