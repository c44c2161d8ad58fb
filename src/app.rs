//! Mount wrapper around the engine's application instance.
//!
//! [`DomApp`] resolves the mount target against a [`Document`], prepares the
//! container according to its [`MountMode`] and then hands it to the engine.

use core::fmt;
use std::rc::Rc;

use crate::{
    config::DomConfig,
    renderer::{AppInstance, RootComponent},
    surface::{Document, Surface},
    tags::is_native_tag,
};

/// Where an application should be mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget<E> {
    /// A live element.
    Element(E),
    /// A selector resolved against the document at mount time.
    Selector(String),
}

impl<E> From<&str> for MountTarget<E> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl<E> From<String> for MountTarget<E> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// How [`DomApp::mount`] treats the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountMode {
    /// Clear the container and render from scratch.
    Render,
    /// Adopt the server-rendered markup already in the container.
    Hydrate,
}

/// Application returned by [`DomRuntime::create_app`](crate::DomRuntime::create_app)
/// and [`DomRuntime::create_ssr_app`](crate::DomRuntime::create_ssr_app).
///
/// Wraps the engine's application instance and takes care of the DOM side of
/// mounting: resolving the container, seeding the template, clearing markup
/// and marking the root.
pub struct DomApp<A, D> {
    app: A,
    document: Rc<D>,
    config: DomConfig,
    mode: MountMode,
}

impl<A, D> fmt::Debug for DomApp<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomApp")
            .field("mode", &self.mode)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A, D> DomApp<A, D>
where
    A: AppInstance,
    D: Document<Element = A::Element>,
{
    pub(crate) fn new(mut app: A, document: Rc<D>, config: DomConfig, mode: MountMode) -> Self {
        if config.dev_diagnostics() {
            app.set_native_tag_check(is_native_tag);
        }
        Self {
            app,
            document,
            config,
            mode,
        }
    }

    /// Mounts the application into `target`.
    ///
    /// Returns `None` without touching the document when a selector matches
    /// nothing. In [`MountMode::Render`] a root component without render
    /// function or template adopts the container's markup as its template,
    /// the container is cleared, and after mounting the cloak attribute is
    /// removed and the app marker attribute set. [`MountMode::Hydrate`] hands
    /// the container to the engine untouched.
    pub fn mount(&mut self, target: impl Into<MountTarget<A::Element>>) -> Option<A::Instance> {
        let container = normalize_container(
            self.document.as_ref(),
            target.into(),
            self.config.dev_diagnostics(),
        )?;

        match self.mode {
            MountMode::Hydrate => Some(self.app.mount(&container, true)),
            MountMode::Render => {
                let component = self.app.component_mut();
                if !component.has_render() && component.template().is_none_or(str::is_empty) {
                    component.set_template(container.inner_html());
                }

                container.set_inner_html("");
                let instance = self.app.mount(&container, false);
                container.remove_attribute(self.config.cloak_attribute());
                container.set_attribute(self.config.app_marker_attribute(), "");
                Some(instance)
            }
        }
    }

    /// How this app mounts.
    #[must_use]
    pub const fn mode(&self) -> MountMode {
        self.mode
    }

    /// Provides access to the engine's application instance.
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.app
    }

    /// Provides mutable access to the engine's application instance.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.app
    }

    /// Unwraps the engine's application instance.
    #[must_use]
    pub fn into_inner(self) -> A {
        self.app
    }
}

/// Resolves a mount target to a live element.
///
/// A selector that matches nothing yields `None`, with a warning when
/// `diagnostics` is set.
pub fn normalize_container<D: Document>(
    document: &D,
    target: MountTarget<D::Element>,
    diagnostics: bool,
) -> Option<D::Element> {
    match target {
        MountTarget::Element(element) => Some(element),
        MountTarget::Selector(selector) => {
            let found = document.query_selector(&selector);
            if diagnostics && found.is_none() {
                tracing::warn!(
                    selector = %selector,
                    "Failed to mount app: mount target selector returned null."
                );
            }
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryElement};
    use crate::renderer::testing::{TestApp, TestComponent};

    fn app(component: TestComponent, hydration: bool) -> TestApp {
        TestApp {
            component,
            props: None,
            hydration,
            native_tag_check: None,
            mounts: Vec::new(),
        }
    }

    fn document_with_root(markup: &str) -> (Rc<MemoryDocument>, MemoryElement) {
        let document = MemoryDocument::new();
        let root = MemoryElement::new("div")
            .with_attribute("id", "app")
            .with_attribute("v-cloak", "")
            .with_inner_html(markup);
        document.insert(root.clone());
        (Rc::new(document), root)
    }

    fn config() -> DomConfig {
        DomConfig::builder().dev_diagnostics(true).build()
    }

    #[test]
    fn render_mount_seeds_template_and_clears_markup() {
        let (document, root) = document_with_root("<p>{{ msg }}</p>");
        let mut dom_app = DomApp::new(
            app(TestComponent::default(), false),
            document,
            config(),
            MountMode::Render,
        );

        let instance = dom_app.mount("#app");

        assert_eq!(instance, Some(1));
        let inner = dom_app.inner();
        assert_eq!(inner.component.template.as_deref(), Some("<p>{{ msg }}</p>"));
        assert_eq!(inner.mounts, vec![(false, String::new())]);
        assert_eq!(root.inner_html(), "");
        assert!(root.attribute("v-cloak").is_none());
        assert_eq!(root.attribute("data-v-app").as_deref(), Some(""));
    }

    #[test]
    fn existing_template_is_kept() {
        let (document, _root) = document_with_root("<p>server</p>");
        let component = TestComponent {
            render: false,
            template: Some("<b>own</b>".into()),
        };
        let mut dom_app = DomApp::new(app(component, false), document, config(), MountMode::Render);

        dom_app.mount("#app");

        assert_eq!(dom_app.inner().component.template.as_deref(), Some("<b>own</b>"));
    }

    #[test]
    fn render_function_skips_template() {
        let (document, _root) = document_with_root("<p>server</p>");
        let component = TestComponent {
            render: true,
            template: None,
        };
        let mut dom_app = DomApp::new(app(component, false), document, config(), MountMode::Render);

        dom_app.mount("#app");

        assert!(dom_app.inner().component.template.is_none());
    }

    #[test]
    fn unresolved_selector_is_a_silent_no_op() {
        let (document, root) = document_with_root("<p>keep</p>");
        let mut dom_app = DomApp::new(
            app(TestComponent::default(), false),
            document,
            config(),
            MountMode::Render,
        );

        assert_eq!(dom_app.mount("#missing"), None);
        assert!(dom_app.inner().mounts.is_empty());
        assert!(dom_app.inner().component.template.is_none());
        assert_eq!(root.inner_html(), "<p>keep</p>");
        assert!(root.attribute("data-v-app").is_none());
    }

    #[test]
    fn element_targets_skip_lookup() {
        let document = Rc::new(MemoryDocument::new());
        let detached = MemoryElement::new("main").with_inner_html("<i>x</i>");
        let mut dom_app = DomApp::new(
            app(TestComponent::default(), false),
            document,
            config(),
            MountMode::Render,
        );

        assert_eq!(dom_app.mount(MountTarget::Element(detached.clone())), Some(1));
        assert_eq!(detached.inner_html(), "");
    }

    #[test]
    fn hydrate_mount_preserves_markup() {
        let (document, root) = document_with_root("<p>server</p>");
        let mut dom_app = DomApp::new(
            app(TestComponent::default(), true),
            document,
            config(),
            MountMode::Hydrate,
        );

        assert_eq!(dom_app.mount("#app"), Some(1));
        let inner = dom_app.inner();
        assert_eq!(inner.mounts, vec![(true, "<p>server</p>".to_owned())]);
        assert!(inner.component.template.is_none());
        assert_eq!(root.inner_html(), "<p>server</p>");
        assert_eq!(root.attribute("v-cloak").as_deref(), Some(""));
        assert!(root.attribute("data-v-app").is_none());
    }

    #[test]
    fn hydrate_mount_with_unresolved_selector_returns_none() {
        let (document, root) = document_with_root("<p>server</p>");
        let mut dom_app = DomApp::new(
            app(TestComponent::default(), true),
            document,
            config(),
            MountMode::Hydrate,
        );

        assert_eq!(dom_app.mount(".nowhere"), None);
        assert!(dom_app.inner().mounts.is_empty());
        assert_eq!(root.inner_html(), "<p>server</p>");
    }

    #[test]
    fn native_tag_check_follows_diagnostics() {
        let (document, _root) = document_with_root("");
        let with_check = DomApp::new(
            app(TestComponent::default(), false),
            Rc::clone(&document),
            config(),
            MountMode::Render,
        );
        let check = with_check.inner().native_tag_check.expect("check installed");
        assert!(check("div"));
        assert!(check("svg"));
        assert!(!check("TodoList"));

        let quiet = DomConfig::builder().dev_diagnostics(false).build();
        let without = DomApp::new(
            app(TestComponent::default(), false),
            document,
            quiet,
            MountMode::Render,
        );
        assert!(without.inner().native_tag_check.is_none());
    }
}
