//! Seams to the renderer engine and the lifecycle of its renderer handle.
//!
//! The engine that diffs virtual trees is not part of this crate. It plugs in
//! through [`RendererFactory`], which builds a [`Renderer`] from the
//! [`RendererOptions`] this crate supplies. [`RendererCell`] owns the single
//! handle and upgrades it to hydration on demand.

mod lifecycle;

use std::rc::Rc;

pub use lifecycle::{RendererCell, RendererMode};

use crate::{
    style::{PrefixCache, StyleValue, patch_style_with},
    surface::Surface,
};

/// Construction capability supplied by the renderer engine.
pub trait RendererFactory {
    /// Element type the engine renders into.
    type Element: Surface;
    /// Renderer handle type produced by both constructors.
    type Renderer: Renderer<Element = Self::Element>;

    /// Builds a renderer that always renders from scratch.
    fn create_renderer(&self, options: &RendererOptions) -> Self::Renderer;

    /// Builds a renderer that can adopt existing markup.
    fn create_hydration_renderer(&self, options: &RendererOptions) -> Self::Renderer;
}

/// Renderer handle produced by a [`RendererFactory`].
pub trait Renderer {
    /// Element type the renderer writes into.
    type Element: Surface;
    /// Virtual tree accepted by [`Renderer::render`] and [`Renderer::hydrate`].
    type Tree;
    /// Root component definition passed to [`Renderer::create_app`].
    type Component: RootComponent;
    /// Root props passed to [`Renderer::create_app`].
    type Props;
    /// Application instance created by [`Renderer::create_app`].
    type App: AppInstance<Element = Self::Element, Component = Self::Component>;

    /// Renders `tree` into `container`. `None` unmounts whatever is there.
    fn render(&self, tree: Option<Self::Tree>, container: &Self::Element);

    /// Adopts the markup already inside `container` for `tree`.
    fn hydrate(&self, tree: Self::Tree, container: &Self::Element);

    /// Creates an application instance for `root`.
    fn create_app(&self, root: Self::Component, props: Option<Self::Props>) -> Self::App;
}

/// Application instance created by a [`Renderer`].
pub trait AppInstance {
    /// Element type the app mounts into.
    type Element: Surface;
    /// Root component definition.
    type Component: RootComponent;
    /// Handle returned by a successful mount.
    type Instance;

    /// Mutable access to the root component definition.
    fn component_mut(&mut self) -> &mut Self::Component;

    /// Installs the predicate the engine uses to tell platform tags from
    /// component names.
    fn set_native_tag_check(&mut self, check: fn(&str) -> bool);

    /// Mounts the app into `container`. With `hydrate` set the engine adopts
    /// the existing markup instead of rendering from scratch.
    fn mount(&mut self, container: &Self::Element, hydrate: bool) -> Self::Instance;
}

/// The parts of a root component definition the mount wrapper inspects.
pub trait RootComponent {
    /// Returns `true` when the component brings its own render function
    /// (functional components included).
    fn has_render(&self) -> bool;

    /// Returns the component's template source, if any.
    fn template(&self) -> Option<&str>;

    /// Replaces the component's template source.
    fn set_template(&mut self, template: String);
}

/// Platform operations handed to the engine when a renderer is built.
///
/// The engine calls [`RendererOptions::patch_style`] whenever the `style` prop
/// of an element changes between two trees.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    prefixes: Rc<PrefixCache>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self::new(PrefixCache::global())
    }
}

impl RendererOptions {
    /// Creates options that resolve vendor prefixes through `prefixes`.
    #[must_use]
    pub const fn new(prefixes: Rc<PrefixCache>) -> Self {
        Self { prefixes }
    }

    /// The prefix cache used by the style patcher.
    #[must_use]
    pub fn prefixes(&self) -> &PrefixCache {
        &self.prefixes
    }

    /// Reconciles the inline style of `el` from `prev` to `next`.
    pub fn patch_style<S>(&self, el: &S, prev: &StyleValue, next: &StyleValue)
    where
        S: Surface + ?Sized,
    {
        tracing::trace!("patching inline style");
        patch_style_with(&self.prefixes, el, prev, next);
    }
}

/// Renderer handle type of a factory.
pub type RendererOf<F> = <F as RendererFactory>::Renderer;
/// Virtual tree type of a factory's renderer.
pub type TreeOf<F> = <RendererOf<F> as Renderer>::Tree;
/// Root component type of a factory's renderer.
pub type ComponentOf<F> = <RendererOf<F> as Renderer>::Component;
/// Root props type of a factory's renderer.
pub type PropsOf<F> = <RendererOf<F> as Renderer>::Props;
/// Application instance type of a factory's renderer.
pub type AppOf<F> = <RendererOf<F> as Renderer>::App;
