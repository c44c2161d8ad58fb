//! Entry points tying a renderer engine to a document.
//!
//! [`DomRuntime`] is the explicit form: it owns a [`RendererCell`], the
//! document used to resolve mount selectors and the [`DomConfig`]. The free
//! functions in this module go through a thread-wide runtime per
//! engine/document pair, created from `Default` on first use.

use core::{
    any::{Any, TypeId},
    fmt,
};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    app::{DomApp, MountMode},
    config::DomConfig,
    renderer::{
        AppOf, ComponentOf, PropsOf, Renderer, RendererCell, RendererFactory, RendererOptions,
        TreeOf,
    },
    surface::Document,
};

thread_local! {
    static RUNTIMES: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// A renderer engine bound to a document.
pub struct DomRuntime<F: RendererFactory, D> {
    renderers: RendererCell<F>,
    document: Rc<D>,
    config: DomConfig,
}

impl<F: RendererFactory, D> fmt::Debug for DomRuntime<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomRuntime")
            .field("renderers", &self.renderers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<F, D> DomRuntime<F, D>
where
    F: RendererFactory,
    D: Document<Element = F::Element>,
{
    /// Creates a runtime whose style patcher uses the shared prefix cache.
    #[must_use]
    pub fn new(factory: F, document: D, config: DomConfig) -> Self {
        Self::with_options(factory, document, config, RendererOptions::default())
    }

    /// Creates a runtime that hands `options` to the engine.
    #[must_use]
    pub fn with_options(
        factory: F,
        document: D,
        config: DomConfig,
        options: RendererOptions,
    ) -> Self {
        Self {
            renderers: RendererCell::new(factory, options),
            document: Rc::new(document),
            config,
        }
    }

    /// Renders `tree` into `container`. `None` unmounts.
    pub fn render(&self, tree: Option<TreeOf<F>>, container: &F::Element) {
        self.renderers.ensure_renderer().render(tree, container);
    }

    /// Hydrates the server-rendered markup inside `container` against `tree`.
    pub fn hydrate(&self, tree: TreeOf<F>, container: &F::Element) {
        self.renderers
            .ensure_hydration_renderer()
            .hydrate(tree, container);
    }

    /// Creates an application that renders from scratch on mount.
    pub fn create_app(
        &self,
        root: ComponentOf<F>,
        props: Option<PropsOf<F>>,
    ) -> DomApp<AppOf<F>, D> {
        let app = self.renderers.ensure_renderer().create_app(root, props);
        DomApp::new(
            app,
            Rc::clone(&self.document),
            self.config.clone(),
            MountMode::Render,
        )
    }

    /// Creates an application that hydrates existing markup on mount.
    pub fn create_ssr_app(
        &self,
        root: ComponentOf<F>,
        props: Option<PropsOf<F>>,
    ) -> DomApp<AppOf<F>, D> {
        let app = self
            .renderers
            .ensure_hydration_renderer()
            .create_app(root, props);
        DomApp::new(
            app,
            Rc::clone(&self.document),
            self.config.clone(),
            MountMode::Hydrate,
        )
    }

    /// The renderer holder.
    #[must_use]
    pub const fn renderers(&self) -> &RendererCell<F> {
        &self.renderers
    }

    /// The document mount selectors are resolved against.
    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The runtime's configuration.
    #[must_use]
    pub const fn config(&self) -> &DomConfig {
        &self.config
    }
}

/// Returns the thread-wide runtime for `F` and `D`, creating it on first use.
#[must_use]
pub fn runtime<F, D>() -> Rc<DomRuntime<F, D>>
where
    F: RendererFactory + Default + 'static,
    D: Document<Element = F::Element> + Default + 'static,
{
    if let Some(existing) = lookup::<F, D>() {
        return existing;
    }
    install_runtime(DomRuntime::new(
        F::default(),
        D::default(),
        DomConfig::default(),
    ))
}

/// Registers `runtime` as the thread-wide runtime for `F` and `D`.
///
/// A runtime that is already registered stays in place and is returned
/// instead.
pub fn install_runtime<F, D>(runtime: DomRuntime<F, D>) -> Rc<DomRuntime<F, D>>
where
    F: RendererFactory + 'static,
    D: Document<Element = F::Element> + 'static,
{
    if let Some(existing) = lookup::<F, D>() {
        tracing::debug!("runtime already installed, keeping the existing one");
        return existing;
    }

    let created = Rc::new(runtime);
    RUNTIMES.with_borrow_mut(|runtimes| {
        runtimes.insert(
            TypeId::of::<DomRuntime<F, D>>(),
            Rc::clone(&created) as Rc<dyn Any>,
        );
    });
    created
}

fn lookup<F, D>() -> Option<Rc<DomRuntime<F, D>>>
where
    F: RendererFactory + 'static,
    D: 'static,
{
    let entry = RUNTIMES.with_borrow(|runtimes| {
        runtimes.get(&TypeId::of::<DomRuntime<F, D>>()).cloned()
    })?;
    entry.downcast().ok()
}

/// Renders through the thread-wide runtime. See [`DomRuntime::render`].
pub fn render<F, D>(tree: Option<TreeOf<F>>, container: &F::Element)
where
    F: RendererFactory + Default + 'static,
    D: Document<Element = F::Element> + Default + 'static,
{
    runtime::<F, D>().render(tree, container);
}

/// Hydrates through the thread-wide runtime. See [`DomRuntime::hydrate`].
pub fn hydrate<F, D>(tree: TreeOf<F>, container: &F::Element)
where
    F: RendererFactory + Default + 'static,
    D: Document<Element = F::Element> + Default + 'static,
{
    runtime::<F, D>().hydrate(tree, container);
}

/// Creates an app through the thread-wide runtime. See [`DomRuntime::create_app`].
pub fn create_app<F, D>(root: ComponentOf<F>, props: Option<PropsOf<F>>) -> DomApp<AppOf<F>, D>
where
    F: RendererFactory + Default + 'static,
    D: Document<Element = F::Element> + Default + 'static,
{
    runtime::<F, D>().create_app(root, props)
}

/// Creates a hydrating app through the thread-wide runtime.
/// See [`DomRuntime::create_ssr_app`].
pub fn create_ssr_app<F, D>(
    root: ComponentOf<F>,
    props: Option<PropsOf<F>>,
) -> DomApp<AppOf<F>, D>
where
    F: RendererFactory + Default + 'static,
    D: Document<Element = F::Element> + Default + 'static,
{
    runtime::<F, D>().create_ssr_app(root, props)
}
