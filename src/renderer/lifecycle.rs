use core::fmt;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::{RendererFactory, RendererOptions};

/// Capability mode of the stored renderer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMode {
    /// Renders from scratch only.
    Plain,
    /// Can adopt existing markup.
    Hydration,
}

/// Holder for the single renderer handle of an engine.
///
/// The handle is built on first use. Asking for hydration replaces a plain
/// handle with a hydration-capable one exactly once; after that every caller
/// gets the same handle back. Handles are shared through [`Rc`], so no borrow
/// of the holder is alive while the engine runs and nested calls are safe.
pub struct RendererCell<F: RendererFactory> {
    factory: F,
    options: RendererOptions,
    renderer: RefCell<Option<Rc<F::Renderer>>>,
    hydration: Cell<bool>,
}

impl<F: RendererFactory> fmt::Debug for RendererCell<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererCell")
            .field("mode", &self.mode())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<F: RendererFactory> RendererCell<F> {
    /// Creates an empty holder. Nothing is constructed until first use.
    pub const fn new(factory: F, options: RendererOptions) -> Self {
        Self {
            factory,
            options,
            renderer: RefCell::new(None),
            hydration: Cell::new(false),
        }
    }

    /// Returns the stored handle, building a plain one if none exists.
    pub fn ensure_renderer(&self) -> Rc<F::Renderer> {
        if let Some(existing) = self.current() {
            return existing;
        }

        tracing::debug!("creating renderer");
        let created = Rc::new(self.factory.create_renderer(&self.options));
        // Construction may have re-entered and stored a handle already.
        Rc::clone(self.renderer.borrow_mut().get_or_insert(created))
    }

    /// Returns a hydration-capable handle, replacing a plain one on first use.
    pub fn ensure_hydration_renderer(&self) -> Rc<F::Renderer> {
        if self.hydration.get()
            && let Some(existing) = self.current()
        {
            return existing;
        }

        tracing::debug!(
            replacing_plain = self.renderer.borrow().is_some(),
            "creating hydration renderer"
        );
        let created = Rc::new(self.factory.create_hydration_renderer(&self.options));
        if self.hydration.get()
            && let Some(existing) = self.current()
        {
            return existing;
        }

        self.hydration.set(true);
        *self.renderer.borrow_mut() = Some(Rc::clone(&created));
        created
    }

    /// Capability mode of the stored handle, or `None` before first use.
    #[must_use]
    pub fn mode(&self) -> Option<RendererMode> {
        self.renderer.borrow().as_ref().map(|_| {
            if self.hydration.get() {
                RendererMode::Hydration
            } else {
                RendererMode::Plain
            }
        })
    }

    /// The options handed to the factory.
    #[must_use]
    pub const fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// The engine's construction capability.
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    fn current(&self) -> Option<Rc<F::Renderer>> {
        self.renderer.borrow().clone()
    }
}
