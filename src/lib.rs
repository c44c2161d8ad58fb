#![doc = include_str!("../README.md")]

pub mod app;
pub mod config;
/// Error type shared by the DOM surfaces.
pub mod error;
pub mod logging;
pub mod memory;
pub mod renderer;
pub mod runtime;
pub mod style;
pub mod surface;
pub mod tags;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[doc(inline)]
pub use app::{DomApp, MountMode, MountTarget};
#[doc(inline)]
pub use config::{DomConfig, DomConfigBuilder};
#[doc(inline)]
pub use error::DomError;
#[doc(inline)]
pub use renderer::{
    AppInstance, Renderer, RendererCell, RendererFactory, RendererMode, RendererOptions,
    RootComponent,
};
#[doc(inline)]
pub use runtime::{
    DomRuntime, create_app, create_ssr_app, hydrate, install_runtime, render, runtime,
};
#[doc(inline)]
pub use style::{PrefixCache, StyleEntry, StyleValue, patch_style};
#[doc(inline)]
pub use surface::{Document, Priority, StyleDeclaration, Surface};

pub mod prelude {
    //! Commonly used traits and types.
    //!
    //! ```rust
    //! use waterui_dom::prelude::*;
    //!
    //! let style: StyleValue = [("color", "red")].into_iter().collect();
    //! assert!(!style.is_absent());
    //! ```
    pub use crate::{
        AppInstance, Document, DomApp, DomConfig, DomRuntime, MountTarget, Renderer,
        RendererFactory, RootComponent, StyleDeclaration, StyleValue, Surface,
    };
}
