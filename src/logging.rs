//! Tracing and panic reporting setup.
//!
//! The crate only emits `tracing` events; nothing is printed unless the host
//! installs a subscriber. [`install_tracing`] is a ready-made one for hosts
//! that don't bring their own.

use std::panic::{self, PanicHookInfo};
use std::sync::Once;

#[cfg(not(target_arch = "wasm32"))]
use std::io::{self, Write};

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{EnvFilter, fmt::writer::MakeWriter, prelude::*};

#[cfg(not(target_arch = "wasm32"))]
const TRACING_PREFIX: &str = "[waterui-dom] ";

static PANIC_HOOK_INSTALLED: Once = Once::new();
static TRACING_INSTALLED: Once = Once::new();

/// Install the tracing subscriber (idempotent).
///
/// On native targets events go to stderr, filtered by `RUST_LOG` (default
/// `info`). On `wasm32` panics are routed to the browser console instead.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let console = tracing_subscriber::fmt::layer()
                .with_writer(PrefixedWriter)
                .with_ansi(false)
                .with_filter(filter);

            if tracing_subscriber::registry()
                .with(console)
                .try_init()
                .is_err()
            {
                eprintln!("{TRACING_PREFIX}a global tracing subscriber is already set");
            }
        }
    });
}

/// Install the panic forwarder (idempotent).
///
/// Panics are reported through `tracing::error!` before the previous hook
/// runs.
pub fn install_panic_forwarder() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            forward_panic(info);
            previous(info);
        }));
    });
}

fn forward_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info);
    let location = info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_default();

    tracing::error!(
        target: "waterui_dom::panic",
        message = %message,
        location = %location,
        "panic"
    );
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
struct PrefixedWriter;

#[cfg(not(target_arch = "wasm32"))]
impl<'a> MakeWriter<'a> for PrefixedWriter {
    type Writer = PrefixedWriterInner<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriterInner {
            inner: io::stderr(),
            wrote_prefix: false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct PrefixedWriterInner<W> {
    inner: W,
    wrote_prefix: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl<W: Write> Write for PrefixedWriterInner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
