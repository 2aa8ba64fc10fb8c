//! Frame profiling through `puffin`.
//!
//! Layout, atlas generation and drawing are instrumented with
//! [`profile_function!`] and [`profile_scope!`]. Scopes cost almost nothing
//! until collection is switched on with [`enable_scopes`] or [`init_profiling`].

use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Address the puffin HTTP server listens on.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8585";

/// Where collected scopes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Serve frames to `puffin_viewer` over HTTP.
    PuffinHttp,
}

static SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Turn on scope collection and start `backend`.
///
/// The HTTP server is started at most once per process.
///
/// ```no_run
/// use ember_core::profiling::{ProfilingBackend, init_profiling};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::PuffinHttp => {
            if SERVER.get().is_some() {
                return;
            }

            match puffin_http::Server::new(DEFAULT_SERVER_ADDR) {
                Ok(server) => {
                    tracing::info!("Puffin server listening on http://{DEFAULT_SERVER_ADDR}");
                    let _ = SERVER.set(server);
                }
                Err(e) => tracing::error!("Could not start puffin server: {}", e),
            }
        }
    }
}

/// Collect scopes in-process without starting a server.
pub fn enable_scopes() {
    puffin::set_scopes_on(true);
}

/// Close the current profiler frame. Call once per rendered frame.
#[inline]
pub fn new_frame() {
    GlobalProfiler::lock().new_frame();
}
