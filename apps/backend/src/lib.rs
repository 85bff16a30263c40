#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod ws;

// Re-exports for public API
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{CurrentUser, ExpectedVersion, RoomId};
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use state::{build_state, AppState};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    pairflip_test_support::logging::init();
}
