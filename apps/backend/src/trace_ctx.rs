//! Task-local trace id for HTTP requests.
//!
//! `RequestTrace` scopes every request future with its trace id so error
//! bodies and logs produced deep inside a handler can carry it without
//! threading it through service signatures.

use std::cell::RefCell;

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current request, or `"unknown"` outside a request scope
/// (background timers, tests).
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` visible through [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
