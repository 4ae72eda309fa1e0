//! Fallible-call adapter.
//!
//! Repository failures are reported here, once, and turned into `None` so
//! that callers only decide whether to continue.

use anyhow::Result;
use log::*;
use std::future::Future;

/// Await the given operation and return its value, or `None` if it failed.
///
/// The failure and its full cause chain are logged at error level, which the
/// terminal view surfaces to the user.
pub async fn safe_api_call<T, F, Fut>(op: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match op().await {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Request failed: {}", e);
            for cause in e.chain().skip(1) {
                error!("  Caused by: {}", cause);
            }
            None
        }
    }
}
