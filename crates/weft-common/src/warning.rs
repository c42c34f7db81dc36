//! De-duplicated parser diagnostics.
//!
//! Malformed documents tend to repeat the same mistake many times; each distinct
//! message is logged once per process (or until [`clear_warnings`] is called).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use log::warn;

/// Messages already logged, keyed by `[component] message`.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log a warning for `component`, unless the same message was already logged.
///
/// Returns `true` if the message was new and has been emitted.
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unexpected-null-character at 12");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let is_new = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if is_new {
        warn!(target: "weft", "[{component}] {message}");
    }
    is_new
}

/// Forget every recorded warning (call before parsing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_message_is_suppressed() {
        assert!(warn_once("test-dedup", "only once"));
        assert!(!warn_once("test-dedup", "only once"));
        assert!(warn_once("test-dedup", "a different message"));
    }
}
