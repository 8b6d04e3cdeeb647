//! Diagnostic dump of still-open async handles.
//!
//! # Responsibilities
//! - Report async work that never completed, immediately before exit
//!
//! # Design Decisions
//! - Reads the runtime's own metrics; no bookkeeping of our own
//! - Stable tokio exposes counts, not task identities, so the dump names
//!   how much is still alive rather than what

/// Log the runtime's still-alive task count.
///
/// Invoked right before process exit when `print_open_handles` is set.
/// A non-zero count at this point usually means a module's dispose hook
/// forgot to stop something it spawned.
pub fn dump() {
    let metrics = tokio::runtime::Handle::current().metrics();
    tracing::warn!(
        alive_tasks = metrics.num_alive_tasks(),
        workers = metrics.num_workers(),
        "open async handles at exit"
    );
}
