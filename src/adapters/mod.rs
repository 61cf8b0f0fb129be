// Adapters layer: the tokio-driven signal source and the action handler
// used by the watcher.

pub mod async_signals;
pub mod handler;
