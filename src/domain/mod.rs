// Signal types, watcher events and the ports the watch engine is built on.

pub mod model;
pub mod ports;
pub mod set;
pub mod signal;
