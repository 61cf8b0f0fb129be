pub mod signals;
mod sys;
pub mod watch;

pub use crate::domain::model::{Flow, SignalEvent};
pub use crate::domain::ports::{ConfigProvider, SignalHandler, SignalSource};
pub use crate::utils::error::Result;
