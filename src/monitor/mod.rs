mod error;
mod monitor;

pub use error::MonitorError;
pub use monitor::{Monitor, MonitorMode, MonitorStatus, PassKind};
