pub mod debug_log;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod types;

pub use debug_log::{DebugEventLog, DebugLogEntry, EventDetail, DEBUG_LOG_CAPACITY};
pub use error::LocationError;
pub use provider::{AccuracyProfile, PositionProvider, ProviderError};
pub use resolver::LocationResolver;
pub use types::{LocationSource, PermissionStatus, PositionFix, ResolvedLocation};
