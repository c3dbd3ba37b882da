mod directory;
mod error;
mod event_filter;
mod health_status;
mod line_class;
mod retention;

pub use directory::{DirectoryError, DirectoryUser, UserDirectory};
pub use error::DomainError;
pub use event_filter::{EventLevel, EventSource};
pub use health_status::HealthStatus;
pub use line_class::{LineClass, LineTally};
pub use retention::{Confirmation, RetentionWindow};
