use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid retention window: {0}. days must be >= 0")]
    InvalidRetentionDays(i64),
    #[error("invalid retention window: {0}. days must be <= {max}", max = u32::MAX)]
    RetentionDaysTooLarge(i64),
    #[error("invalid event source: {0}. expected one of: windows, linux")]
    InvalidEventSource(String),
    #[error("invalid event level: {0}. expected one of: all, error, warning")]
    InvalidEventLevel(String),
}
