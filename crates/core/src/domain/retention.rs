use std::time::{Duration, SystemTime};

use super::DomainError;

const SECONDS_PER_DAY: u64 = 86_400;

/// Age threshold used by both the preview and the delete path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RetentionWindow(u32);

impl RetentionWindow {
    pub const DEFAULT_DAYS: u32 = 30;

    pub fn new(days: i64) -> Result<Self, DomainError> {
        if days < 0 {
            return Err(DomainError::InvalidRetentionDays(days));
        }
        u32::try_from(days)
            .map(Self)
            .map_err(|_| DomainError::RetentionDaysTooLarge(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn max_age(self) -> Duration {
        Duration::from_secs(u64::from(self.0) * SECONDS_PER_DAY)
    }

    /// A file is aged only when it is strictly older than the window.
    /// Modification times in the future are never aged.
    pub fn is_aged(self, modified: SystemTime, now: SystemTime) -> bool {
        match now.duration_since(modified) {
            Ok(age) => age > self.max_age(),
            Err(_) => false,
        }
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl TryFrom<i64> for RetentionWindow {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RetentionWindow> for u32 {
    fn from(value: RetentionWindow) -> Self {
        value.days()
    }
}

/// Gate in front of destructive retention work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Confirmation {
    Confirmed,
    #[default]
    NotConfirmed,
}

impl Confirmation {
    pub const DEFAULT_RAW: &'static str = "no";

    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("yes") {
            Self::Confirmed
        } else {
            Self::NotConfirmed
        }
    }

    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
