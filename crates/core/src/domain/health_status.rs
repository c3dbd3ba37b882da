use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Ok,
    Warning,
}

impl HealthStatus {
    pub const WARNING_THRESHOLD_PERCENT: f64 = 80.0;

    /// Disk usage is reported but never degrades the status.
    pub fn classify(cpu_percent: f64, memory_percent: f64) -> Self {
        if cpu_percent < Self::WARNING_THRESHOLD_PERCENT
            && memory_percent < Self::WARNING_THRESHOLD_PERCENT
        {
            Self::Ok
        } else {
            Self::Warning
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
