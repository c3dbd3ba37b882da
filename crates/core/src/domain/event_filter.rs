use std::fmt;
use std::str::FromStr;

use super::DomainError;

macro_rules! define_keyword_enum {
    ($name:ident, $error:ident, { $($variant:ident => $keyword:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($keyword => Ok(Self::$variant),)+
                    other => Err(DomainError::$error(other.to_string())),
                }
            }
        }
    };
}

define_keyword_enum!(EventSource, InvalidEventSource, {
    Windows => "windows",
    Linux => "linux",
});

define_keyword_enum!(EventLevel, InvalidEventLevel, {
    All => "all",
    Error => "error",
    Warning => "warning",
});

impl EventSource {
    /// Source that matches the host this binary was built for.
    pub fn native() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self::native()
    }
}

impl Default for EventLevel {
    fn default() -> Self {
        Self::All
    }
}

impl EventLevel {
    /// Syslog lines carry no structured severity, so matching is by keyword.
    pub fn accepts_line(self, line: &str) -> bool {
        match self {
            Self::All => true,
            Self::Error => line.to_lowercase().contains("error"),
            Self::Warning => line.to_lowercase().contains("warn"),
        }
    }

    /// Windows event types: 1 = error, 2 = warning, 4 = information.
    pub fn accepts_event_type(self, event_type: u32) -> bool {
        match self {
            Self::All => true,
            Self::Error => event_type == 1,
            Self::Warning => event_type == 2,
        }
    }
}
