/// Keyword bucket of a single log line. Priority is error, then warning, then info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    Error,
    Warning,
    Info,
}

impl LineClass {
    pub fn classify(line: &str) -> Option<Self> {
        let lowered = line.to_lowercase();
        if lowered.contains("error") {
            Some(Self::Error)
        } else if lowered.contains("warn") {
            Some(Self::Warning)
        } else if lowered.contains("info") {
            Some(Self::Info)
        } else {
            None
        }
    }
}

/// Running keyword counts over a stream of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTally {
    pub errors: u64,
    pub warnings: u64,
    pub info: u64,
    pub total_lines: u64,
}

impl LineTally {
    pub fn record(&mut self, line: &str) {
        self.total_lines += 1;
        match LineClass::classify(line) {
            Some(LineClass::Error) => self.errors += 1,
            Some(LineClass::Warning) => self.warnings += 1,
            Some(LineClass::Info) => self.info += 1,
            None => {}
        }
    }
}
