use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Text(String),
    Error(String),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Text(message) | Outcome::Error(message) => message,
        }
    }
}

/// One executed command line as shown in the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub typed: String,
    pub started_at: DateTime<Local>,
    pub outcome: Outcome,
}

impl OutputEntry {
    pub fn new(typed: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            typed: typed.into(),
            started_at: Local::now(),
            outcome,
        }
    }
}
