//! Failure classification for fuzz outcomes.
//!
//! Maps anything a target can throw, reject with, or panic with onto a closed
//! taxonomy. The label used in crash signatures comes from the thrown value's
//! name when it carries one, and falls back to `Error` otherwise.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::Value;

pub const DEFAULT_LABEL: &str = "Error";
pub const TYPE_ERROR: &str = "TypeError";
pub const SYNTAX_ERROR: &str = "SyntaxError";
pub const RANGE_ERROR: &str = "RangeError";
pub const PANIC_LABEL: &str = "Panic";
pub const TIMEOUT_LABEL: &str = "timeout";
pub const TIMEOUT_MESSAGE: &str = "TIMEOUT";

/// What a target raised or rejected with.
#[derive(Debug, Clone)]
pub enum Thrown {
    /// A conventional error object. `name` is absent for anonymous errors.
    Error {
        name: Option<String>,
        message: String,
    },
    /// A plain value thrown without an error wrapper.
    Value(Value),
}

impl Thrown {
    pub fn error(message: impl Into<String>) -> Self {
        Self::named(DEFAULT_LABEL, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::named(TYPE_ERROR, message)
    }

    pub fn syntax_error(message: impl Into<String>) -> Self {
        Self::named(SYNTAX_ERROR, message)
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        Self::named(RANGE_ERROR, message)
    }

    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Thrown::Error {
            name: Some(name.into()),
            message: message.into(),
        }
    }

    pub fn anonymous(message: impl Into<String>) -> Self {
        Thrown::Error {
            name: None,
            message: message.into(),
        }
    }

    pub fn value(value: Value) -> Self {
        Thrown::Value(value)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Thrown::Error { name, .. } => name.as_deref(),
            Thrown::Value(_) => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Thrown::Error { message, .. } => message.clone(),
            Thrown::Value(value) => value.to_string(),
        }
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}: {}", self.message()),
            None => f.write_str(&self.message()),
        }
    }
}

/// Closed failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    TypeViolation,
    SyntaxViolation,
    Timeout,
    Unclassified,
}

/// A classified failure, ready for deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub label: String,
    pub message: String,
}

impl Failure {
    /// Synthetic failure for a deferred result that outlived the per-call timeout.
    pub fn timeout() -> Self {
        Self {
            kind: FailureKind::Timeout,
            label: TIMEOUT_LABEL.to_string(),
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    /// Failure for a target that panicked instead of returning an error.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        Self {
            kind: FailureKind::Unclassified,
            label: PANIC_LABEL.to_string(),
            message,
        }
    }

    /// Deduplication key: `label:message`.
    pub fn signature(&self) -> String {
        format!("{}:{}", self.label, self.message)
    }
}

/// Classify a thrown or rejected value.
pub fn classify(thrown: &Thrown) -> Failure {
    let label = thrown.name().unwrap_or(DEFAULT_LABEL).to_string();
    let kind = match label.as_str() {
        TYPE_ERROR => FailureKind::TypeViolation,
        SYNTAX_ERROR => FailureKind::SyntaxViolation,
        _ => FailureKind::Unclassified,
    };
    Failure {
        kind,
        label,
        message: thrown.message(),
    }
}
