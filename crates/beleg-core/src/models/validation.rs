//! Validation issues and results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Advisory only.
    Info,
    /// Inconsistent or suspicious, not fatal.
    Warning,
    /// Statutory violation or missing mandatory datum.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A single finding of the compliance validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Dotted path of the affected field.
    pub field: String,

    pub severity: Severity,

    pub message: String,

    /// Corrected value, when one can be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<String>,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            severity,
            message: message.into(),
            suggested_value: None,
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Severity::Error, message)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Severity::Warning, message)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Severity::Info, message)
    }

    pub fn with_suggestion(mut self, value: impl Into<String>) -> Self {
        self.suggested_value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)?;
        if let Some(value) = &self.suggested_value {
            write!(f, " (suggested: {})", value)?;
        }
        Ok(())
    }
}

/// Outcome of a compliance validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no issue has severity ERROR.
    pub is_compliant: bool,

    /// Issues in rule order.
    pub issues: Vec<ValidationIssue>,

    /// Compliance score, 0 - 100.
    pub score: u8,

    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Issues of the given severity.
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    /// Issues attached to a field path.
    pub fn issues_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    pub fn error_count(&self) -> usize {
        self.issues_with(Severity::Error).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::error("steuerberechnung", "gross mismatch")
            .with_suggestion("107.00");
        assert_eq!(
            issue.to_string(),
            "[ERROR] steuerberechnung: gross mismatch (suggested: 107.00)"
        );
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&ValidationIssue::warning("datev.gegenkonto", "x")).unwrap();
        assert_eq!(
            json,
            r#"{"field":"datev.gegenkonto","severity":"WARNING","message":"x"}"#
        );
    }
}
