//! Findings produced by the summarization service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity as reported by the service
///
/// Unrecognised values are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Badge colour for tabular display
    pub fn tone(&self) -> &'static str {
        match self {
            Severity::High => "red",
            Severity::Medium => "orange",
            Severity::Low => "green",
            Severity::Other(_) => "neutral",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Other(s) => s,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Other(String::new())
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High" => Severity::High,
            "Medium" => Severity::Medium,
            "Low" => Severity::Low,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorized issue returned by the summarization service
///
/// `category` and `issue` are required; the remaining fields default when
/// the service omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRow {
    pub category: String,
    pub issue: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub frequency: u32,
}

/// Findings sharing one category, in arrival order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindingGroup {
    pub category: String,
    pub findings: Vec<FindingRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_known_values() {
        assert_eq!(Severity::from("High".to_string()), Severity::High);
        assert_eq!(Severity::from("Medium".to_string()), Severity::Medium);
        assert_eq!(Severity::from("Low".to_string()), Severity::Low);
    }

    #[test]
    fn test_severity_unrecognised_kept_verbatim() {
        let s = Severity::from("Critical".to_string());
        assert_eq!(s, Severity::Other("Critical".to_string()));
        assert_eq!(s.to_string(), "Critical");
        assert_eq!(s.tone(), "neutral");
    }

    #[test]
    fn test_severity_is_case_sensitive() {
        assert_eq!(Severity::from("high".to_string()), Severity::Other("high".to_string()));
    }

    #[test]
    fn test_finding_defaults_for_missing_fields() {
        let row: FindingRow =
            serde_json::from_str(r#"{"category":"Participants","issue":"Late"}"#).unwrap();
        assert_eq!(row.recommendation, "");
        assert_eq!(row.severity, Severity::default());
        assert_eq!(row.frequency, 0);
    }

    #[test]
    fn test_finding_requires_category() {
        let result = serde_json::from_str::<FindingRow>(r#"{"issue":"Late"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_finding_rejects_negative_frequency() {
        let result = serde_json::from_str::<FindingRow>(
            r#"{"category":"Participants","issue":"Late","frequency":-1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_finding_serializes_severity_as_string() {
        let row = FindingRow {
            category: "Commanders".into(),
            issue: "Briefing unclear".into(),
            recommendation: "Rehearse".into(),
            severity: Severity::Medium,
            frequency: 2,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["severity"], "Medium");
        assert_eq!(value["frequency"], 2);
    }
}
