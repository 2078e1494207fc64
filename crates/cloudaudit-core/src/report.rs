use serde::{Deserialize, Serialize};

/// Summary used when the model reply carried no `[SUMMARY]` section.
pub const DEFAULT_SUMMARY: &str = "Analysis could not be completed.";

/// Title used when an issue block carried no `Issue:` line.
pub const DEFAULT_ISSUE_TITLE: &str = "Unnamed Issue";

/// Severity used when an issue block carried no `Severity:` line.
pub const DEFAULT_SEVERITY: &str = "MEDIUM";

/// Recommendation used when the model reply carried no `[CONCLUSION]` section.
pub const DEFAULT_RECOMMENDATION: &str =
    "Review the configuration against your cloud provider's security best practices.";

/// One finding recovered from the model's analysis text.
///
/// `severity` is upper-cased verbatim; the prompt asks for HIGH/MEDIUM/LOW
/// but other tokens are stored as-is rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub severity: String,
    pub description: String,
    pub recommendation: String,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            title: DEFAULT_ISSUE_TITLE.to_string(),
            severity: DEFAULT_SEVERITY.to_string(),
            description: String::new(),
            recommendation: String::new(),
        }
    }
}

impl Issue {
    /// Synthetic record substituted when no issue blocks were recovered.
    pub fn no_issues_found() -> Self {
        Self {
            title: "No issues found".to_string(),
            severity: "LOW".to_string(),
            description:
                "The analysis did not identify any security issues in the supplied configuration."
                    .to_string(),
            recommendation: "No action required.".to_string(),
        }
    }
}

/// Structured security report recovered from one model reply.
///
/// `issues` and `recommendations` are never empty once parsing has run;
/// missing sections fall back to the sentinel values above. Reports live for
/// one request/response cycle and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

impl AnalysisReport {
    /// Substitutes the sentinel entries for whatever is still empty.
    pub fn fill_defaults(&mut self) {
        if self.issues.is_empty() {
            self.issues.push(Issue::no_issues_found());
        }
        if self.recommendations.is_empty() {
            self.recommendations.push(DEFAULT_RECOMMENDATION.to_string());
        }
    }
}
