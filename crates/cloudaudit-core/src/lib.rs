pub mod config;
pub mod error;
pub mod report;

pub use config::{LlmConfig, LoggingConfig, ServerConfig, Settings};
pub use error::{CloudAuditError, Result};
pub use report::{
    AnalysisReport, Issue, DEFAULT_ISSUE_TITLE, DEFAULT_RECOMMENDATION, DEFAULT_SEVERITY,
    DEFAULT_SUMMARY,
};
