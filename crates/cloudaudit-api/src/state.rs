use cloudaudit_ai::ConfigAnalyzer;
use cloudaudit_core::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ConfigAnalyzer>,
}

impl AppState {
    pub fn new(settings: &Settings) -> cloudaudit_core::Result<Self> {
        let analyzer = Arc::new(ConfigAnalyzer::from_settings(settings)?);
        Ok(Self { analyzer })
    }

    /// Builds state around an existing analyzer. Tests use this to inject a
    /// canned provider instead of a live model service.
    pub fn with_analyzer(analyzer: Arc<ConfigAnalyzer>) -> Self {
        Self { analyzer }
    }
}
