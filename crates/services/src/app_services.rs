use std::sync::Arc;

use tracing::info;

use crate::config::ModelConfig;
use crate::model::{GeminiClient, ModelClient};
use crate::similar_service::SimilarService;
use crate::solve_service::SolveService;

/// Assembles the app-facing services around one shared model client.
#[derive(Clone)]
pub struct TutorServices {
    solve: Arc<SolveService>,
    similar: Arc<SimilarService>,
    configured: bool,
}

impl TutorServices {
    /// Build services from `TUTOR_AI_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(ModelConfig::from_env())
    }

    /// Build services against the Gemini endpoint in `config`.
    ///
    /// With no config every call fails with `ModelError::Disabled`.
    #[must_use]
    pub fn from_config(config: Option<ModelConfig>) -> Self {
        if let Some(config) = &config {
            info!(model = %config.model, base_url = %config.base_url, "model client configured");
        }
        Self::with_client(Arc::new(GeminiClient::new(config)))
    }

    #[must_use]
    pub fn with_client(client: Arc<dyn ModelClient>) -> Self {
        let configured = client.is_configured();
        Self {
            solve: Arc::new(SolveService::new(Arc::clone(&client))),
            similar: Arc::new(SimilarService::new(client)),
            configured,
        }
    }

    #[must_use]
    pub fn solve(&self) -> Arc<SolveService> {
        Arc::clone(&self.solve)
    }

    #[must_use]
    pub fn similar(&self) -> Arc<SimilarService> {
        Arc::clone(&self.similar)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}
