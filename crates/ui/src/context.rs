use std::sync::Arc;

use services::{SimilarService, SolveService};

pub trait UiApp: Send + Sync {
    fn solve_service(&self) -> Arc<SolveService>;
    fn similar_service(&self) -> Arc<SimilarService>;

    /// Whether a model key was found. The UI still works without one; every
    /// request then fails with the usual error banner.
    fn model_configured(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    model_configured: bool,
    solve: Arc<SolveService>,
    similar: Arc<SimilarService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            model_configured: app.model_configured(),
            solve: app.solve_service(),
            similar: app.similar_service(),
        }
    }

    #[must_use]
    pub fn model_configured(&self) -> bool {
        self.model_configured
    }

    #[must_use]
    pub fn solve_service(&self) -> Arc<SolveService> {
        Arc::clone(&self.solve)
    }

    #[must_use]
    pub fn similar_service(&self) -> Arc<SimilarService> {
        Arc::clone(&self.similar)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
