//! Shared application state.

use formcheck_agents::{
    ChatCompletionGenerator, CoachOrchestrator, FeedbackCoach, StaticGenerator, TextGenerator,
};
use formcheck_core::{Error, Result};
use formcheck_reference::{ColumnMaps, CsvPoseLoader, InMemoryReferenceStore};
use std::sync::Arc;

use crate::config::ApiConfig;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CoachOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: CoachOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wire store, loader and generator from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let store = InMemoryReferenceStore::from_json_file(&config.reference.records_path)?;
        if store.is_empty() {
            tracing::warn!(
                "Reference catalog {} is empty; every lookup will miss",
                config.reference.records_path.display()
            );
        }

        let column_maps = ColumnMaps::builtin().merge(config.reference.column_maps.clone());
        tracing::info!("Column maps available for: {}", column_maps.pose_types().join(", "));
        let loader = CsvPoseLoader::new(column_maps);

        let coach = FeedbackCoach::new(build_generator(config)?, config.feedback.threshold_degrees);

        Ok(Self::new(CoachOrchestrator::new(
            Arc::new(store),
            Arc::new(loader),
            coach,
        )))
    }
}

fn build_generator(config: &ApiConfig) -> Result<Arc<dyn TextGenerator>> {
    if let Some(text) = &config.generator.offline_text {
        tracing::warn!("Using offline feedback text; the model will not be called");
        let generator: Arc<dyn TextGenerator> = Arc::new(StaticGenerator::new(text.clone()));
        return Ok(generator);
    }

    let generator = ChatCompletionGenerator::new(config.generator.agent.clone())
        .map_err(|e| Error::Config(e.to_string()))?;
    if !generator.has_api_key() {
        tracing::warn!("No API key configured; feedback requests will fail");
    }
    tracing::info!("Feedback generator: {}", generator.model());

    let generator: Arc<dyn TextGenerator> = Arc::new(generator);
    Ok(generator)
}
