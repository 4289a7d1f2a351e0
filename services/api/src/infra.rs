use loan_screen::config::ArtifactConfig;
use loan_screen::error::AppError;
use loan_screen::screening::{Artifacts, DecisionPipeline, FsArtifactStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read the fitted artifacts once and assemble the shared pipeline.
pub(crate) fn load_pipeline(config: &ArtifactConfig) -> Result<DecisionPipeline, AppError> {
    let store = FsArtifactStore::new(config.model_dir.clone(), config.classifier);
    let artifacts = Artifacts::load(&store)?;
    let pipeline = DecisionPipeline::new(artifacts)?;

    info!(
        model_dir = %config.model_dir.display(),
        classifier = %config.classifier,
        input_width = pipeline.transformer().output_width(),
        "decision pipeline loaded"
    );

    Ok(pipeline)
}
