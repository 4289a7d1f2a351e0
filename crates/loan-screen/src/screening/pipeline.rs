use std::sync::Arc;

use tracing::debug;

use super::classifier::{Classifier, ClassifierError};
use super::encoder::{OneHotEncoder, UnknownCategoryError};
use super::rules::{Decision, RuleEngine, RuleThresholds};
use super::scaler::StandardScaler;
use super::schema::{LoanApplication, NUMERICAL_FIELDS};
use super::store::{ArtifactLoadError, ArtifactStore};
use super::transformer::{FeatureTransformer, TransformedFeatures};

/// Fitted artifacts shared read-only by every decision.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub encoder: Arc<OneHotEncoder>,
    pub scaler: Arc<StandardScaler>,
    pub classifier: Arc<dyn Classifier>,
}

impl Artifacts {
    pub fn new(
        encoder: OneHotEncoder,
        scaler: StandardScaler,
        classifier: impl Classifier + 'static,
    ) -> Self {
        Self {
            encoder: Arc::new(encoder),
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
        }
    }

    pub fn load<S>(store: &S) -> Result<Self, ArtifactLoadError>
    where
        S: ArtifactStore + ?Sized,
    {
        Ok(Self {
            encoder: Arc::new(store.load_encoder()?),
            scaler: Arc::new(store.load_scaler()?),
            classifier: store.load_classifier()?,
        })
    }
}

/// Transformer → classifier → rule engine, with no state between calls.
#[derive(Debug, Clone)]
pub struct DecisionPipeline {
    transformer: FeatureTransformer,
    classifier: Arc<dyn Classifier>,
    rules: RuleEngine,
}

impl DecisionPipeline {
    pub fn new(artifacts: Artifacts) -> Result<Self, DecisionError> {
        Self::with_thresholds(artifacts, RuleThresholds::default())
    }

    /// Fails when the transformer output width differs from what the
    /// classifier was fitted on.
    pub fn with_thresholds(
        artifacts: Artifacts,
        thresholds: RuleThresholds,
    ) -> Result<Self, DecisionError> {
        let Artifacts {
            encoder,
            scaler,
            classifier,
        } = artifacts;
        let transformer = FeatureTransformer::new(encoder, scaler);

        let expected = classifier.input_width();
        let actual = transformer.output_width();
        if expected != actual {
            return Err(DecisionError::ModelInputMismatch { expected, actual });
        }

        Ok(Self {
            transformer,
            classifier,
            rules: RuleEngine::new(thresholds),
        })
    }

    pub fn transformer(&self) -> &FeatureTransformer {
        &self.transformer
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Fails on a numeric field that is not finite after scaling; such a
    /// value would slip past every threshold comparison.
    pub fn transform(
        &self,
        application: &LoanApplication,
    ) -> Result<TransformedFeatures, DecisionError> {
        let features = self.transformer.transform(application)?;

        if let Some(index) = features
            .scaled_numeric()
            .iter()
            .position(|value| !value.is_finite())
        {
            return Err(DecisionError::NonFiniteFeature {
                field: NUMERICAL_FIELDS[index],
            });
        }

        Ok(features)
    }

    pub fn decide(&self, application: &LoanApplication) -> Result<Decision, DecisionError> {
        let features = self.transform(application)?;
        let prediction = self.classifier.predict(features.model_input())?;
        let decision = self.rules.apply(&features, application, prediction);

        debug!(
            model_prediction = prediction.as_u8(),
            outcome = decision.outcome.as_u8(),
            overridden = decision.reason.is_override(),
            reason = decision.summary(),
            "loan application decided"
        );

        Ok(decision)
    }

    /// One result per application, in input order.
    pub fn decide_batch(
        &self,
        applications: &[LoanApplication],
    ) -> Vec<Result<Decision, DecisionError>> {
        applications
            .iter()
            .map(|application| self.decide(application))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
    #[error("model input mismatch: classifier expects {expected} features, transformer produces {actual}")]
    ModelInputMismatch { expected: usize, actual: usize },
    #[error("{field} is not a finite number")]
    NonFiniteFeature { field: &'static str },
}

impl From<ClassifierError> for DecisionError {
    fn from(value: ClassifierError) -> Self {
        match value {
            ClassifierError::InputMismatch { expected, actual } => {
                Self::ModelInputMismatch { expected, actual }
            }
        }
    }
}
