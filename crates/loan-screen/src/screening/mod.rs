//! Loan pre-screening decision pipeline.
//!
//! An application is encoded and scaled with fitted artifacts, scored by a
//! pretrained classifier, and then passed through policy overrides that work
//! in the same scaled feature space the model consumes.

pub mod classifier;
pub mod encoder;
pub mod pipeline;
pub mod router;
pub mod rules;
pub mod scaler;
pub mod schema;
pub mod store;
pub mod transformer;

#[cfg(test)]
mod tests;

pub use classifier::{
    Classifier, ClassifierError, ClassifierModel, DecisionTree, LogisticRegression, RandomForest,
    TreeNode,
};
pub use encoder::{OneHotEncoder, UnknownCategoryError, UnknownCategoryPolicy};
pub use pipeline::{Artifacts, DecisionError, DecisionPipeline};
pub use router::{screening_router, PredictionResponse};
pub use rules::{Decision, DecisionReason, Outcome, OverrideRule, RuleEngine, RuleThresholds};
pub use scaler::StandardScaler;
pub use schema::{
    Education, Ethnicity, Gender, LoanApplication, LoanApplicationRequest, MaritalStatus,
    SchemaViolation, YesNo,
};
pub use store::{ArtifactLoadError, ArtifactStore, ClassifierKind, FsArtifactStore};
pub use transformer::{FeatureTransformer, TransformedFeatures};
