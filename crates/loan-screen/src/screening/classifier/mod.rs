mod forest;
mod logistic;

pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use logistic::LogisticRegression;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::Outcome;

/// Uniform contract over fitted binary classifiers.
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Number of features the model was fitted on.
    fn input_width(&self) -> usize;

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError>;

    /// One label per input, in input order.
    fn predict_batch(&self, inputs: &[Vec<f64>]) -> Result<Vec<Outcome>, ClassifierError> {
        inputs.iter().map(|input| self.predict(input)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("model expects {expected} features, received {actual}")]
    InputMismatch { expected: usize, actual: usize },
}

pub(crate) fn ensure_width(expected: usize, input: &[f64]) -> Result<(), ClassifierError> {
    if input.len() == expected {
        Ok(())
    } else {
        Err(ClassifierError::InputMismatch {
            expected,
            actual: input.len(),
        })
    }
}

/// Serialized classifier artifact, tagged by algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl Classifier for ClassifierModel {
    fn input_width(&self) -> usize {
        match self {
            ClassifierModel::LogisticRegression(model) => model.input_width(),
            ClassifierModel::RandomForest(model) => model.input_width(),
        }
    }

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError> {
        match self {
            ClassifierModel::LogisticRegression(model) => model.predict(input),
            ClassifierModel::RandomForest(model) => model.predict(input),
        }
    }
}
