use serde::{Deserialize, Serialize};

use super::{ensure_width, Classifier, ClassifierError};
use crate::screening::rules::Outcome;
use crate::screening::store::ArtifactLoadError;

/// Linear model scored as `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LogisticArtifact")]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Deserialize)]
struct LogisticArtifact {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<LogisticArtifact> for LogisticRegression {
    type Error = ArtifactLoadError;

    fn try_from(artifact: LogisticArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.coefficients, artifact.intercept)
    }
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ArtifactLoadError> {
        if coefficients.is_empty() {
            return Err(ArtifactLoadError::invalid(
                "logistic regression",
                "no coefficients",
            ));
        }
        if !intercept.is_finite() || coefficients.iter().any(|value| !value.is_finite()) {
            return Err(ArtifactLoadError::invalid(
                "logistic regression",
                "coefficients and intercept must be finite",
            ));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn decision_function(&self, input: &[f64]) -> Result<f64, ClassifierError> {
        ensure_width(self.coefficients.len(), input)?;
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(input)
            .map(|(weight, value)| weight * value)
            .sum();
        Ok(self.intercept + dot)
    }

    /// Probability of the positive (approve) class.
    pub fn probability(&self, input: &[f64]) -> Result<f64, ClassifierError> {
        let z = self.decision_function(input)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LogisticRegression {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError> {
        let z = self.decision_function(input)?;
        Ok(if z > 0.0 {
            Outcome::Approved
        } else {
            Outcome::Rejected
        })
    }
}
