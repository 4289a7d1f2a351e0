use std::sync::Arc;

use serde::Serialize;

use super::encoder::{OneHotEncoder, UnknownCategoryError};
use super::scaler::StandardScaler;
use super::schema::{LoanApplication, NUMERICAL_FIELDS};

/// Model-ready view of one application.
///
/// `model_input` is `scaled_numeric` followed by `encoded_categorical`; the
/// classifier was fitted on exactly this column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedFeatures {
    scaled_numeric: [f64; 5],
    encoded_categorical: Vec<f64>,
    model_input: Vec<f64>,
}

impl TransformedFeatures {
    pub fn scaled_numeric(&self) -> &[f64; 5] {
        &self.scaled_numeric
    }

    pub fn encoded_categorical(&self) -> &[f64] {
        &self.encoded_categorical
    }

    pub fn model_input(&self) -> &[f64] {
        &self.model_input
    }
}

/// Applies the fitted encoder and scaler. Pure: no I/O, no randomness.
#[derive(Debug, Clone)]
pub struct FeatureTransformer {
    encoder: Arc<OneHotEncoder>,
    scaler: Arc<StandardScaler>,
}

impl FeatureTransformer {
    pub fn new(encoder: Arc<OneHotEncoder>, scaler: Arc<StandardScaler>) -> Self {
        Self { encoder, scaler }
    }

    pub fn output_width(&self) -> usize {
        NUMERICAL_FIELDS.len() + self.encoder.width()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn transform(
        &self,
        application: &LoanApplication,
    ) -> Result<TransformedFeatures, UnknownCategoryError> {
        let encoded_categorical = self.encoder.transform(&application.categorical_values())?;
        let scaled_numeric = self.scaler.transform(application.numerical_values());

        let mut model_input = Vec::with_capacity(self.output_width());
        model_input.extend_from_slice(&scaled_numeric);
        model_input.extend_from_slice(&encoded_categorical);

        Ok(TransformedFeatures {
            scaled_numeric,
            encoded_categorical,
            model_input,
        })
    }
}
