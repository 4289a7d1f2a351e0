use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::schema::{categorical_domains, CATEGORICAL_FIELDS};
use super::store::ArtifactLoadError;

/// What the encoder does with a value it was not fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Encode the field's whole block as zeros (training-time convention).
    #[default]
    Ignore,
    Error,
}

/// Fitted one-hot encoder over the categorical fields.
///
/// `categories[i]` lists the known values of `CATEGORICAL_FIELDS[i]` in
/// column order; the encoded width is the total number of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EncoderArtifact")]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
    handle_unknown: UnknownCategoryPolicy,
}

#[derive(Deserialize)]
struct EncoderArtifact {
    categories: Vec<Vec<String>>,
    #[serde(default)]
    handle_unknown: UnknownCategoryPolicy,
}

impl TryFrom<EncoderArtifact> for OneHotEncoder {
    type Error = ArtifactLoadError;

    fn try_from(artifact: EncoderArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.categories, artifact.handle_unknown)
    }
}

impl OneHotEncoder {
    pub fn new(
        categories: Vec<Vec<String>>,
        handle_unknown: UnknownCategoryPolicy,
    ) -> Result<Self, ArtifactLoadError> {
        if categories.len() != CATEGORICAL_FIELDS.len() {
            return Err(ArtifactLoadError::invalid(
                "encoder",
                format!(
                    "expected {} categorical fields, found {}",
                    CATEGORICAL_FIELDS.len(),
                    categories.len()
                ),
            ));
        }

        for (field, values) in CATEGORICAL_FIELDS.iter().zip(&categories) {
            if values.is_empty() {
                return Err(ArtifactLoadError::invalid(
                    "encoder",
                    format!("field '{field}' has no categories"),
                ));
            }
            let mut seen = HashSet::new();
            if let Some(duplicate) = values.iter().find(|value| !seen.insert(value.as_str())) {
                return Err(ArtifactLoadError::invalid(
                    "encoder",
                    format!("field '{field}' lists '{duplicate}' more than once"),
                ));
            }
        }

        Ok(Self {
            categories,
            handle_unknown,
        })
    }

    /// Encoder fitted on the declared schema domains, with categories sorted
    /// lexicographically as the fitting library orders them.
    pub fn from_schema(handle_unknown: UnknownCategoryPolicy) -> Self {
        let categories = categorical_domains()
            .iter()
            .map(|domain| {
                let mut values: Vec<String> = domain.iter().map(|v| v.to_string()).collect();
                values.sort();
                values
            })
            .collect();

        Self {
            categories,
            handle_unknown,
        }
    }

    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    pub fn handle_unknown(&self) -> UnknownCategoryPolicy {
        self.handle_unknown
    }

    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    pub fn transform(&self, values: &[&str; 9]) -> Result<Vec<f64>, UnknownCategoryError> {
        let mut encoded = vec![0.0; self.width()];
        let mut offset = 0;

        for ((field, known), value) in CATEGORICAL_FIELDS.iter().zip(&self.categories).zip(values) {
            match known.iter().position(|category| category == value) {
                Some(column) => encoded[offset + column] = 1.0,
                None if self.handle_unknown == UnknownCategoryPolicy::Ignore => {}
                None => {
                    return Err(UnknownCategoryError {
                        field: *field,
                        value: value.to_string(),
                    });
                }
            }
            offset += known.len();
        }

        Ok(encoded)
    }
}

/// Categorical value outside the fitted domain, raised only by a strict encoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{value}' for field '{field}'")]
pub struct UnknownCategoryError {
    pub field: &'static str,
    pub value: String,
}
