use serde::{Deserialize, Serialize};

use super::schema::NUMERICAL_FIELDS;
use super::store::ArtifactLoadError;

/// Fitted standardization over the numerical fields: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerArtifact")]
pub struct StandardScaler {
    mean: [f64; 5],
    scale: [f64; 5],
}

#[derive(Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerArtifact> for StandardScaler {
    type Error = ArtifactLoadError;

    fn try_from(artifact: ScalerArtifact) -> Result<Self, Self::Error> {
        let mean = fixed_width("mean", artifact.mean)?;
        let scale = fixed_width("scale", artifact.scale)?;
        Self::new(mean, scale)
    }
}

fn fixed_width(name: &str, values: Vec<f64>) -> Result<[f64; 5], ArtifactLoadError> {
    let found = values.len();
    values.try_into().map_err(|_| {
        ArtifactLoadError::invalid(
            "scaler",
            format!(
                "{name} must have {} entries, found {found}",
                NUMERICAL_FIELDS.len()
            ),
        )
    })
}

impl StandardScaler {
    /// A zero scale (constant training column) divides by one instead.
    pub fn new(mean: [f64; 5], scale: [f64; 5]) -> Result<Self, ArtifactLoadError> {
        for (index, field) in NUMERICAL_FIELDS.iter().enumerate() {
            if !mean[index].is_finite() || !scale[index].is_finite() {
                return Err(ArtifactLoadError::invalid(
                    "scaler",
                    format!("statistics for '{field}' must be finite"),
                ));
            }
            if scale[index] < 0.0 {
                return Err(ArtifactLoadError::invalid(
                    "scaler",
                    format!("scale for '{field}' must not be negative"),
                ));
            }
        }

        let scale = scale.map(|value| if value == 0.0 { 1.0 } else { value });
        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &[f64; 5] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; 5] {
        &self.scale
    }

    pub fn transform(&self, values: [f64; 5]) -> [f64; 5] {
        let mut scaled = [0.0; 5];
        for (index, value) in values.iter().enumerate() {
            scaled[index] = (value - self.mean[index]) / self.scale[index];
        }
        scaled
    }

    /// Raw business value that maps onto `scaled` for the given field.
    pub fn inverse(&self, index: usize, scaled: f64) -> f64 {
        scaled * self.scale[index] + self.mean[index]
    }
}
