use std::sync::Arc;

use crate::screening::classifier::{Classifier, ClassifierError};
use crate::screening::encoder::{OneHotEncoder, UnknownCategoryPolicy};
use crate::screening::pipeline::{Artifacts, DecisionPipeline};
use crate::screening::rules::Outcome;
use crate::screening::scaler::StandardScaler;
use crate::screening::schema::{
    Education, Ethnicity, Gender, LoanApplication, LoanApplicationRequest, MaritalStatus, YesNo,
};

/// Width of the schema-fitted encoder plus the five numeric columns.
pub(super) const MODEL_WIDTH: usize = 28;

/// Classifier that ignores its input and returns a fixed label.
#[derive(Debug, Clone)]
pub(super) struct StubClassifier {
    pub(super) label: Outcome,
    pub(super) width: usize,
}

impl StubClassifier {
    pub(super) fn returning(label: Outcome) -> Self {
        Self {
            label,
            width: MODEL_WIDTH,
        }
    }
}

impl Classifier for StubClassifier {
    fn input_width(&self) -> usize {
        self.width
    }

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError> {
        if input.len() != self.width {
            return Err(ClassifierError::InputMismatch {
                expected: self.width,
                actual: input.len(),
            });
        }
        Ok(self.label)
    }
}

pub(super) fn encoder() -> OneHotEncoder {
    OneHotEncoder::from_schema(UnknownCategoryPolicy::Ignore)
}

pub(super) fn strict_encoder() -> OneHotEncoder {
    OneHotEncoder::from_schema(UnknownCategoryPolicy::Error)
}

/// Statistics shared with the JSON fixtures under `tests/fixtures/model`.
pub(super) fn scaler() -> StandardScaler {
    StandardScaler::new(
        [35.0, 5.0, 4.0, 650.0, 3000.0],
        [10.0, 2.0, 3.0, 80.0, 1000.0],
    )
    .expect("valid scaler")
}

/// Scaler that leaves values untouched, so raw inputs equal scaled inputs.
pub(super) fn identity_scaler() -> StandardScaler {
    StandardScaler::new([0.0; 5], [1.0; 5]).expect("valid scaler")
}

pub(super) fn pipeline_with(label: Outcome) -> DecisionPipeline {
    let artifacts = Artifacts::new(encoder(), scaler(), StubClassifier::returning(label));
    DecisionPipeline::new(artifacts).expect("widths line up")
}

pub(super) fn identity_pipeline_with(label: Outcome) -> DecisionPipeline {
    let artifacts = Artifacts::new(
        encoder(),
        identity_scaler(),
        StubClassifier::returning(label),
    );
    DecisionPipeline::new(artifacts).expect("widths line up")
}

pub(super) fn shared_pipeline(label: Outcome) -> Arc<DecisionPipeline> {
    Arc::new(pipeline_with(label))
}

/// Applicant that clears every override rule under [`scaler`].
pub(super) fn application() -> LoanApplication {
    LoanApplication {
        gender: "F".to_string(),
        age: 40.0,
        debt: 2.0,
        marital_status: "Married".to_string(),
        bank_customer: "Yes".to_string(),
        education: "Masters".to_string(),
        ethnicity: "Asian".to_string(),
        years_employed: 8.0,
        prior_default: "No".to_string(),
        employed: "Yes".to_string(),
        credit_score: 750.0,
        drivers_license: "Yes".to_string(),
        citizen: "Yes".to_string(),
        zip_code: "50309".to_string(),
        income: 5000.0,
    }
}

/// Applicant with favorable values under [`identity_scaler`].
pub(super) fn scaled_application(debt: f64, credit_score: f64, income: f64) -> LoanApplication {
    LoanApplication {
        age: 0.0,
        debt,
        years_employed: 0.0,
        credit_score,
        income,
        ..application()
    }
}

pub(super) fn request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        gender: Gender::F,
        age: 40,
        debt: 2.0,
        marital_status: MaritalStatus::Married,
        bank_customer: YesNo::Yes,
        education: Education::Masters,
        ethnicity: Ethnicity::Asian,
        years_employed: 8.0,
        prior_default: YesNo::No,
        employed: YesNo::Yes,
        credit_score: 750,
        drivers_license: YesNo::Yes,
        citizen: YesNo::Yes,
        zip_code: "50309".to_string(),
        income: 5000.0,
    }
}
