use serde::{Deserialize, Serialize, Serializer};

/// Binary label shared by the classifier and the final decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Rejected,
    Approved,
}

impl Outcome {
    pub const fn as_u8(self) -> u8 {
        match self {
            Outcome::Rejected => 0,
            Outcome::Approved => 1,
        }
    }

    pub const fn is_approved(self) -> bool {
        matches!(self, Outcome::Approved)
    }
}

impl From<Outcome> for u8 {
    fn from(value: Outcome) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Rejected),
            1 => Ok(Outcome::Approved),
            other => Err(format!("outcome must be 0 or 1, got {other}")),
        }
    }
}

/// Why the pipeline reached its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionReason {
    CreditScoreBelowMinimum,
    HighDebtToIncome,
    PriorDefault,
    MeetsAllCriteria,
    ModelRiskAssessment,
}

impl DecisionReason {
    pub const fn summary(self) -> &'static str {
        match self {
            DecisionReason::CreditScoreBelowMinimum => {
                "Rejected: Credit score below minimum threshold"
            }
            DecisionReason::HighDebtToIncome => "Rejected: High debt-to-income ratio",
            DecisionReason::PriorDefault => "Rejected: History of prior default",
            DecisionReason::MeetsAllCriteria => "Approved: Meets all criteria",
            DecisionReason::ModelRiskAssessment => "Rejected: ML Model risk assessment",
        }
    }

    /// True when a policy rule, not the model, produced the decision.
    pub const fn is_override(self) -> bool {
        !matches!(
            self,
            DecisionReason::MeetsAllCriteria | DecisionReason::ModelRiskAssessment
        )
    }
}

/// Final pipeline output, serialized as `{"outcome": 0|1, "reason": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: DecisionReason,
}

impl Decision {
    pub(crate) const fn rejected(reason: DecisionReason) -> Self {
        Self {
            outcome: Outcome::Rejected,
            reason,
        }
    }

    pub(crate) const fn from_model(prediction: Outcome) -> Self {
        match prediction {
            Outcome::Approved => Self {
                outcome: Outcome::Approved,
                reason: DecisionReason::MeetsAllCriteria,
            },
            Outcome::Rejected => Self::rejected(DecisionReason::ModelRiskAssessment),
        }
    }

    pub fn summary(&self) -> &'static str {
        self.reason.summary()
    }
}

fn serialize_reason<S>(reason: &DecisionReason, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(reason.summary())
}
