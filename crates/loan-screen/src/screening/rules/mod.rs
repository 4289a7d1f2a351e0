mod config;
mod overrides;
mod policy;

pub use config::RuleThresholds;
pub use overrides::{indicates_prior_default, OverrideRule, PRIOR_DEFAULT_TOKENS};
pub use policy::{Decision, DecisionReason, Outcome};

use super::schema::LoanApplication;
use super::transformer::TransformedFeatures;

/// Stateless evaluator applying the override rules on top of a model prediction.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    thresholds: RuleThresholds,
}

impl RuleEngine {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// First matching rule in [`OverrideRule::PRIORITY`] rejects; otherwise the
    /// model prediction stands.
    pub fn apply(
        &self,
        features: &TransformedFeatures,
        application: &LoanApplication,
        model_prediction: Outcome,
    ) -> Decision {
        self.matching_rule(features.scaled_numeric(), application)
            .map(|rule| Decision::rejected(rule.reason()))
            .unwrap_or_else(|| Decision::from_model(model_prediction))
    }

    pub fn matching_rule(
        &self,
        scaled_numeric: &[f64; 5],
        application: &LoanApplication,
    ) -> Option<OverrideRule> {
        OverrideRule::PRIORITY
            .into_iter()
            .find(|rule| rule.matches(&self.thresholds, scaled_numeric, application))
    }
}
