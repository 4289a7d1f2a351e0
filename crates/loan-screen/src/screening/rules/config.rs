use serde::{Deserialize, Serialize};

/// Override thresholds expressed in scaled (standardized) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Reject when scaled credit score is below this.
    pub credit_score_floor: f64,
    /// Debt-to-income net: scaled debt above this...
    pub debt_ceiling: f64,
    /// ...and scaled income below this.
    pub income_floor: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            credit_score_floor: -1.5,
            debt_ceiling: 2.0,
            income_floor: -0.5,
        }
    }
}
