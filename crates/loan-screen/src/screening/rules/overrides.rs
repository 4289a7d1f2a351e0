use super::super::schema::{LoanApplication, CREDIT_SCORE_INDEX, DEBT_INDEX, INCOME_INDEX};
use super::config::RuleThresholds;
use super::policy::DecisionReason;

/// Spellings of `prior_default` that count as a recorded default.
///
/// An integer `1` arrives here as `"1"` because categoricals are stringified
/// on deserialization, so the text `"1"` is treated as a default as well.
pub const PRIOR_DEFAULT_TOKENS: [&str; 6] = ["Yes", "yes", "YES", "t", "T", "1"];

pub fn indicates_prior_default(value: &str) -> bool {
    PRIOR_DEFAULT_TOKENS.contains(&value)
}

/// Hard policy checks that can reject regardless of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRule {
    CreditFloor,
    DebtToIncome,
    PriorDefault,
}

impl OverrideRule {
    /// Evaluation order; the first rule that fires decides.
    pub const PRIORITY: [OverrideRule; 3] = [
        OverrideRule::CreditFloor,
        OverrideRule::DebtToIncome,
        OverrideRule::PriorDefault,
    ];

    pub const fn reason(self) -> DecisionReason {
        match self {
            OverrideRule::CreditFloor => DecisionReason::CreditScoreBelowMinimum,
            OverrideRule::DebtToIncome => DecisionReason::HighDebtToIncome,
            OverrideRule::PriorDefault => DecisionReason::PriorDefault,
        }
    }

    /// Numeric rules compare scaled values; the default check reads the
    /// untransformed application so it is independent of encoder layout.
    pub fn matches(
        self,
        thresholds: &RuleThresholds,
        scaled_numeric: &[f64; 5],
        application: &LoanApplication,
    ) -> bool {
        match self {
            OverrideRule::CreditFloor => {
                scaled_numeric[CREDIT_SCORE_INDEX] < thresholds.credit_score_floor
            }
            OverrideRule::DebtToIncome => {
                scaled_numeric[DEBT_INDEX] > thresholds.debt_ceiling
                    && scaled_numeric[INCOME_INDEX] < thresholds.income_floor
            }
            OverrideRule::PriorDefault => indicates_prior_default(&application.prior_default),
        }
    }
}
