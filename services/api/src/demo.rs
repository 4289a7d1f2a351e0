use chrono::Utc;
use clap::Args;
use loan_screen::error::AppError;
use loan_screen::screening::schema::{CREDIT_SCORE_INDEX, DEBT_INDEX, INCOME_INDEX};
use loan_screen::screening::{
    Artifacts, DecisionPipeline, Education, Ethnicity, Gender, LoanApplicationRequest,
    LogisticRegression, MaritalStatus, OneHotEncoder, PredictionResponse, StandardScaler,
    UnknownCategoryPolicy, YesNo,
};

/// Training statistics for age, debt, years employed, credit score, income.
const DEMO_MEAN: [f64; 5] = [35.0, 5.0, 4.0, 650.0, 3000.0];
const DEMO_SCALE: [f64; 5] = [10.0, 2.0, 3.0, 80.0, 1000.0];

/// Numeric block followed by the one-hot block in sorted category order.
const DEMO_COEFFICIENTS: [f64; 28] = [
    0.1, -0.7, 0.4, 1.5, 0.8, // age, debt, years_employed, credit_score, income
    0.0, 0.0, // gender
    0.0, 0.0, 0.0, // marital_status
    0.0, 0.2, // bank_customer
    0.0, 0.0, 0.0, 0.0, 0.0, // education
    0.0, 0.0, 0.0, // ethnicity
    0.5, -2.0, // prior_default
    0.0, 0.5, // employed
    0.0, 0.0, // drivers_license
    0.0, 0.0, // citizen
];

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each decision as the JSON body `/predict` would return.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Pipeline over in-memory artifacts, for demos without a model directory.
pub(crate) fn demo_pipeline() -> Result<DecisionPipeline, AppError> {
    let encoder = OneHotEncoder::from_schema(UnknownCategoryPolicy::Ignore);
    let scaler = StandardScaler::new(DEMO_MEAN, DEMO_SCALE)?;
    let classifier = LogisticRegression::new(DEMO_COEFFICIENTS.to_vec(), 0.0)?;

    Ok(DecisionPipeline::new(Artifacts::new(
        encoder, scaler, classifier,
    ))?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let pipeline = demo_pipeline()?;
    let thresholds = *pipeline.rules().thresholds();
    let scaler = pipeline.transformer().scaler();

    println!("Loan pre-screening demo");
    println!("Override thresholds (raw units under the demo scaler):");
    println!(
        "  Credit score below {:.0}",
        scaler.inverse(CREDIT_SCORE_INDEX, thresholds.credit_score_floor)
    );
    println!(
        "  Debt above {:.1} with income below {:.0}",
        scaler.inverse(DEBT_INDEX, thresholds.debt_ceiling),
        scaler.inverse(INCOME_INDEX, thresholds.income_floor)
    );
    println!("  Any prior default");

    println!("\nApplications");
    for (label, request) in demo_applications() {
        let application = match request.into_application() {
            Ok(application) => application,
            Err(err) => {
                println!("- {label}: rejected at intake ({err})");
                continue;
            }
        };

        let decision = pipeline.decide(&application)?;
        if args.json {
            let body = PredictionResponse::from_decision(&decision, Utc::now());
            println!("- {label}: {}", serde_json::to_string(&body)?);
        } else {
            println!("- {label}: {}", decision.summary());
        }
    }

    Ok(())
}

fn demo_applications() -> Vec<(&'static str, LoanApplicationRequest)> {
    let baseline = LoanApplicationRequest {
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
    };

    vec![
        ("Established borrower", baseline.clone()),
        (
            "Recent graduate",
            LoanApplicationRequest {
                gender: Gender::M,
                age: 22,
                debt: 7.0,
                marital_status: MaritalStatus::Single,
                bank_customer: YesNo::No,
                education: Education::HighSchool,
                years_employed: 0.0,
                employed: YesNo::No,
                credit_score: 600,
                income: 2600.0,
                ..baseline.clone()
            },
        ),
        (
            "Thin credit file",
            LoanApplicationRequest {
                credit_score: 500,
                ..baseline.clone()
            },
        ),
        (
            "Heavily indebted",
            LoanApplicationRequest {
                debt: 10.0,
                income: 2000.0,
                ..baseline.clone()
            },
        ),
        (
            "Prior default",
            LoanApplicationRequest {
                prior_default: YesNo::Yes,
                ..baseline.clone()
            },
        ),
        (
            "No declared income",
            LoanApplicationRequest {
                income: 0.0,
                ..baseline
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_screen::screening::DecisionReason;

    #[test]
    fn demo_pipeline_lines_up_widths() {
        let pipeline = demo_pipeline().expect("demo pipeline builds");
        assert_eq!(pipeline.transformer().output_width(), DEMO_COEFFICIENTS.len());
    }

    #[test]
    fn demo_applications_cover_each_reason() {
        let pipeline = demo_pipeline().expect("demo pipeline builds");
        let reasons: Vec<DecisionReason> = demo_applications()
            .into_iter()
            .filter_map(|(_, request)| request.into_application().ok())
            .map(|application| pipeline.decide(&application).expect("decides").reason)
            .collect();

        assert_eq!(
            reasons,
            vec![
                DecisionReason::MeetsAllCriteria,
                DecisionReason::ModelRiskAssessment,
                DecisionReason::CreditScoreBelowMinimum,
                DecisionReason::HighDebtToIncome,
                DecisionReason::PriorDefault,
            ]
        );
    }
}
