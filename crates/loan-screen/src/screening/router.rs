use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;

use super::pipeline::{DecisionError, DecisionPipeline};
use super::rules::{Decision, Outcome};
use super::schema::LoanApplicationRequest;

pub const APPROVED_MESSAGE: &str = "Congratulations! Your loan has been approved";
pub const REJECTED_MESSAGE: &str = "Unfortunately, your loan has been rejected";

/// Router builder exposing the pre-screening endpoints.
pub fn screening_router(pipeline: Arc<DecisionPipeline>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/predict", post(predict_handler))
        .with_state(pipeline)
}

/// Response body for `POST /predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub approval: &'static str,
    pub outcome: Outcome,
    pub reason: &'static str,
    pub evaluated_at: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn from_decision(decision: &Decision, evaluated_at: DateTime<Utc>) -> Self {
        let approval = if decision.outcome.is_approved() {
            APPROVED_MESSAGE
        } else {
            REJECTED_MESSAGE
        };

        Self {
            approval,
            outcome: decision.outcome,
            reason: decision.summary(),
            evaluated_at,
        }
    }
}

pub(crate) async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the loan pre-screening system",
        "status": "success",
    }))
}

pub(crate) async fn predict_handler(
    State(pipeline): State<Arc<DecisionPipeline>>,
    Json(request): Json<LoanApplicationRequest>,
) -> Result<Response, AppError> {
    let application = request.into_application().map_err(|violation| {
        warn!(%violation, "loan application failed schema validation");
        AppError::from(violation)
    })?;

    let decision = pipeline.decide(&application).map_err(|err| {
        match &err {
            DecisionError::UnknownCategory(_) => {
                warn!(%err, "strict encoder rejected application")
            }
            _ => error!(%err, "decision pipeline failed"),
        }
        AppError::from(err)
    })?;

    let body = PredictionResponse::from_decision(&decision, Utc::now());
    Ok((StatusCode::OK, Json(body)).into_response())
}
