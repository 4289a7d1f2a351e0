use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::screening::classifier::{Classifier, ClassifierError};
use crate::screening::pipeline::{Artifacts, DecisionPipeline};
use crate::screening::router::{
    predict_handler, screening_router, APPROVED_MESSAGE, REJECTED_MESSAGE,
};
use crate::screening::rules::Outcome;
use crate::screening::schema::YesNo;

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

#[tokio::test]
async fn root_route_returns_welcome_message() {
    let router = screening_router(shared_pipeline(Outcome::Approved));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).expect("request builds"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Welcome to the loan pre-screening system");
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn predict_route_approves_clean_application() {
    let router = screening_router(shared_pipeline(Outcome::Approved));
    let payload = serde_json::to_vec(&request()).expect("serializes");

    let response = router
        .oneshot(predict_request(payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["approval"], APPROVED_MESSAGE);
    assert_eq!(body["outcome"], 1);
    assert_eq!(body["reason"], "Approved: Meets all criteria");
    assert!(body["evaluated_at"].is_string());
}

#[tokio::test]
async fn predict_handler_rejects_prior_default() {
    let mut request = request();
    request.prior_default = YesNo::Yes;

    let response = predict_handler(
        State(shared_pipeline(Outcome::Approved)),
        axum::Json(request),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["approval"], REJECTED_MESSAGE);
    assert_eq!(body["outcome"], 0);
    assert_eq!(body["reason"], "Rejected: History of prior default");
}

#[tokio::test]
async fn predict_handler_returns_unprocessable_for_non_positive_income() {
    let mut request = request();
    request.income = -10.0;

    let response = predict_handler(
        State(shared_pipeline(Outcome::Approved)),
        axum::Json(request),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "invalid application: income must be greater than zero"
    );
}

#[tokio::test]
async fn predict_route_rejects_values_outside_the_enumerations() {
    let router = screening_router(shared_pipeline(Outcome::Approved));
    let mut payload = serde_json::to_value(request()).expect("serializes");
    payload["education"] = Value::from("Doctorate");

    let response = router
        .oneshot(predict_request(
            serde_json::to_vec(&payload).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn predict_route_accepts_high_school_spelling() {
    let router = screening_router(shared_pipeline(Outcome::Rejected));
    let mut payload = serde_json::to_value(request()).expect("serializes");
    payload["education"] = Value::from("High School");

    let response = router
        .oneshot(predict_request(
            serde_json::to_vec(&payload).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["reason"], "Rejected: ML Model risk assessment");
}

/// Reports the fitted width but fails every prediction.
#[derive(Debug)]
struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn input_width(&self) -> usize {
        MODEL_WIDTH
    }

    fn predict(&self, input: &[f64]) -> Result<Outcome, ClassifierError> {
        Err(ClassifierError::InputMismatch {
            expected: MODEL_WIDTH + 1,
            actual: input.len(),
        })
    }
}

#[tokio::test]
async fn predict_route_hides_pipeline_failures_behind_a_generic_error() {
    let artifacts = Artifacts::new(encoder(), scaler(), FailingClassifier);
    let pipeline = DecisionPipeline::new(artifacts).expect("widths line up");
    let router = screening_router(std::sync::Arc::new(pipeline));
    let payload = serde_json::to_vec(&request()).expect("serializes");

    let response = router
        .oneshot(predict_request(payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "internal error");
}
