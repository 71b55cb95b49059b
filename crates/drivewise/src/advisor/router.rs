use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BuyScenario, LeaseScenario, UserProfile};
use super::explain::{ExplanationRequest, NarrativeGenerator};
use super::service::AdvisorService;

/// Request body for the decision endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub user: UserProfile,
    pub buy: BuyScenario,
    pub lease: LeaseScenario,
}

/// Router builder exposing the decision and explanation endpoints.
pub fn advisor_router<G>(service: Arc<AdvisorService<G>>) -> Router
where
    G: NarrativeGenerator + 'static,
{
    Router::new()
        .route("/api/v1/advisor/decision", post(decision_handler::<G>))
        .route(
            "/api/v1/advisor/explanation",
            post(explanation_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn decision_handler<G>(
    State(service): State<Arc<AdvisorService<G>>>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    G: NarrativeGenerator + 'static,
{
    match service.decide(&request.user, &request.buy, &request.lease) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn explanation_handler<G>(
    State(service): State<Arc<AdvisorService<G>>>,
    axum::Json(request): axum::Json<ExplanationRequest>,
) -> Response
where
    G: NarrativeGenerator + 'static,
{
    let explanation = service.explain(&request);
    (StatusCode::OK, axum::Json(explanation)).into_response()
}
