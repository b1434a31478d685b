use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use recall_service::{AskRequest, Error as ServiceError, IngestRequest, IngestResponse};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/", get(ask))
		.route("/notes", post(ingest))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct AskParams {
	text: Option<String>,
}

async fn ask(
	State(state): State<AppState>,
	Query(params): Query<AskParams>,
) -> Result<String, ApiError> {
	let response = state.service.ask(AskRequest { text: params.text }).await?;

	Ok(response.answer)
}

async fn ingest(
	State(state): State<AppState>,
	Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
	let response = state.service.ingest(request).await?;

	Ok(Json(response))
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let status = match &err {
			ServiceError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
			ServiceError::GenerationFailure { .. } | ServiceError::EmbeddingFailure { .. } =>
				StatusCode::BAD_GATEWAY,
			ServiceError::PersistenceFailure { .. }
			| ServiceError::Storage { .. }
			| ServiceError::Index { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		};

		Self { status, error_code: err.code(), message: err.to_string() }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: &'static str,
	message: String,
}
