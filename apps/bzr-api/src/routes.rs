use axum::{
	Json, Router,
	extract::{Request, State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use bzr_service::{AskRequest, AskResponse, Error as ServiceError, ScoredPost};

#[derive(Debug, Deserialize)]
pub struct RelevantRequest {
	pub query: String,
	pub min_score: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct RelevantResponse {
	pub posts: Vec<ScoredPost>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	fn invalid(message: impl Into<String>, field: &str) -> Self {
		let fields = Some(vec![field.to_string()]);

		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, fields)
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			ServiceError::Provider { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR", message, None),
			ServiceError::Storage { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message, None),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	let v1 = Router::new()
		.route("/v1/blog/relevant", post(relevant_posts))
		.route("/v1/agent/ask", post(ask))
		.route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

	Router::new().route("/health", get(health)).merge(v1).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn relevant_posts(
	State(state): State<AppState>,
	payload: Result<Json<RelevantRequest>, JsonRejection>,
) -> Result<Json<RelevantResponse>, ApiError> {
	let Json(payload) = payload?;

	if payload.query.trim().is_empty() {
		return Err(ApiError::invalid("query must be non-empty.", "query"));
	}

	let min_score = payload.min_score.unwrap_or(state.service.cfg.relevance.primary_min_score);

	if !min_score.is_finite() || !(0.0..=1.0).contains(&min_score) {
		return Err(ApiError::invalid("min_score must be a finite number in [0, 1].", "min_score"));
	}

	let posts = state.service.find_relevant_blog_posts(&payload.query, min_score).await;

	Ok(Json(RelevantResponse { posts }))
}

async fn ask(
	State(state): State<AppState>,
	payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.ask(payload).await?;

	Ok(Json(response))
}

async fn require_auth(
	State(state): State<AppState>,
	request: Request,
	next: Next,
) -> Result<Response, ApiError> {
	let expected = state.service.cfg.security.api_auth_token.as_deref();

	if expected.is_some_and(|token| read_bearer_token(request.headers()) != Some(token)) {
		return Err(ApiError::new(
			StatusCode::UNAUTHORIZED,
			"UNAUTHORIZED",
			"A valid Bearer token is required.",
			None,
		));
	}

	Ok(next.run(request).await)
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	#[test]
	fn reads_bearer_token() {
		let mut headers = HeaderMap::new();

		assert_eq!(read_bearer_token(&headers), None);

		headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer  s3cret "));

		assert_eq!(read_bearer_token(&headers), Some("s3cret"));

		headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic s3cret"));

		assert_eq!(read_bearer_token(&headers), None);
	}
}
