use axum::{
    extract::rejection::JsonRejection,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::films::{FieldViolation, FilmError};

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub code: String,
    pub request_id: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldViolation> for FieldError {
    fn from(violation: FieldViolation) -> Self {
        Self {
            field: violation.field,
            message: violation.message,
        }
    }
}

impl ProblemDetails {
    fn new(status: StatusCode, code: impl Into<String>, detail: impl Into<String>) -> Self {
        let code = code.into();
        let title = status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string();
        Self {
            r#type: format!("https://dvd-catalog.dev/problems/{code}"),
            title,
            status: status.as_u16(),
            detail: detail.into(),
            instance: None,
            code,
            request_id: "unknown".to_string(),
            retryable: false,
            details: None,
        }
    }

    fn set_request_id(&mut self, request_id: impl Into<String>) {
        let request_id = request_id.into();
        self.request_id = request_id.clone();
        if self.instance.is_none() {
            self.instance = Some(request_id);
        }
    }

    fn set_details(&mut self, details: Vec<FieldError>) {
        self.details = Some(details);
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub problem: Box<ProblemDetails>,
}

impl ApiError {
    fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        let problem = Box::new(ProblemDetails::new(status, code, message));
        Self { status, problem }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn unprocessable_entity(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    /// Maps a body extraction failure, keeping axum's status
    /// (422 for wrong field types, 400 for malformed JSON, 415 for content type).
    pub fn from_json_rejection(rejection: &JsonRejection) -> Self {
        Self::new(rejection.status(), "invalid_body", rejection.body_text())
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.problem.set_request_id(request_id);
        self
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.problem.set_details(details);
        self
    }
}

impl From<FilmError> for ApiError {
    fn from(err: FilmError) -> Self {
        match err {
            FilmError::InvalidIdentifier(e) => {
                ApiError::bad_request("invalid_film_id", format!("Invalid film ID: {e}"))
            }
            FilmError::Validation(violations) => ApiError::unprocessable_entity(
                "validation_failed",
                "Film record failed validation",
            )
            .with_details(violations.into_iter().map(FieldError::from).collect()),
            FilmError::NotFound(key) => {
                ApiError::not_found("film_not_found", format!("No film matches '{key}'"))
            }
            FilmError::Storage(e) => {
                tracing::error!(error = %e, "Film store operation failed");
                let mut api_error =
                    ApiError::internal("storage_error", "The film store could not complete the request");
                api_error.problem.retryable = true;
                api_error
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.problem)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use dvd_id::FilmId;

    use super::*;
    use crate::db::DbError;

    #[test]
    fn test_film_error_statuses() {
        let invalid_id: ApiError = FilmError::from(FilmId::parse("nope").unwrap_err()).into();
        assert_eq!(invalid_id.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid_id.problem.code, "invalid_film_id");

        let validation: ApiError =
            FilmError::Validation(vec![FieldViolation::missing("title")]).into();
        assert_eq!(validation.status, StatusCode::UNPROCESSABLE_ENTITY);
        let details = validation.problem.details.as_ref().unwrap();
        assert_eq!(details[0].field, "title");
        assert_eq!(details[0].message, "title is required");

        let not_found: ApiError = FilmError::NotFound("Heat".to_string()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let storage: ApiError =
            FilmError::Storage(DbError::Unavailable("down".to_string())).into();
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(storage.problem.retryable);
        assert!(!storage.problem.detail.contains("down"));
    }

    #[test]
    fn test_request_id_sets_instance() {
        let err = ApiError::not_found("film_not_found", "missing").with_request_id("req-1");
        assert_eq!(err.problem.request_id, "req-1");
        assert_eq!(err.problem.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_problem_json_content_type() {
        let response = ApiError::bad_request("x", "y").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
