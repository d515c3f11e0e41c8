use crate::data::InvalidSliceable;
use crate::web::ResolveError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde_json::json;
use std::fmt::Debug;
use tracing::{debug, error, info};

const ERROR_UNKNOWN: &str = "Unknown Error";

#[derive(Debug)]
pub enum ErrorResponse {
    InternalError(anyhow::Error),
    AppError {
        status_code: StatusCode,
        message: Option<String>,
    },
}

pub type Result<T, E = ErrorResponse> = core::result::Result<T, E>;

impl ErrorResponse {
    pub fn new_with_message(message: &str) -> Self {
        Self::AppError {
            status_code: StatusCode::BAD_REQUEST,
            message: Some(message.to_owned()),
        }
    }

    pub fn new_with_status_code(status_code: StatusCode) -> Self {
        Self::AppError {
            status_code,
            message: None,
        }
    }

    /// Status the response will carry.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AppError { status_code, .. } => *status_code,
            Self::InternalError(e) => match pagination_error(e) {
                Some(PaginationFault::Invalid(_)) => StatusCode::BAD_REQUEST,
                Some(PaginationFault::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
                None if is_rejection(e) => StatusCode::BAD_REQUEST,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

enum PaginationFault<'a> {
    Invalid(&'a InvalidSliceable),
    Config(&'a ResolveError),
}

fn pagination_error(e: &anyhow::Error) -> Option<PaginationFault<'_>> {
    if let Some(invalid) = e.downcast_ref::<InvalidSliceable>() {
        return Some(PaginationFault::Invalid(invalid));
    }
    match e.downcast_ref::<ResolveError>()? {
        ResolveError::Invalid(invalid) => Some(PaginationFault::Invalid(invalid)),
        config @ ResolveError::Config(_) => Some(PaginationFault::Config(config)),
    }
}

fn is_rejection(e: &anyhow::Error) -> bool {
    e.downcast_ref::<QueryRejection>().is_some()
}

macro_rules! match_rejection {
    ( $e: expr, $($rej: ty), +) => {
        $(
        match $e.downcast_ref::<$rej>() {
            Some(e) => {
                info!(e = ?e, "general bad params rejection incur");
                return into_json_response(StatusCode::BAD_REQUEST, &e.body_text());
            },
            _ => {}
        }
        ) +
    };
}

fn into_json_response(status_code: StatusCode, message: &str) -> Response {
    (
        status_code,
        [("content-type", "application/json")],
        serde_json::to_string(&json!({
            "code": status_code.as_u16(),
            "message": message
        }))
        // must not be failed
        .unwrap_or("{}".to_owned()),
    )
        .into_response()
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        match self {
            Self::InternalError(e) => {
                match pagination_error(&e) {
                    Some(PaginationFault::Invalid(invalid)) => {
                        info!(e = %invalid, "invalid pagination request");
                        return into_json_response(StatusCode::BAD_REQUEST, &invalid.to_string());
                    }
                    Some(PaginationFault::Config(config)) => {
                        // broken endpoint declaration, not the client's fault
                        error!(e = %config, "pagination misconfigured");
                    }
                    None => {
                        match_rejection!(e, QueryRejection);
                        error!(e = ?e, source_err = ?e.source(), "unprocessable error incur");
                    }
                }
            }
            Self::AppError {
                status_code,
                message,
            } => {
                debug!(code = ?status_code, message = message, "app error is returned");
                let message = message
                    .as_deref()
                    .unwrap_or(status_code.canonical_reason().unwrap_or(ERROR_UNKNOWN));
                return into_json_response(status_code, message);
            }
        }
        into_json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::INTERNAL_SERVER_ERROR
                .canonical_reason()
                .unwrap_or(ERROR_UNKNOWN),
        )
    }
}

impl<E> From<E> for ErrorResponse
where
    E: Into<anyhow::Error> + Debug,
{
    fn from(e: E) -> Self {
        Self::InternalError(e.into())
    }
}

pub fn new_fallback_response_handler() -> Router {
    Router::new().fallback(any(|| async {
        ErrorResponse::new_with_status_code(StatusCode::NOT_FOUND)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::ConfigError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    pub async fn test_invalid_sliceable_is_bad_request() {
        let err = ErrorResponse::from(ResolveError::Invalid(InvalidSliceable::BeyondLimit));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "code": 400, "message": "Cannot get elements beyond 2000." })
        );
    }

    #[tokio::test]
    pub async fn test_bare_invalid_sliceable() {
        let response = ErrorResponse::from(InvalidSliceable::MissingPageNumber).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "pageNumber must be not null."
        );
    }

    #[tokio::test]
    pub async fn test_config_error_is_internal() {
        let err = ErrorResponse::from(ResolveError::Config(ConfigError::Ambiguous(
            "list".to_owned(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "code": 500, "message": "Internal Server Error" })
        );
    }

    #[tokio::test]
    pub async fn test_app_error() {
        let response = ErrorResponse::new_with_message("bad things").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "bad things");

        let response = ErrorResponse::new_with_status_code(StatusCode::NOT_FOUND).into_response();
        assert_eq!(body_json(response).await["message"], "Not Found");
    }
}
