//! HTTP error envelope
//!
//! Domain errors map to a fixed status and error code; everything else
//! collapses to a bare 500 so store internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lineage_core::Error;
use serde::{Deserialize, Serialize};

/// Wire shape of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Error wrapper implementing the envelope mapping
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

fn visible_mapping(err: &Error) -> Option<(StatusCode, &'static str)> {
    match err {
        Error::PersonNotFound(_) => Some((StatusCode::NOT_FOUND, "PERSON_NOT_FOUND")),
        Error::PersonNotFoundInGraph => {
            Some((StatusCode::NOT_FOUND, "PERSON_NOT_FOUND_IN_GRAPH"))
        }
        Error::InvalidPersonName => Some((StatusCode::BAD_REQUEST, "INVALID_PERSON_NAME")),
        Error::InvalidPersonGender => Some((StatusCode::BAD_REQUEST, "INVALID_PERSON_GENDER")),
        Error::TooManyParents => {
            Some((StatusCode::BAD_REQUEST, "TOO_MANY_PARENTS_FOR_PERSON"))
        }
        // A malformed id cannot denote a stored person.
        Error::InvalidPersonId(_) => Some((StatusCode::NOT_FOUND, "PERSON_NOT_FOUND")),
        Error::Storage(_) | Error::Serialization(_) | Error::Internal(_) => None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match visible_mapping(&self.0) {
            Some((status, code)) => {
                let body = ErrorBody {
                    error_message: self.0.to_string(),
                    error_code: Some(code.to_string()),
                };
                (status, Json(body)).into_response()
            }
            None => {
                tracing::error!(error = %self.0, "request failed");
                let body = ErrorBody {
                    error_message: "Internal Server Error".to_string(),
                    error_code: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
