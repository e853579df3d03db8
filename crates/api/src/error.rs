//! Fehlerantworten der REST-Schnittstelle
//!
//! Format: `{"error": "<nachricht>"}`. Interne Fehler werden geloggt, aber
//! nur mit einer generischen Nachricht beantwortet.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use passierschein_auth::{AuthError, FehlerArt};

/// Ein HTTP-Fehler mit Statuscode und lesbarer Nachricht
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub nachricht: String,
}

impl ApiError {
    pub fn neu(status: StatusCode, nachricht: impl Into<String>) -> Self {
        Self {
            status,
            nachricht: nachricht.into(),
        }
    }

    pub fn bad_request(nachricht: impl Into<String>) -> Self {
        Self::neu(StatusCode::BAD_REQUEST, nachricht)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match (&e, e.art()) {
            // Verweigerte Autorisierung antwortet mit 400 wie der bestehende Dienst
            (AuthError::ZugriffVerweigert, _) => StatusCode::BAD_REQUEST,
            (_, FehlerArt::BadRequest) => StatusCode::BAD_REQUEST,
            (_, FehlerArt::Conflict) => StatusCode::CONFLICT,
            (_, FehlerArt::Unauthorized) => StatusCode::UNAUTHORIZED,
            (_, FehlerArt::Forbidden) => StatusCode::FORBIDDEN,
            (_, FehlerArt::NotFound) => StatusCode::NOT_FOUND,
            (_, FehlerArt::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(fehler = %e, "Interner Fehler bei Anfrage");
            return Self::neu(status, "error while processing the request");
        }

        Self::neu(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.nachricht }))).into_response()
    }
}
