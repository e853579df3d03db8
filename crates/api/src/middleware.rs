//! Axum-Middleware fuer die Token-Pruefung
//!
//! Liest den Header `token`, prueft ihn ueber den AuthService und legt die
//! dekodierten [`Claims`] als Request-Extension ab. Nachgelagerte Handler
//! holen sie mit `Extension<Claims>`.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use passierschein_auth::{AuthError, Claims, TokenFehler};
use passierschein_db::{SessionRepository, UserRepository};

use crate::{error::ApiError, AppState};

/// Name des Headers, der das Zugangs-Token traegt
pub const TOKEN_HEADER: &str = "token";

/// Extrahiert den Token-Header
///
/// Ein vorhandener, aber nicht lesbarer Wert (nicht sichtbares ASCII) ist ein
/// fehlerhaftes Token, kein fehlender Header.
pub fn token_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(TOKEN_HEADER) {
        None => Ok(None),
        Some(wert) => wert
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::TokenUngueltig(TokenFehler::Fehlerhaft)),
    }
}

/// Axum-Middleware: lehnt Anfragen ohne gueltiges Token ab
pub async fn authentifizieren<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + 'static,
{
    let geprueft = token_header(req.headers())
        .and_then(|token| state.auth.anfrage_authentifizieren(token));
    let claims: Claims = match geprueft {
        Ok(c) => c,
        Err(e) => return ApiError::from(e).into_response(),
    };

    tracing::debug!(user_id = %claims.user_id, user_type = %claims.user_type, "Anfrage authentifiziert");
    req.extensions_mut().insert(claims);
    next.run(req).await
}
