//! Request-Timing Middleware fuer Axum
//!
//! Misst die Antwortzeit jeder HTTP-Anfrage und protokolliert sie als
//! strukturiertes Log-Event. Die Stufe richtet sich nach dem Statuscode.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    middleware::Next,
};
use std::time::Instant;

/// Log-Stufe fuer eine abgeschlossene Anfrage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStufe {
    Info,
    Warn,
    Error,
}

pub fn log_stufe(status: StatusCode) -> LogStufe {
    if status.is_server_error() {
        LogStufe::Error
    } else if status.is_client_error() {
        LogStufe::Warn
    } else {
        LogStufe::Info
    }
}

/// Axum-Middleware-Funktion: misst Antwortzeit und loggt strukturiert.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn(timing_middleware))
/// ```
pub async fn timing_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let methode = req.method().clone();
    let pfad = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let dauer_ms = start.elapsed().as_millis();
    let status = response.status();

    match log_stufe(status) {
        LogStufe::Info => tracing::info!(
            method = %methode,
            path = %pfad,
            status = status.as_u16(),
            duration_ms = dauer_ms,
            "HTTP-Anfrage abgeschlossen"
        ),
        LogStufe::Warn => tracing::warn!(
            method = %methode,
            path = %pfad,
            status = status.as_u16(),
            duration_ms = dauer_ms,
            "HTTP-Anfrage abgelehnt"
        ),
        LogStufe::Error => tracing::error!(
            method = %methode,
            path = %pfad,
            status = status.as_u16(),
            duration_ms = dauer_ms,
            "HTTP-Anfrage fehlgeschlagen"
        ),
    }

    response
}
