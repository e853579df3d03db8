//! Axum HTTP-Server fuer Passierschein

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use passierschein_observability::timing_middleware;

use crate::middleware::TOKEN_HEADER;

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

impl Default for RestServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origins: vec![],
        }
    }
}

/// Axum HTTP-Server
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    fn cors_layer(&self) -> CorsLayer {
        if self.konfig.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }

        let origins: Vec<HeaderValue> = self
            .konfig
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                HeaderName::from_static(TOKEN_HEADER),
                axum::http::header::CONTENT_TYPE,
            ])
    }

    /// Versieht den Router mit Timing, Tracing und CORS
    pub fn app_bauen(&self, app: Router) -> Router {
        app.layer(middleware::from_fn(timing_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(self.cors_layer())
    }

    /// Startet den REST-Server und laeuft bis `shutdown` aufgeloest wird
    pub async fn starten<F>(self, app: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.app_bauen(app);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }
}
