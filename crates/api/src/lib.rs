//! passierschein-api – REST-Schnittstelle
//!
//! Endpunkte (Pfade und Statuscodes kompatibel zum bestehenden Dienst):
//! - `POST /users/signup`
//! - `POST /users/login`
//! - `GET /users/:user_id` (Header `token`)
//! - `GET /users?recordsPerPage=&page=&startIndex=` (Header `token`, nur ADMIN)

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use std::sync::Arc;

use passierschein_auth::AuthService;

pub use error::ApiError;
pub use routes::router;
pub use server::{RestServer, RestServerKonfig};

/// Axum-State fuer die REST-Schnittstelle
pub struct AppState<R> {
    pub auth: Arc<AuthService<R>>,
}

impl<R> AppState<R> {
    pub fn neu(auth: Arc<AuthService<R>>) -> Self {
        Self { auth }
    }
}

// Manuell, damit R selbst nicht Clone sein muss
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
        }
    }
}
