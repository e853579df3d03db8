//! Route-Definitionen fuer die REST-API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use passierschein_db::{SessionRepository, UserRepository};

use crate::{handlers, middleware::authentifizieren, AppState};

/// Erstellt den vollstaendigen Router
///
/// Signup und Login sind oeffentlich, alle uebrigen Benutzer-Routen laufen
/// durch die Token-Middleware.
pub fn router<R>(state: AppState<R>) -> Router
where
    R: UserRepository + SessionRepository + 'static,
{
    let geschuetzt = Router::new()
        .route("/users", get(handlers::users::list_users::<R>))
        .route("/users/:user_id", get(handlers::users::get_user::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentifizieren::<R>,
        ));

    Router::new()
        .route("/users/signup", post(handlers::auth::signup::<R>))
        .route("/users/login", post(handlers::auth::login::<R>))
        .merge(geschuetzt)
        .with_state(state)
}
