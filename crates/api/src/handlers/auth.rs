//! REST-Handler fuer Registrierung und Login

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use validator::Validate;

use passierschein_auth::{AuthError, NeueRegistrierung};
use passierschein_core::Rolle;
use passierschein_db::{BenutzerRecord, SessionRepository, UserRepository};

use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct SignupBody {
    #[validate(required, length(min = 2, max = 50))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 2, max = 50))]
    pub last_name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required)]
    pub password: Option<String>,
    #[validate(required)]
    pub phone: Option<String>,
    #[validate(required)]
    pub user_type: Option<String>,
}

impl SignupBody {
    /// Strukturelle Pruefung und Umwandlung in Registrierungsdaten
    pub fn pruefen(self) -> Result<NeueRegistrierung, ApiError> {
        self.validate()?;

        let user_type = pflicht(self.user_type, "user_type")?
            .parse::<Rolle>()
            .map_err(|_| ApiError::bad_request("user_type must be one of USER, ADMIN"))?;

        Ok(NeueRegistrierung {
            first_name: pflicht(self.first_name, "first_name")?,
            last_name: pflicht(self.last_name, "last_name")?,
            email: pflicht(self.email, "email")?,
            password: pflicht(self.password, "password")?,
            phone: pflicht(self.phone, "phone")?,
            user_type,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginBody {
    #[validate(required)]
    pub email: Option<String>,
    #[validate(required)]
    pub password: Option<String>,
}

fn pflicht(wert: Option<String>, feld: &str) -> Result<String, ApiError> {
    wert.ok_or_else(|| ApiError::bad_request(format!("{feld}: field is required")))
}

/// `POST /users/signup`
pub async fn signup<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<SignupBody>, JsonRejection>,
) -> Result<(StatusCode, Json<BenutzerRecord>), ApiError>
where
    R: UserRepository + SessionRepository + 'static,
{
    let Json(body) = body?;
    let registrierung = body.pruefen()?;

    let benutzer = state.auth.registrieren(registrierung).await?;
    Ok((StatusCode::CREATED, Json(benutzer)))
}

/// `POST /users/login`
pub async fn login<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<BenutzerRecord>, ApiError>
where
    R: UserRepository + SessionRepository + 'static,
{
    let Json(body) = body?;
    body.validate()?;
    let email = pflicht(body.email, "email")?;
    let password = pflicht(body.password, "password")?;

    match state.auth.anmelden(&email, &password).await {
        Ok(benutzer) => Ok(Json(benutzer)),
        // Unbekannte E-Mail beantwortet der bestehende Dienst mit 400
        Err(AuthError::BenutzerNichtGefunden) => Err(ApiError::bad_request("user not found")),
        Err(e) => Err(e.into()),
    }
}
