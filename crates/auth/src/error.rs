//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

use crate::token::TokenFehler;

/// Grobe Fehlerklasse, auf die jede Grenze (HTTP, Logs) abbildet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FehlerArt {
    BadRequest,
    Conflict,
    Unauthorized,
    Forbidden,
    NotFound,
    Internal,
}

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("{0}")]
    UngueltigeEingabe(String),

    // --- Registrierung ---
    #[error("this email or phone number already exists!")]
    BereitsVorhanden,

    // --- Authentifizierung ---
    #[error("email or password is incorrect")]
    UngueltigeAnmeldedaten,

    #[error("No Authorization header provided")]
    TokenFehlt,

    #[error("{0}")]
    TokenUngueltig(#[from] TokenFehler),

    // --- Autorisierung ---
    #[error("unauthorized to access this resource")]
    ZugriffVerweigert,

    // --- Benutzer ---
    #[error("user not found")]
    BenutzerNichtGefunden,

    // --- Intern ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Token-Signierung fehlgeschlagen: {0}")]
    TokenSignierung(String),

    #[error("Zeitueberschreitung bei Datenbankzugriff")]
    Zeitueberschreitung,

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] passierschein_db::DbError),
}

impl AuthError {
    pub fn art(&self) -> FehlerArt {
        match self {
            Self::UngueltigeEingabe(_) => FehlerArt::BadRequest,
            Self::BereitsVorhanden => FehlerArt::Conflict,
            Self::UngueltigeAnmeldedaten | Self::TokenUngueltig(_) => FehlerArt::Unauthorized,
            Self::TokenFehlt | Self::ZugriffVerweigert => FehlerArt::Forbidden,
            Self::BenutzerNichtGefunden => FehlerArt::NotFound,
            Self::PasswortHashing(_)
            | Self::TokenSignierung(_)
            | Self::Zeitueberschreitung
            | Self::Datenbank(_) => FehlerArt::Internal,
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
