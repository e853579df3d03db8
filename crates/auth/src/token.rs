//! Signierte Zugangs- und Refresh-Tokens (JWT, HS256)
//!
//! Ein Zugangs-Token traegt die vollen Identitaets-Claims und lebt
//! standardmaessig 24 Stunden. Ein Refresh-Token traegt nur `exp` (leere
//! Identitaetsfelder) und lebt 168 Stunden. Diese Asymmetrie ist Teil des
//! Wire-Formats bereits ausgegebener Tokens und bleibt erhalten.
//!
//! Die JSON-Feldnamen (`Email`, `FirstName`, ...) entsprechen ebenfalls dem
//! bestehenden Format.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use passierschein_core::{Rolle, UserId};

use crate::error::{AuthError, AuthResult};

/// Standard-Lebensdauer des Zugangs-Tokens: 24 Stunden
pub const ACCESS_TTL_STUNDEN: i64 = 24;

/// Standard-Lebensdauer des Refresh-Tokens: 7 Tage
pub const REFRESH_TTL_STUNDEN: i64 = 168;

/// Fehler bei der Token-Validierung
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenFehler {
    #[error("the token is invalid")]
    UngueltigeSignatur,

    #[error("the token is malformed")]
    Fehlerhaft,

    #[error("token is expired")]
    Abgelaufen,
}

/// Nutzlast eines signierten Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "FirstName", default)]
    pub first_name: String,
    #[serde(rename = "LastName", default)]
    pub last_name: String,
    #[serde(rename = "UserID", default)]
    pub user_id: String,
    #[serde(rename = "UserType", default)]
    pub user_type: String,
    /// Ablaufzeitpunkt in Sekunden seit Epoch
    pub exp: i64,
}

impl Claims {
    /// Claims ohne Identitaetsbindung (Refresh-Token)
    pub fn nur_ablauf() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            user_id: String::new(),
            user_type: String::new(),
            exp: 0,
        }
    }

    /// Rolle aus den Claims; `None` fuer leere oder unbekannte Werte
    pub fn rolle(&self) -> Option<Rolle> {
        self.user_type.parse().ok()
    }
}

/// Die Felder einer Identitaet, die in ein Zugangs-Token eingehen
#[derive(Debug, Clone, Copy)]
pub struct TokenInhaber<'a> {
    pub user_id: &'a UserId,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub user_type: Rolle,
}

impl TokenInhaber<'_> {
    fn claims(&self) -> Claims {
        Claims {
            email: self.email.to_string(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            user_id: self.user_id.to_string(),
            user_type: self.user_type.als_str().to_string(),
            exp: 0,
        }
    }
}

/// Ein frisch ausgestelltes Token-Paar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPaar {
    pub token: String,
    pub refresh_token: String,
}

/// Signiert und prueft Tokens mit einem symmetrischen Schluessel
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("schluessel", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Codec mit Standard-Lebensdauern (24 h / 168 h)
    pub fn neu(geheimnis: &[u8]) -> Self {
        Self::mit_lebensdauer(
            geheimnis,
            Duration::hours(ACCESS_TTL_STUNDEN),
            Duration::hours(REFRESH_TTL_STUNDEN),
        )
    }

    pub fn mit_lebensdauer(geheimnis: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Ablauf wird in `validieren` selbst geprueft (ohne Leeway)
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(geheimnis),
            decoding: DecodingKey::from_secret(geheimnis),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Signiert `claims` mit `exp = jetzt + ttl`
    ///
    /// `ttl` darf null oder negativ sein; solche Tokens sind sofort abgelaufen.
    pub fn ausstellen(&self, claims: &Claims, ttl: Duration) -> AuthResult<String> {
        let ablauf = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            AuthError::TokenSignierung(format!("Ablaufzeitpunkt ausserhalb des Wertebereichs (ttl={ttl})"))
        })?;
        let claims = Claims {
            exp: ablauf.timestamp(),
            ..claims.clone()
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSignierung(e.to_string()))
    }

    /// Stellt Zugangs- und Refresh-Token fuer eine Identitaet aus
    pub fn paar_ausstellen(&self, inhaber: &TokenInhaber<'_>) -> AuthResult<TokenPaar> {
        let token = self.ausstellen(&inhaber.claims(), self.access_ttl)?;
        let refresh_token = self.ausstellen(&Claims::nur_ablauf(), self.refresh_ttl)?;
        Ok(TokenPaar {
            token,
            refresh_token,
        })
    }

    /// Prueft Signatur, Struktur und Ablauf und liefert die Claims
    ///
    /// Ein Token gilt ab seiner `exp`-Sekunde als abgelaufen.
    pub fn validieren(&self, token: &str) -> Result<Claims, TokenFehler> {
        let daten = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenFehler::UngueltigeSignatur,
                ErrorKind::ExpiredSignature => TokenFehler::Abgelaufen,
                _ => TokenFehler::Fehlerhaft,
            }
        })?;

        if daten.claims.exp <= Utc::now().timestamp() {
            return Err(TokenFehler::Abgelaufen);
        }

        Ok(daten.claims)
    }
}
