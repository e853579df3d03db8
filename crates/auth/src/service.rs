//! Auth-Service fuer Passierschein
//!
//! Zentraler Service fuer Registrierung, Login und die Pruefung
//! authentifizierter Anfragen. Zwischen Anfragen haelt er keinen Zustand
//! ausser dem Signierschluessel; das aktuelle Token-Paar liegt im
//! [`SessionRepository`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use passierschein_core::{Rolle, UserId};
use passierschein_db::{
    BenutzerRecord, DbResult, NeuerBenutzer, Seite, SessionRepository, UserRepository,
};

use crate::{
    authorizer::{kann_alle_auflisten, kann_zugreifen},
    error::{AuthError, AuthResult},
    password::PasswortHasher,
    token::{Claims, TokenCodec, TokenInhaber, ACCESS_TTL_STUNDEN, REFRESH_TTL_STUNDEN},
};

/// Konfiguration des Auth-Service
#[derive(Clone)]
pub struct AuthKonfig {
    /// Symmetrischer Signierschluessel
    pub jwt_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    /// Obergrenze fuer jeden einzelnen Datenbankzugriff
    pub store_timeout: StdDuration,
}

impl AuthKonfig {
    pub fn neu(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl: Duration::hours(ACCESS_TTL_STUNDEN),
            refresh_ttl: Duration::hours(REFRESH_TTL_STUNDEN),
            store_timeout: StdDuration::from_secs(100),
        }
    }
}

impl std::fmt::Debug for AuthKonfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthKonfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

/// Bereits strukturell validierte Registrierungsdaten
#[derive(Debug, Clone)]
pub struct NeueRegistrierung {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_type: Rolle,
}

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<R> {
    repo: Arc<R>,
    hasher: Arc<dyn PasswortHasher>,
    codec: TokenCodec,
    store_timeout: StdDuration,
}

impl<R> AuthService<R>
where
    R: UserRepository + SessionRepository,
{
    /// Erstellt einen neuen AuthService
    pub fn neu(konfig: AuthKonfig, repo: Arc<R>, hasher: Arc<dyn PasswortHasher>) -> Self {
        let codec = TokenCodec::mit_lebensdauer(
            konfig.jwt_secret.as_bytes(),
            konfig.access_ttl,
            konfig.refresh_ttl,
        );
        Self {
            repo,
            hasher,
            codec,
            store_timeout: konfig.store_timeout,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Registriert einen neuen Benutzer und stellt das erste Token-Paar aus
    ///
    /// Die Vorab-Zaehlung liefert die freundliche Fehlermeldung; gegen
    /// parallele Registrierungen schuetzen die UNIQUE-Constraints der Tabelle.
    pub async fn registrieren(&self, eingabe: NeueRegistrierung) -> AuthResult<BenutzerRecord> {
        let vorhanden = self
            .speicher(
                self.repo
                    .count_by_email_or_phone(&eingabe.email, &eingabe.phone),
            )
            .await?;
        if vorhanden > 0 {
            tracing::info!("Registrierung abgelehnt: E-Mail oder Telefonnummer vergeben");
            return Err(AuthError::BereitsVorhanden);
        }

        let passwort_hash = self.hash_erzeugen(eingabe.password).await?;

        let user_id = UserId::neu();
        let jetzt = Utc::now();
        let paar = self.codec.paar_ausstellen(&TokenInhaber {
            user_id: &user_id,
            email: &eingabe.email,
            first_name: &eingabe.first_name,
            last_name: &eingabe.last_name,
            user_type: eingabe.user_type,
        })?;

        let benutzer = self
            .speicher(self.repo.create(NeuerBenutzer {
                user_id: &user_id,
                first_name: &eingabe.first_name,
                last_name: &eingabe.last_name,
                email: &eingabe.email,
                phone: &eingabe.phone,
                password_hash: &passwort_hash,
                user_type: eingabe.user_type,
                token: &paar.token,
                refresh_token: &paar.refresh_token,
                erstellt_am: jetzt,
            }))
            .await
            .map_err(|e| match e {
                AuthError::Datenbank(db) if db.ist_eindeutigkeit() => AuthError::BereitsVorhanden,
                andere => andere,
            })?;

        tracing::info!(
            user_id = %benutzer.user_id,
            user_type = %benutzer.user_type,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und ersetzt sein Token-Paar
    ///
    /// Gibt den neu geladenen Datensatz mit dem frischen Paar zurueck.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<BenutzerRecord> {
        let benutzer = self
            .speicher(self.repo.get_by_email(email))
            .await?
            .ok_or(AuthError::BenutzerNichtGefunden)?;

        let korrekt = self
            .hash_pruefen(passwort.to_string(), benutzer.password_hash.clone())
            .await?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.user_id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let paar = self.codec.paar_ausstellen(&TokenInhaber {
            user_id: &benutzer.user_id,
            email: &benutzer.email,
            first_name: &benutzer.first_name,
            last_name: &benutzer.last_name,
            user_type: benutzer.user_type,
        })?;

        self.speicher(self.repo.upsert_token_paar(
            &benutzer.user_id,
            &paar.token,
            &paar.refresh_token,
            Utc::now(),
        ))
        .await?;

        let aktualisiert = self
            .speicher(self.repo.get_by_id(&benutzer.user_id))
            .await?
            .ok_or(AuthError::BenutzerNichtGefunden)?;

        tracing::info!(user_id = %aktualisiert.user_id, "Benutzer angemeldet");

        Ok(aktualisiert)
    }

    /// Prueft den Token-Header einer geschuetzten Anfrage
    pub fn anfrage_authentifizieren(&self, token_header: Option<&str>) -> AuthResult<Claims> {
        let token = token_header
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenFehlt)?;

        self.codec.validieren(token).map_err(|fehler| {
            tracing::debug!(%fehler, "Token abgelehnt");
            AuthError::TokenUngueltig(fehler)
        })
    }

    /// Laedt einen Datensatz, sofern die Claims des Aufrufers es erlauben
    pub async fn benutzer_lesen(&self, claims: &Claims, ziel: &UserId) -> AuthResult<BenutzerRecord> {
        if !kann_zugreifen(&claims.user_type, &claims.user_id, ziel.als_str()) {
            tracing::warn!(
                aufrufer = %claims.user_id,
                ziel = %ziel,
                "Zugriff auf fremden Datensatz verweigert"
            );
            return Err(AuthError::ZugriffVerweigert);
        }

        self.speicher(self.repo.get_by_id(ziel))
            .await?
            .ok_or(AuthError::BenutzerNichtGefunden)
    }

    /// Listet alle Identitaeten seitenweise auf (nur `ADMIN`)
    pub async fn benutzer_auflisten(
        &self,
        claims: &Claims,
        offset: u64,
        limit: u64,
    ) -> AuthResult<Seite<BenutzerRecord>> {
        if !kann_alle_auflisten(&claims.user_type) {
            tracing::warn!(aufrufer = %claims.user_id, "Auflistung ohne ADMIN-Rolle verweigert");
            return Err(AuthError::ZugriffVerweigert);
        }

        self.speicher(self.repo.list_page(offset, limit)).await
    }

    /// Begrenzt einen Datenbankzugriff auf `store_timeout`
    ///
    /// Beim Ablauf wird das Future verworfen; jeder Schreibzugriff ist eine
    /// einzelne Transaktion und wird dabei vollstaendig zurueckgerollt.
    async fn speicher<T>(&self, zugriff: impl Future<Output = DbResult<T>>) -> AuthResult<T> {
        match tokio::time::timeout(self.store_timeout, zugriff).await {
            Ok(ergebnis) => Ok(ergebnis?),
            Err(_) => {
                tracing::error!(timeout = ?self.store_timeout, "Datenbankzugriff abgebrochen");
                Err(AuthError::Zeitueberschreitung)
            }
        }
    }

    async fn hash_erzeugen(&self, passwort: String) -> AuthResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hashen(&passwort))
            .await
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))?
    }

    async fn hash_pruefen(&self, passwort: String, hash: String) -> AuthResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verifizieren(&passwort, &hash))
            .await
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))?
    }
}
