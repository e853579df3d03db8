//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Auth-Logik von der konkreten
//! Datenbank-Implementierung. Die Futures sind `Send`, damit die Traits
//! direkt hinter Axum-Handlern verwendet werden koennen.

use std::future::Future;

use chrono::{DateTime, Utc};

use passierschein_core::UserId;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer, Seite};

pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://passierschein.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://passierschein.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Identitaeten
pub trait UserRepository: Send + Sync {
    /// Anzahl der Identitaeten, deren E-Mail ODER Telefonnummer uebereinstimmt
    fn count_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> impl Future<Output = DbResult<u64>> + Send;

    fn get_by_email(&self, email: &str)
        -> impl Future<Output = DbResult<Option<BenutzerRecord>>> + Send;

    fn get_by_id(&self, id: &UserId)
        -> impl Future<Output = DbResult<Option<BenutzerRecord>>> + Send;

    /// Legt Identitaet und erstes Token-Paar atomar an
    ///
    /// Doppelte E-Mail oder Telefonnummer ergibt [`DbError::Eindeutigkeit`].
    fn create(&self, data: NeuerBenutzer<'_>)
        -> impl Future<Output = DbResult<BenutzerRecord>> + Send;

    /// Eine Seite aller Identitaeten (nach Erstellung sortiert) plus Gesamtanzahl
    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = DbResult<Seite<BenutzerRecord>>> + Send;
}

/// Repository fuer das aktuelle Token-Paar einer Identitaet
pub trait SessionRepository: Send + Sync {
    /// Ersetzt das Token-Paar (oder legt es an) und setzt `updated_at` der Identitaet
    ///
    /// Gibt [`DbError::NichtGefunden`] zurueck wenn die Identitaet nicht existiert.
    fn upsert_token_paar(
        &self,
        id: &UserId,
        token: &str,
        refresh_token: &str,
        aktualisiert_am: DateTime<Utc>,
    ) -> impl Future<Output = DbResult<()>> + Send;
}
