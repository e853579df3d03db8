//! Datenbankmodelle fuer Passierschein
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den API-Antworttypen getrennt: der Passwort-Hash verlaesst
//! das Crate nur ueber [`BenutzerRecord::password_hash`] und wird nie
//! serialisiert.

use chrono::{DateTime, Utc};
use serde::Serialize;

use passierschein_core::{Rolle, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz inklusive aktuellem Token-Paar
#[derive(Debug, Clone, Serialize)]
pub struct BenutzerRecord {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_type: Rolle,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers samt erstem Token-Paar
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub user_id: &'a UserId,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub user_type: Rolle,
    pub token: &'a str,
    pub refresh_token: &'a str,
    pub erstellt_am: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Seitenweise Auflistung
// ---------------------------------------------------------------------------

/// Eine Seite aus einer Auflistung samt Gesamtanzahl
#[derive(Debug, Clone, Serialize)]
pub struct Seite<T> {
    pub total_count: u64,
    pub user_items: Vec<T>,
}
