//! passierschein-db – Identitaets- und Sitzungsspeicher
//!
//! Stellt das Repository-Pattern bereit: [`UserRepository`] fuer Identitaeten
//! und [`SessionRepository`] fuer das jeweils aktuelle Token-Paar. Die
//! SQLite-Implementierung liegt in [`sqlite`].

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use models::{BenutzerRecord, NeuerBenutzer, Seite};
pub use repository::{DatabaseConfig, DbResult, SessionRepository, UserRepository};
pub use sqlite::SqliteDb;
