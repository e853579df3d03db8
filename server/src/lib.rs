//! passierschein-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Datenbank, AuthService und REST-Router und
//! stellt den oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;

use passierschein_api::{AppState, RestServer, RestServerKonfig};
use passierschein_auth::{Argon2Hasher, AuthService};
use passierschein_db::SqliteDb;
use passierschein_observability::{db_pruefung_starten, health_router, HealthState};

use config::ServerConfig;

/// Abstand der periodischen Datenbank-Pruefung fuer `/health`
const DB_PRUEFUNG_INTERVALL: Duration = Duration::from_secs(30);

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut den vollstaendigen Router (Benutzer-Routen und `/health`)
    pub fn app_erstellen(&self, db: Arc<SqliteDb>, health: HealthState) -> Result<Router> {
        let hasher = Argon2Hasher::mit_parametern(
            self.config.auth.argon2_speicher_kib,
            self.config.auth.argon2_iterationen,
        )
        .context("Ungueltige Argon2-Parameter")?;

        let auth = AuthService::neu(self.config.auth_konfig()?, db, Arc::new(hasher));

        Ok(passierschein_api::router(AppState::neu(Arc::new(auth))).merge(health_router(health)))
    }

    /// Startet alle Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Konfiguration pruefen
    /// 2. Datenbank oeffnen und migrieren
    /// 3. Health-Pruefung starten
    /// 4. REST-API starten
    /// 5. Auf Ctrl-C warten und geordnet beenden
    pub async fn starten(self) -> Result<()> {
        self.config.pruefen()?;
        let bind_addr = self.config.http_bind_adresse()?;

        tracing::info!(url = %self.config.datenbank.url, "Datenbankverbindung wird hergestellt");
        let db = Arc::new(
            SqliteDb::oeffnen(&self.config.datenbank_config())
                .await
                .context("Datenbank konnte nicht geoeffnet werden")?,
        );

        let health = HealthState::neu();
        let ping_db = Arc::clone(&db);
        let pruefung = db_pruefung_starten(health.clone(), DB_PRUEFUNG_INTERVALL, move || {
            let db = Arc::clone(&ping_db);
            async move { db.ping().await }
        });

        let app = self.app_erstellen(db, health)?;

        let rest = RestServer::neu(RestServerKonfig {
            bind_addr,
            cors_origins: self.config.http.cors_origins.clone(),
        });

        let ergebnis = rest.starten(app, shutdown_signal()).await;
        pruefung.abort();
        ergebnis
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
        Err(e) => tracing::error!(fehler = %e, "Shutdown-Signal konnte nicht registriert werden"),
    }
}
