//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass der Server ohne Konfigurationsdatei lauffaehig ist.
//! Der Signierschluessel hat keinen Standardwert und muss per Datei oder
//! `JWT_SECRET_KEY` gesetzt werden.

use std::net::SocketAddr;
use std::time::Duration as StdDuration;

use anyhow::{bail, Context};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use passierschein_auth::AuthKonfig;
use passierschein_db::DatabaseConfig;

pub const ENV_JWT_SECRET: &str = "JWT_SECRET_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Obergrenze fuer Token-Lebensdauern: 10 Jahre
pub const MAX_TTL_STUNDEN: i64 = 24 * 365 * 10;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP-Einstellungen
    pub http: HttpEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token- und Passwort-Einstellungen
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for HttpEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8000,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_verbindungen: db.max_verbindungen,
            sqlite_wal: db.sqlite_wal,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// HS256-Signierschluessel
    pub jwt_secret: String,
    pub access_ttl_stunden: i64,
    pub refresh_ttl_stunden: i64,
    /// Obergrenze fuer einen einzelnen Datenbankzugriff
    pub store_timeout_sekunden: u64,
    pub argon2_speicher_kib: u32,
    pub argon2_iterationen: u32,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_ttl_stunden: 24,
            refresh_ttl_stunden: 168,
            store_timeout_sekunden: 100,
            argon2_speicher_kib: 65536,
            argon2_iterationen: 3,
        }
    }
}

impl std::fmt::Debug for AuthEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEinstellungen")
            .field("jwt_secret", &"<redacted>")
            .field("access_ttl_stunden", &self.access_ttl_stunden)
            .field("refresh_ttl_stunden", &self.refresh_ttl_stunden)
            .field("store_timeout_sekunden", &self.store_timeout_sekunden)
            .field("argon2_speicher_kib", &self.argon2_speicher_kib)
            .field("argon2_iterationen", &self.argon2_iterationen)
            .finish()
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei und wendet die
    /// Umgebungsvariablen an.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Konfigurationsdatei '{pfad}' nicht lesbar"))
            }
        };

        config.umgebung_anwenden(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Ueberschreibt Werte aus der Umgebung; `lookup` liefert den Wert einer Variable
    pub fn umgebung_anwenden(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = lookup(ENV_JWT_SECRET) {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.datenbank.url = url;
        }
    }

    /// Prueft Werte, ohne die der Server nicht starten darf
    pub fn pruefen(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("Kein Signierschluessel konfiguriert ([auth] jwt_secret oder {ENV_JWT_SECRET})");
        }
        self.auth_konfig()?;
        if self.auth.store_timeout_sekunden == 0 {
            bail!("[auth] store_timeout_sekunden muss groesser als 0 sein");
        }
        self.http_bind_adresse()?;
        Ok(())
    }

    /// Gibt die Bind-Adresse fuer den REST-Server zurueck
    pub fn http_bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let adresse = format!("{}:{}", self.http.bind_adresse, self.http.port);
        adresse
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{adresse}'"))
    }

    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.sqlite_wal,
        }
    }

    /// Baut die Auth-Konfiguration; Lebensdauern ausserhalb von
    /// `1..=MAX_TTL_STUNDEN` werden abgelehnt
    pub fn auth_konfig(&self) -> anyhow::Result<AuthKonfig> {
        Ok(AuthKonfig {
            access_ttl: ttl_stunden("access_ttl_stunden", self.auth.access_ttl_stunden)?,
            refresh_ttl: ttl_stunden("refresh_ttl_stunden", self.auth.refresh_ttl_stunden)?,
            store_timeout: StdDuration::from_secs(self.auth.store_timeout_sekunden),
            ..AuthKonfig::neu(self.auth.jwt_secret.clone())
        })
    }
}

fn ttl_stunden(feld: &str, stunden: i64) -> anyhow::Result<Duration> {
    if !(1..=MAX_TTL_STUNDEN).contains(&stunden) {
        bail!("[auth] {feld} muss zwischen 1 und {MAX_TTL_STUNDEN} liegen (ist {stunden})");
    }
    Ok(Duration::hours(stunden))
}
