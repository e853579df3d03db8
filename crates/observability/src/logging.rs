//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable (Vorrang vor der Konfigurationsdatei):
//! - `PS_LOG_LEVEL`: Log-Level bzw. Filter-Direktive, Standard: info
//! - `PS_LOG_FORMAT`: Format (text/json), Standard: text

use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "PS_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PS_LOG_FORMAT";

/// Ausgabeformat der Logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unbekannte Werte fallen auf `Text` zurueck
    pub fn parsen(wert: &str) -> Self {
        match wert.trim() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Initialisiert das Logging-System.
///
/// `level` und `format` stammen aus der Konfiguration; gesetzte
/// Umgebungsvariablen ueberschreiben sie.
pub fn logging_initialisieren(level: &str, format: &str) {
    let filter = EnvFilter::try_from_env(ENV_LOG_LEVEL)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| format.to_string());

    match LogFormat::parsen(&format) {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        LogFormat::Text => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_werte() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(log_level_gueltig(level));
        }
        assert!(!log_level_gueltig("verbose"));
        assert!(!log_level_gueltig("INFO"));
        assert!(!log_level_gueltig(""));
    }

    #[test]
    fn log_format_parsen() {
        assert_eq!(LogFormat::parsen("json"), LogFormat::Json);
        assert_eq!(LogFormat::parsen(" json "), LogFormat::Json);
        assert_eq!(LogFormat::parsen("text"), LogFormat::Text);
        assert_eq!(LogFormat::parsen("xml"), LogFormat::Text);
        assert_eq!(LogFormat::parsen("JSON"), LogFormat::Text);
    }
}
