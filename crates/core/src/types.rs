//! Gemeinsame Identifikationstypen fuer Passierschein
//!
//! Benutzer-IDs sind Strings (UUID v4 bei Erstellung), damit auch Pfad-
//! parameter, die keine gueltige UUID sind, bis zur Autorisierung gelangen
//! und dort regulaer abgelehnt werden.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Eindeutige, unveraenderliche Benutzer-ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Erstellt eine neue zufaellige UserId
    pub fn neu() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn als_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Benutzerrolle (geschlossene Menge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rolle {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Rolle {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Rolle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.als_str())
    }
}

/// Fehler beim Parsen einer Rolle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unbekannte Rolle: '{0}'")]
pub struct UnbekannteRolle(pub String);

impl std::str::FromStr for Rolle {
    type Err = UnbekannteRolle;

    // Exakter Vergleich: "admin" ist keine gueltige Rolle
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnbekannteRolle(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_eindeutig() {
        let a = UserId::neu();
        let b = UserId::neu();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.als_str()).is_ok());
    }

    #[test]
    fn user_id_serialisiert_als_string() {
        let id = UserId::from("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
    }

    #[test]
    fn rolle_parsen() {
        assert_eq!("USER".parse::<Rolle>(), Ok(Rolle::User));
        assert_eq!("ADMIN".parse::<Rolle>(), Ok(Rolle::Admin));
        assert!("admin".parse::<Rolle>().is_err());
        assert!("".parse::<Rolle>().is_err());
        assert!("ROOT".parse::<Rolle>().is_err());
    }

    #[test]
    fn unbekannte_rolle_meldung() {
        let fehler = "GUEST".parse::<Rolle>().unwrap_err();
        assert_eq!(fehler, UnbekannteRolle("GUEST".into()));
        assert_eq!(fehler.to_string(), "Unbekannte Rolle: 'GUEST'");

        let als_error: &dyn std::error::Error = &fehler;
        assert!(als_error.source().is_none());
    }

    #[test]
    fn rolle_serde_kompatibel() {
        assert_eq!(serde_json::to_string(&Rolle::Admin).unwrap(), "\"ADMIN\"");
        let rolle: Rolle = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(rolle, Rolle::User);
        assert!(serde_json::from_str::<Rolle>("\"GUEST\"").is_err());
    }
}
