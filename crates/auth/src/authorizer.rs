//! Rollenbasierte Zugriffspruefung
//!
//! `ADMIN` darf jeden Datensatz lesen und alle auflisten, `USER` nur den
//! eigenen. Rollen werden als Strings aus den Token-Claims uebergeben; alles
//! ausser den beiden bekannten Werten erhaelt keinen Zugriff.

use passierschein_core::Rolle;

/// Darf ein Aufrufer mit `rolle` und `aufrufer_id` den Datensatz `ziel_id` lesen?
pub fn kann_zugreifen(rolle: &str, aufrufer_id: &str, ziel_id: &str) -> bool {
    match rolle.parse::<Rolle>() {
        Ok(Rolle::Admin) => true,
        Ok(Rolle::User) => aufrufer_id == ziel_id,
        Err(_) => false,
    }
}

/// Darf ein Aufrufer mit `rolle` alle Identitaeten auflisten?
pub fn kann_alle_auflisten(rolle: &str) -> bool {
    matches!(rolle.parse::<Rolle>(), Ok(Rolle::Admin))
}
