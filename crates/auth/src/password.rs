//! Passwort-Hashing mit Argon2id
//!
//! Der Auth-Service kennt nur den [`PasswortHasher`]-Trait; die Standard-
//! implementierung ist [`Argon2Hasher`] mit PHC-Strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Einweg-Hash und Verifikation eines Klartext-Geheimnisses
pub trait PasswortHasher: Send + Sync {
    fn hashen(&self, passwort: &str) -> Result<String, AuthError>;

    /// `Ok(false)` bei falschem Passwort, `Err` nur bei kaputtem Hash
    fn verifizieren(&self, passwort: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id-Hasher
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Werte gemaess OWASP-Empfehlungen: 64 MiB, 3 Iterationen, 1 Thread
    pub fn neu() -> Self {
        Self {
            params: Params::new(64 * 1024, 3, 1, None).unwrap_or_default(),
        }
    }

    /// Eigene Kostenparameter (Speicher in KiB)
    pub fn mit_parametern(speicher_kib: u32, iterationen: u32) -> Result<Self, AuthError> {
        let params = Params::new(speicher_kib, iterationen, 1, None)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltige Argon2-Parameter: {e}")))?;
        Ok(Self { params })
    }

    fn instanz(&self) -> Argon2<'static> {
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::neu()
    }
}

impl PasswortHasher for Argon2Hasher {
    fn hashen(&self, passwort: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.instanz()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    fn verifizieren(&self, passwort: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

        // Parameter stammen aus dem PHC-String, nicht aus self.params
        match self.instanz().verify_password(passwort.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::mit_parametern(1024, 1).expect("Parameter gueltig")
    }

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let hasher = hasher();
        let passwort = "sicheres_passwort_123!";
        let hash = hasher.hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(
            hash.starts_with("$argon2id$"),
            "Hash muss mit $argon2id$ beginnen"
        );

        let korrekt = hasher
            .verifizieren(passwort, &hash)
            .expect("Verifikation fehlgeschlagen");
        assert!(korrekt, "Passwort muss korrekt verifiziert werden");
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hasher = hasher();
        let hash = hasher.hashen("richtiges_passwort").unwrap();

        let korrekt = hasher.verifizieren("falsches_passwort", &hash).unwrap();
        assert!(!korrekt, "Falsches Passwort muss abgelehnt werden");
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hashen("gleich").unwrap();
        let hash2 = hasher.hashen("gleich").unwrap();
        assert_ne!(hash1, hash2, "Salt muss unterschiedliche Hashes erzeugen");
    }

    #[test]
    fn hash_mit_anderen_parametern_bleibt_pruefbar() {
        let hash = hasher().hashen("pw").unwrap();
        let standard = Argon2Hasher::neu();
        assert!(standard.verifizieren("pw", &hash).unwrap());
    }

    #[test]
    fn ungueltiges_hash_format_gibt_fehler() {
        let ergebnis = hasher().verifizieren("passwort", "kein_gueltiger_hash");
        assert!(matches!(ergebnis, Err(AuthError::PasswortHashing(_))));
    }

    #[test]
    fn ungueltige_parameter_abgelehnt() {
        assert!(Argon2Hasher::mit_parametern(1, 0).is_err());
    }
}
