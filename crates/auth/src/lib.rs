//! passierschein-auth – Token-Lebenszyklus und Autorisierung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Signierte Zugangs-/Refresh-Tokens (HS256) samt Validierung
//! - Rollenbasierte Zugriffspruefung (USER / ADMIN)
//! - AuthService (Registrierung, Login, Pruefung geschuetzter Anfragen)

pub mod authorizer;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use authorizer::{kann_alle_auflisten, kann_zugreifen};
pub use error::{AuthError, AuthResult, FehlerArt};
pub use password::{Argon2Hasher, PasswortHasher};
pub use service::{AuthKonfig, AuthService, NeueRegistrierung};
pub use token::{Claims, TokenCodec, TokenFehler, TokenInhaber, TokenPaar};
