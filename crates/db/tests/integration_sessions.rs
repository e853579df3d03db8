//! Integration-Tests fuer SessionRepository (In-Memory SQLite)

use chrono::{Duration, Utc};
use passierschein_core::{Rolle, UserId};
use passierschein_db::{DbError, NeuerBenutzer, SessionRepository, SqliteDb, UserRepository};

async fn db_mit_benutzer() -> (SqliteDb, UserId) {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");
    let id = UserId::neu();
    UserRepository::create(
        &db,
        NeuerBenutzer {
            user_id: &id,
            first_name: "Erin",
            last_name: "Example",
            email: "erin@example.com",
            phone: "600",
            password_hash: "hash",
            user_type: Rolle::Admin,
            token: "alt_access",
            refresh_token: "alt_refresh",
            erstellt_am: Utc::now() - Duration::minutes(5),
        },
    )
    .await
    .unwrap();
    (db, id)
}

#[tokio::test]
async fn token_paar_wird_ersetzt() {
    let (db, id) = db_mit_benutzer().await;
    let jetzt = Utc::now();

    SessionRepository::upsert_token_paar(&db, &id, "neu_access", "neu_refresh", jetzt)
        .await
        .expect("Upsert fehlgeschlagen");

    let geladen = UserRepository::get_by_id(&db, &id).await.unwrap().unwrap();
    assert_eq!(geladen.token.as_deref(), Some("neu_access"));
    assert_eq!(geladen.refresh_token.as_deref(), Some("neu_refresh"));
    assert!(geladen.updated_at > geladen.created_at);
}

#[tokio::test]
async fn fehlendes_token_paar_wird_angelegt() {
    let (db, id) = db_mit_benutzer().await;

    // Sitzungszeile entfernen, Identitaet bleibt bestehen
    sqlx::query("DELETE FROM sessions")
        .execute(db.pool())
        .await
        .unwrap();
    let ohne = UserRepository::get_by_id(&db, &id).await.unwrap().unwrap();
    assert!(ohne.token.is_none());

    SessionRepository::upsert_token_paar(&db, &id, "a", "r", Utc::now())
        .await
        .unwrap();
    let mit = UserRepository::get_by_id(&db, &id).await.unwrap().unwrap();
    assert_eq!(mit.token.as_deref(), Some("a"));
}

#[tokio::test]
async fn unbekannte_identitaet_gibt_nicht_gefunden() {
    let (db, _) = db_mit_benutzer().await;
    let unbekannt = UserId::from("gibt-es-nicht");
    let err = SessionRepository::upsert_token_paar(&db, &unbekannt, "a", "r", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NichtGefunden(_)));
}
