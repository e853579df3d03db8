//! Integration-Tests fuer UserRepository (In-Memory SQLite)

use chrono::{Duration, Utc};
use passierschein_core::{Rolle, UserId};
use passierschein_db::{NeuerBenutzer, SqliteDb, UserRepository};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn neuer<'a>(id: &'a UserId, email: &'a str, phone: &'a str) -> NeuerBenutzer<'a> {
    NeuerBenutzer {
        user_id: id,
        first_name: "Alice",
        last_name: "Example",
        email,
        phone,
        password_hash: "hash_alice",
        user_type: Rolle::User,
        token: "access",
        refresh_token: "refresh",
        erstellt_am: Utc::now(),
    }
}

#[tokio::test]
async fn benutzer_erstellen_und_laden() {
    let db = db().await;
    let id = UserId::neu();

    let user = UserRepository::create(&db, neuer(&id, "alice@example.com", "100"))
        .await
        .expect("Benutzer erstellen fehlgeschlagen");

    assert_eq!(user.user_id, id);
    assert_eq!(user.token.as_deref(), Some("access"));

    let geladen = UserRepository::get_by_id(&db, &id)
        .await
        .expect("get_by_id fehlgeschlagen")
        .expect("Benutzer sollte gefunden werden");

    assert_eq!(geladen.email, "alice@example.com");
    assert_eq!(geladen.user_type, Rolle::User);
    assert_eq!(geladen.password_hash, "hash_alice");
    assert_eq!(geladen.token.as_deref(), Some("access"));
    assert_eq!(geladen.refresh_token.as_deref(), Some("refresh"));
}

#[tokio::test]
async fn benutzer_nach_email_laden() {
    let db = db().await;
    let id = UserId::neu();
    UserRepository::create(&db, neuer(&id, "bob@example.com", "200"))
        .await
        .unwrap();

    let gefunden = UserRepository::get_by_email(&db, "bob@example.com")
        .await
        .unwrap()
        .expect("Benutzer 'bob' sollte gefunden werden");
    assert_eq!(gefunden.user_id, id);

    let nicht_gefunden = UserRepository::get_by_email(&db, "unbekannt@example.com")
        .await
        .unwrap();
    assert!(nicht_gefunden.is_none());
}

#[tokio::test]
async fn email_oder_telefon_zaehlen() {
    let db = db().await;
    let id = UserId::neu();
    UserRepository::create(&db, neuer(&id, "carol@example.com", "300"))
        .await
        .unwrap();

    for (email, phone, erwartet) in [
        ("carol@example.com", "999", 1),
        ("andere@example.com", "300", 1),
        ("carol@example.com", "300", 1),
        ("andere@example.com", "999", 0),
    ] {
        let anzahl = UserRepository::count_by_email_or_phone(&db, email, phone)
            .await
            .unwrap();
        assert_eq!(anzahl, erwartet, "email={email} phone={phone}");
    }
}

#[tokio::test]
async fn email_und_telefon_sind_eindeutig() {
    let db = db().await;
    let erste = UserId::neu();
    UserRepository::create(&db, neuer(&erste, "dave@example.com", "400"))
        .await
        .unwrap();

    let zweite = UserId::neu();
    let err = UserRepository::create(&db, neuer(&zweite, "dave@example.com", "401"))
        .await
        .unwrap_err();
    assert!(err.ist_eindeutigkeit());

    let dritte = UserId::neu();
    let err = UserRepository::create(&db, neuer(&dritte, "dave2@example.com", "400"))
        .await
        .unwrap_err();
    assert!(err.ist_eindeutigkeit());

    // Kein halber Datensatz nach dem fehlgeschlagenen Insert
    assert!(UserRepository::get_by_id(&db, &zweite).await.unwrap().is_none());
    let seite = UserRepository::list_page(&db, 0, 10).await.unwrap();
    assert_eq!(seite.total_count, 1);
}

#[tokio::test]
async fn seitenweise_auflisten() {
    let db = db().await;
    let start = Utc::now();

    let mut ids = Vec::new();
    for i in 0..5 {
        let id = UserId::neu();
        let email = format!("user{i}@example.com");
        let phone = format!("50{i}");
        UserRepository::create(
            &db,
            NeuerBenutzer {
                erstellt_am: start + Duration::seconds(i),
                ..neuer(&id, &email, &phone)
            },
        )
        .await
        .unwrap();
        ids.push(id);
    }

    let seite = UserRepository::list_page(&db, 1, 2).await.unwrap();
    assert_eq!(seite.total_count, 5);
    let geladen: Vec<_> = seite.user_items.iter().map(|u| u.user_id.clone()).collect();
    assert_eq!(geladen, vec![ids[1].clone(), ids[2].clone()]);

    let hinter_ende = UserRepository::list_page(&db, 10, 2).await.unwrap();
    assert_eq!(hinter_ende.total_count, 5);
    assert!(hinter_ende.user_items.is_empty());
}

#[tokio::test]
async fn leere_datenbank_auflisten() {
    let db = db().await;
    let seite = UserRepository::list_page(&db, 0, 10).await.unwrap();
    assert_eq!(seite.total_count, 0);
    assert!(seite.user_items.is_empty());
}
