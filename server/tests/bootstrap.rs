//! Startpfad: vollstaendiger Router aus Konfiguration und In-Memory-Datenbank

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use passierschein_db::SqliteDb;
use passierschein_observability::HealthState;
use passierschein_server::{config::ServerConfig, Server};

fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "bootstrap-test".into();
    config.auth.argon2_speicher_kib = 1024;
    config.auth.argon2_iterationen = 1;
    config
}

async fn json_body(antwort: axum::response::Response) -> Value {
    let bytes = to_bytes(antwort.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_und_signup_ueber_gemeinsamen_router() {
    let server = Server::neu(test_config());
    let db = Arc::new(SqliteDb::in_memory().await.unwrap());
    let app = server.app_erstellen(db, HealthState::neu()).unwrap();

    let antwort = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    assert_eq!(json_body(antwort).await["status"], "healthy");

    let signup = json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": "grace@example.com",
        "password": "cobol-1959",
        "phone": "555",
        "user_type": "ADMIN",
    });
    let antwort = app
        .oneshot(
            Request::post("/users/signup")
                .header("content-type", "application/json")
                .body(Body::from(signup.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);
    assert!(json_body(antwort).await["token"].is_string());
}

#[tokio::test]
async fn ungueltige_argon2_parameter_abgelehnt() {
    let mut config = test_config();
    config.auth.argon2_speicher_kib = 1;
    let db = Arc::new(SqliteDb::in_memory().await.unwrap());
    assert!(Server::neu(config).app_erstellen(db, HealthState::neu()).is_err());
}

#[tokio::test]
async fn start_ohne_secret_schlaegt_fehl() {
    let server = Server::neu(ServerConfig::default());
    assert!(server.starten().await.is_err());
}

#[tokio::test]
async fn ungueltige_lebensdauer_verhindert_router() {
    let mut config = test_config();
    config.auth.access_ttl_stunden = 0;
    let db = Arc::new(SqliteDb::in_memory().await.unwrap());
    assert!(Server::neu(config).app_erstellen(db, HealthState::neu()).is_err());
}
