//! SQLite-Implementierung des UserRepository

use chrono::Utc;
use sqlx::Row as _;

use passierschein_core::{Rolle, UserId};

use crate::error::{ist_unique_verletzung, DbError};
use crate::models::{BenutzerRecord, NeuerBenutzer, Seite};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;

const BENUTZER_SPALTEN: &str = "u.id, u.first_name, u.last_name, u.email, u.phone, u.password_hash,
     u.user_type, u.created_at, u.updated_at, s.token, s.refresh_token
     FROM users u LEFT JOIN sessions s ON s.user_id = u.id";

impl UserRepository for SqliteDb {
    async fn count_by_email_or_phone(&self, email: &str, phone: &str) -> DbResult<u64> {
        let anzahl: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? OR phone = ?")
                .bind(email)
                .bind(phone)
                .fetch_one(&self.pool)
                .await?;
        Ok(anzahl.max(0) as u64)
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {BENUTZER_SPALTEN} WHERE u.email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_id(&self, id: &UserId) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {BENUTZER_SPALTEN} WHERE u.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.als_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let zeit = data.erstellt_am.to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, phone, password_hash,
                                user_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.user_id.als_str())
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.password_hash)
        .bind(data.user_type.als_str())
        .bind(&zeit)
        .bind(&zeit)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit(format!(
                    "E-Mail '{}' oder Telefonnummer bereits vergeben",
                    data.email
                ))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        sqlx::query(
            "INSERT INTO sessions (user_id, token, refresh_token, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(data.user_id.als_str())
        .bind(data.token)
        .bind(data.refresh_token)
        .bind(&zeit)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BenutzerRecord {
            user_id: data.user_id.clone(),
            first_name: data.first_name.to_string(),
            last_name: data.last_name.to_string(),
            email: data.email.to_string(),
            phone: data.phone.to_string(),
            password_hash: data.password_hash.to_string(),
            user_type: data.user_type,
            token: Some(data.token.to_string()),
            refresh_token: Some(data.refresh_token.to_string()),
            created_at: data.erstellt_am,
            updated_at: data.erstellt_am,
        })
    }

    async fn list_page(&self, offset: u64, limit: u64) -> DbResult<Seite<BenutzerRecord>> {
        let gesamt: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!("SELECT {BENUTZER_SPALTEN} ORDER BY u.created_at, u.id LIMIT ? OFFSET ?");
        let rows = sqlx::query(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(Seite {
            total_count: gesamt.max(0) as u64,
            user_items: rows.iter().map(row_to_benutzer).collect::<DbResult<_>>()?,
        })
    }
}

fn zeit_parsen(wert: &str, feld: &str) -> DbResult<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(wert)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltige {feld} '{wert}': {e}")))
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    let user_type: String = row.try_get("user_type")?;
    let user_type = user_type
        .parse::<Rolle>()
        .map_err(|e| DbError::UngueltigeDaten(e.to_string()))?;

    let id: String = row.try_get("id")?;

    Ok(BenutzerRecord {
        user_id: UserId(id),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        password_hash: row.try_get("password_hash")?,
        user_type,
        token: row.try_get("token")?,
        refresh_token: row.try_get("refresh_token")?,
        created_at: zeit_parsen(&created_at, "created_at")?,
        updated_at: zeit_parsen(&updated_at, "updated_at")?,
    })
}
