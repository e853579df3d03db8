//! SQLite-Implementierung des SessionRepository

use chrono::{DateTime, Utc};

use passierschein_core::UserId;

use crate::error::DbError;
use crate::repository::{DbResult, SessionRepository};
use crate::sqlite::pool::SqliteDb;

impl SessionRepository for SqliteDb {
    async fn upsert_token_paar(
        &self,
        id: &UserId,
        token: &str,
        refresh_token: &str,
        aktualisiert_am: DateTime<Utc>,
    ) -> DbResult<()> {
        let zeit = aktualisiert_am.to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let betroffen = sqlx::query("UPDATE users SET updated_at = ? WHERE id = ?")
            .bind(&zeit)
            .bind(id.als_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if betroffen == 0 {
            // tx wird beim Drop zurueckgerollt
            return Err(DbError::nicht_gefunden(format!("User {id}")));
        }

        sqlx::query(
            "INSERT INTO sessions (user_id, token, refresh_token, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id) DO UPDATE SET
                 token = excluded.token,
                 refresh_token = excluded.refresh_token,
                 updated_at = excluded.updated_at",
        )
        .bind(id.als_str())
        .bind(token)
        .bind(refresh_token)
        .bind(&zeit)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(user_id = %id, "Token-Paar gespeichert");
        Ok(())
    }
}
