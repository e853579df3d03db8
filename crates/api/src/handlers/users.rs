//! REST-Handler fuer Benutzer-Endpunkte (geschuetzt)

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde::Deserialize;

use passierschein_auth::Claims;
use passierschein_core::UserId;
use passierschein_db::{BenutzerRecord, Seite, SessionRepository, UserRepository};

use crate::{error::ApiError, AppState};

const STANDARD_PRO_SEITE: i64 = 10;

/// Rohe Query-Parameter; ungueltige Werte fallen auf Standardwerte zurueck
#[derive(Debug, Default, Deserialize)]
pub struct ListenQuery {
    #[serde(rename = "recordsPerPage")]
    pub records_per_page: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

impl ListenQuery {
    /// Berechnet `(offset, limit)`
    ///
    /// `recordsPerPage` < 1 oder ungueltig ergibt 10, `page` < 1 oder ungueltig
    /// ergibt 1, ein fehlender `startIndex` ergibt `(page - 1) * recordsPerPage`.
    pub fn fenster(&self) -> (u64, u64) {
        let pro_seite = zahl(&self.records_per_page)
            .filter(|n| *n >= 1)
            .unwrap_or(STANDARD_PRO_SEITE);
        let seite = zahl(&self.page).filter(|n| *n >= 1).unwrap_or(1);
        let start = zahl(&self.start_index)
            .unwrap_or_else(|| (seite - 1).saturating_mul(pro_seite));

        (start.max(0) as u64, pro_seite as u64)
    }
}

fn zahl(wert: &Option<String>) -> Option<i64> {
    wert.as_deref().and_then(|s| s.trim().parse().ok())
}

/// `GET /users/:user_id`
pub async fn get_user<R>(
    State(state): State<AppState<R>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<Json<BenutzerRecord>, ApiError>
where
    R: UserRepository + SessionRepository + 'static,
{
    let benutzer = state
        .auth
        .benutzer_lesen(&claims, &UserId::from(user_id))
        .await?;
    Ok(Json(benutzer))
}

/// `GET /users`
pub async fn list_users<R>(
    State(state): State<AppState<R>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListenQuery>,
) -> Result<Json<Seite<BenutzerRecord>>, ApiError>
where
    R: UserRepository + SessionRepository + 'static,
{
    let (offset, limit) = query.fenster();
    let seite = state.auth.benutzer_auflisten(&claims, offset, limit).await?;
    Ok(Json(seite))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(rpp: Option<&str>, page: Option<&str>, start: Option<&str>) -> ListenQuery {
        ListenQuery {
            records_per_page: rpp.map(Into::into),
            page: page.map(Into::into),
            start_index: start.map(Into::into),
        }
    }

    #[test]
    fn standardwerte() {
        assert_eq!(ListenQuery::default().fenster(), (0, 10));
    }

    #[test]
    fn ungueltige_werte_fallen_zurueck() {
        assert_eq!(query(Some("abc"), Some("0"), None).fenster(), (0, 10));
        assert_eq!(query(Some("-5"), Some("-1"), None).fenster(), (0, 10));
    }

    #[test]
    fn seite_bestimmt_startindex() {
        assert_eq!(query(Some("5"), Some("3"), None).fenster(), (10, 5));
        assert_eq!(query(None, Some("2"), Some("x")).fenster(), (10, 10));
    }

    #[test]
    fn expliziter_startindex_gewinnt() {
        assert_eq!(query(Some("5"), Some("3"), Some("1")).fenster(), (1, 5));
        assert_eq!(query(None, None, Some("-3")).fenster(), (0, 10));
    }

    #[test]
    fn riesige_seitenzahl_ueberlaeuft_nicht() {
        let (offset, limit) = query(Some("1000"), Some(&i64::MAX.to_string()), None).fenster();
        assert_eq!(limit, 1000);
        assert_eq!(offset, i64::MAX as u64);
    }
}
