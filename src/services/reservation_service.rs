use crate::models::show::ScreenGeometry;
use crate::utils::error::{AppError, AppResult};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::collections::HashSet;

/// Sole gatekeeper for seat sales.
///
/// A claim is a single multi-row `INSERT OR IGNORE` into `show_seat` inside a
/// transaction; the primary key on (show_id, seat_label) rejects rows for
/// seats that are already sold. The insert either covers the whole seat list
/// or the transaction rolls back, so there is no window between checking
/// availability and recording the sale, and no partial claim.
#[derive(Clone)]
pub struct ReservationService {
    pool: SqlitePool,
}

impl ReservationService {
    pub fn new(pool: SqlitePool) -> Self {
        ReservationService { pool }
    }

    /// Marks the given seats sold for the show, all-or-nothing.
    ///
    /// Returns `AppError::Conflict` when any requested seat is already sold;
    /// in that case the sold-set is left untouched and the caller must
    /// re-query availability.
    pub async fn claim_seats(&self, show_id: i64, seat_labels: &[String]) -> AppResult<()> {
        let geometry = self.show_geometry(show_id).await?;
        Self::validate_seat_selection(geometry, seat_labels)?;

        let mut tx = self.pool.begin().await?;
        Self::claim_seats_in(&mut tx, show_id, seat_labels).await?;
        tx.commit().await?;

        tracing::debug!(show_id, seats = ?seat_labels, "seats claimed");
        Ok(())
    }

    /// The claim primitive, running inside the caller's transaction so a
    /// booking write can share the same atomic unit.
    pub(crate) async fn claim_seats_in(
        tx: &mut Transaction<'_, Sqlite>,
        show_id: i64,
        seat_labels: &[String],
    ) -> AppResult<()> {
        let mut qb = QueryBuilder::new("INSERT OR IGNORE INTO show_seat (show_id, seat_label) ");
        qb.push_values(seat_labels, |mut row, label| {
            row.push_bind(show_id);
            row.push_bind(label.as_str());
        });
        let result = qb.build().execute(&mut **tx).await?;

        if result.rows_affected() as usize != seat_labels.len() {
            return Err(AppError::Conflict(
                "One or more selected seats are already booked".into(),
            ));
        }

        Ok(())
    }

    /// Compensating action: removes seats from the sold-set.
    ///
    /// Used only when a later step of the same purchase fails after a
    /// successful claim. Returns the number of seats released.
    pub async fn release_seats(&self, show_id: i64, seat_labels: &[String]) -> AppResult<u64> {
        if seat_labels.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::new("DELETE FROM show_seat WHERE show_id = ");
        qb.push_bind(show_id);
        qb.push(" AND seat_label IN (");
        let mut separated = qb.separated(", ");
        for label in seat_labels {
            separated.push_bind(label.as_str());
        }
        qb.push(")");
        let result = qb.build().execute(&self.pool).await?;

        tracing::debug!(show_id, released = result.rows_affected(), "seats released");
        Ok(result.rows_affected())
    }

    /// Rejects empty, duplicated, or geometrically impossible seat selections.
    pub fn validate_seat_selection(
        geometry: ScreenGeometry,
        seat_labels: &[String],
    ) -> AppResult<()> {
        if seat_labels.is_empty() {
            return Err(AppError::BadRequest("Please select at least one seat".into()));
        }

        let mut seen = HashSet::new();
        for label in seat_labels {
            if !geometry.contains(label) {
                return Err(AppError::ValidationError(format!(
                    "Invalid seat label: {}",
                    label
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate seat label: {}",
                    label
                )));
            }
        }

        Ok(())
    }

    async fn show_geometry(&self, show_id: i64) -> AppResult<ScreenGeometry> {
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT seat_rows, seat_cols FROM show WHERE id = ?")
                .bind(show_id)
                .fetch_optional(&self.pool)
                .await?;

        let (rows, cols) =
            row.ok_or_else(|| AppError::NotFound(format!("Show not found with id of {}", show_id)))?;

        Ok(ScreenGeometry { rows, cols })
    }
}
