use crate::models::show::{
    AvailabilityResponse, CreateShowRequest, Show, ShowDetailResponse, ShowFormat,
    ShowListResponse, ShowSummary, MAX_SEAT_ROWS,
};
use crate::utils::error::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, SqlitePool};

#[derive(Clone)]
pub struct ShowService {
    pool: SqlitePool,
}

// Detail row before the sold-set is attached
#[derive(Debug, sqlx::FromRow)]
struct ShowDetailRow {
    id: i64,
    movie_id: i64,
    movie_title: String,
    theater_id: i64,
    theater_name: String,
    theater_city: String,
    screen_name: String,
    seat_rows: i64,
    seat_cols: i64,
    format: ShowFormat,
    show_date: NaiveDate,
    show_time: chrono::NaiveTime,
    ticket_price: i64,
}

impl ShowService {
    pub fn new(pool: SqlitePool) -> Self {
        ShowService { pool }
    }

    // Browse shows, optionally narrowed to a movie and a start date
    pub async fn list_shows(
        &self,
        movie_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> AppResult<ShowListResponse> {
        let mut qb = QueryBuilder::new(
            r#"
            SELECT
                s.id,
                s.movie_id,
                m.title AS movie_title,
                m.poster_url,
                s.theater_id,
                t.name AS theater_name,
                t.city AS theater_city,
                s.screen_name,
                s.format,
                s.show_date,
                s.show_time,
                s.ticket_price
            FROM show s
            INNER JOIN movie m ON s.movie_id = m.id
            INNER JOIN theater t ON s.theater_id = t.id
            WHERE 1 = 1
            "#,
        );
        if let Some(movie_id) = movie_id {
            qb.push(" AND s.movie_id = ");
            qb.push_bind(movie_id);
        }
        if let Some(date) = date {
            qb.push(" AND s.show_date >= ");
            qb.push_bind(date);
        }
        qb.push(" ORDER BY s.show_date, s.show_time");

        let shows: Vec<ShowSummary> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(ShowListResponse {
            count: shows.len(),
            shows,
        })
    }

    pub async fn get_show(&self, show_id: i64) -> AppResult<ShowDetailResponse> {
        let row = sqlx::query_as::<_, ShowDetailRow>(
            r#"
            SELECT
                s.id,
                s.movie_id,
                m.title AS movie_title,
                s.theater_id,
                t.name AS theater_name,
                t.city AS theater_city,
                s.screen_name,
                s.seat_rows,
                s.seat_cols,
                s.format,
                s.show_date,
                s.show_time,
                s.ticket_price
            FROM show s
            INNER JOIN movie m ON s.movie_id = m.id
            INNER JOIN theater t ON s.theater_id = t.id
            WHERE s.id = ?
            "#,
        )
        .bind(show_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Show not found with id of {}", show_id)))?;

        let booked_seats = self.booked_seats(show_id).await?;

        Ok(ShowDetailResponse {
            id: row.id,
            movie_id: row.movie_id,
            movie_title: row.movie_title,
            theater_id: row.theater_id,
            theater_name: row.theater_name,
            theater_city: row.theater_city,
            screen_name: row.screen_name,
            seat_rows: row.seat_rows,
            seat_cols: row.seat_cols,
            format: row.format,
            show_date: row.show_date,
            show_time: row.show_time,
            ticket_price: row.ticket_price,
            booked_seats,
        })
    }

    /// Seat map for a show: geometry plus the committed sold-set.
    pub async fn get_availability(&self, show_id: i64) -> AppResult<AvailabilityResponse> {
        let geometry: Option<(i64, i64)> =
            sqlx::query_as("SELECT seat_rows, seat_cols FROM show WHERE id = ?")
                .bind(show_id)
                .fetch_optional(&self.pool)
                .await?;

        let (seat_rows, seat_cols) = geometry
            .ok_or_else(|| AppError::NotFound(format!("Show not found with id of {}", show_id)))?;

        let booked_seats = self.booked_seats(show_id).await?;

        Ok(AvailabilityResponse {
            seat_rows,
            seat_cols,
            booked_seats,
        })
    }

    // Admin: schedule a show, snapshotting the screen's geometry onto it
    pub async fn create_show(&self, request: CreateShowRequest) -> AppResult<Show> {
        if request.ticket_price <= 0 {
            return Err(AppError::BadRequest("Ticket price must be positive".into()));
        }

        let movie_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM movie WHERE id = ?")
            .bind(request.movie_id)
            .fetch_optional(&self.pool)
            .await?;
        if movie_exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Movie not found with id of {}",
                request.movie_id
            )));
        }

        let screen: Option<(i64, i64)> = sqlx::query_as(
            "SELECT seat_rows, seat_cols FROM screen WHERE theater_id = ? AND name = ?",
        )
        .bind(request.theater_id)
        .bind(&request.screen_name)
        .fetch_optional(&self.pool)
        .await?;

        let (seat_rows, seat_cols) = screen.ok_or_else(|| {
            AppError::NotFound(format!(
                "Screen {} not found in theater",
                request.screen_name
            ))
        })?;
        if seat_rows < 1 || seat_rows > MAX_SEAT_ROWS || seat_cols < 1 {
            return Err(AppError::ValidationError("Invalid screen layout".into()));
        }

        let format = request.format.unwrap_or(ShowFormat::TwoD);
        let created_at = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO show
            (movie_id, theater_id, screen_name, seat_rows, seat_cols, format,
                show_date, show_time, ticket_price, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.movie_id)
        .bind(request.theater_id)
        .bind(&request.screen_name)
        .bind(seat_rows)
        .bind(seat_cols)
        .bind(format)
        .bind(request.show_date)
        .bind(request.show_time)
        .bind(request.ticket_price)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                let duplicate_slot = err
                    .as_database_error()
                    .map(|db_err| db_err.is_unique_violation())
                    .unwrap_or(false);
                if duplicate_slot {
                    return Err(AppError::Conflict(
                        "A show already exists on this screen at this time".into(),
                    ));
                }
                return Err(err.into());
            }
        };

        Ok(Show {
            id: result.last_insert_rowid(),
            movie_id: request.movie_id,
            theater_id: request.theater_id,
            screen_name: request.screen_name,
            seat_rows,
            seat_cols,
            format,
            show_date: request.show_date,
            show_time: request.show_time,
            ticket_price: request.ticket_price,
            created_at,
        })
    }

    // Admin: remove a show and, through cascade, its sold-set
    pub async fn delete_show(&self, show_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM show WHERE id = ?")
            .bind(show_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Show not found with id of {}",
                show_id
            )));
        }

        Ok(())
    }

    async fn booked_seats(&self, show_id: i64) -> AppResult<Vec<String>> {
        let seats: Vec<String> = sqlx::query_scalar(
            "SELECT seat_label FROM show_seat WHERE show_id = ? ORDER BY seat_label",
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }
}
