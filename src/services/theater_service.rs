use crate::models::show::MAX_SEAT_ROWS;
use crate::models::theater::{
    CreateTheaterRequest, Screen, Theater, TheaterDetailResponse, TheaterListResponse,
};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct TheaterService {
    pool: SqlitePool,
}

impl TheaterService {
    pub fn new(pool: SqlitePool) -> Self {
        TheaterService { pool }
    }

    pub async fn list_theaters(&self) -> AppResult<TheaterListResponse> {
        let theaters = sqlx::query_as::<_, Theater>(
            "SELECT id, name, city, address, created_at FROM theater ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(TheaterListResponse {
            count: theaters.len(),
            theaters,
        })
    }

    pub async fn get_theater(&self, theater_id: i64) -> AppResult<TheaterDetailResponse> {
        let theater = sqlx::query_as::<_, Theater>(
            "SELECT id, name, city, address, created_at FROM theater WHERE id = ?",
        )
        .bind(theater_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Theater not found with id of {}", theater_id))
        })?;

        let screens = sqlx::query_as::<_, Screen>(
            "SELECT id, theater_id, name, seat_rows, seat_cols FROM screen WHERE theater_id = ? ORDER BY name",
        )
        .bind(theater_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(TheaterDetailResponse { theater, screens })
    }

    // Admin: create a theater together with its screens
    pub async fn create_theater(&self, request: CreateTheaterRequest) -> AppResult<TheaterDetailResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::BadRequest("Please add a theater name".into()));
        }
        if request.screens.is_empty() {
            return Err(AppError::BadRequest("Please add at least one screen".into()));
        }
        for screen in &request.screens {
            if screen.seat_rows < 1 || screen.seat_rows > MAX_SEAT_ROWS || screen.seat_cols < 1 {
                return Err(AppError::ValidationError(format!(
                    "Invalid layout for screen {}",
                    screen.name
                )));
            }
        }

        let created_at = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO theater (name, city, address, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.city)
        .bind(&request.address)
        .bind(created_at)
        .execute(&mut *tx)
        .await;

        let theater_id = match result {
            Ok(result) => result.last_insert_rowid(),
            Err(err) => {
                let duplicate = err
                    .as_database_error()
                    .map(|db_err| db_err.is_unique_violation())
                    .unwrap_or(false);
                tx.rollback().await?;
                if duplicate {
                    return Err(AppError::Conflict("Theater name already exists".into()));
                }
                return Err(err.into());
            }
        };

        let mut screens = Vec::with_capacity(request.screens.len());
        for screen in &request.screens {
            let inserted = sqlx::query(
                "INSERT INTO screen (theater_id, name, seat_rows, seat_cols) VALUES (?, ?, ?, ?)",
            )
            .bind(theater_id)
            .bind(&screen.name)
            .bind(screen.seat_rows)
            .bind(screen.seat_cols)
            .execute(&mut *tx)
            .await?;

            screens.push(Screen {
                id: inserted.last_insert_rowid(),
                theater_id,
                name: screen.name.clone(),
                seat_rows: screen.seat_rows,
                seat_cols: screen.seat_cols,
            });
        }

        tx.commit().await?;

        Ok(TheaterDetailResponse {
            theater: Theater {
                id: theater_id,
                name: request.name,
                city: request.city,
                address: request.address,
                created_at,
            },
            screens,
        })
    }
}
