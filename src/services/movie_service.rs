use crate::models::movie::{CreateMovieRequest, Movie, MovieListResponse};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct MovieService {
    pool: SqlitePool,
}

impl MovieService {
    pub fn new(pool: SqlitePool) -> Self {
        MovieService { pool }
    }

    pub async fn list_movies(&self) -> AppResult<MovieListResponse> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, description, duration_minutes, genre, language,
                release_date, poster_url, trailer_url, created_at
            FROM movie
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(MovieListResponse {
            count: movies.len(),
            movies,
        })
    }

    pub async fn get_movie(&self, movie_id: i64) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, description, duration_minutes, genre, language,
                release_date, poster_url, trailer_url, created_at
            FROM movie WHERE id = ?
            "#,
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie not found with id of {}", movie_id)))
    }

    pub async fn create_movie(&self, request: CreateMovieRequest) -> AppResult<Movie> {
        if request.title.trim().is_empty() {
            return Err(AppError::BadRequest("Please add a movie title".into()));
        }
        if request.duration_minutes <= 0 {
            return Err(AppError::BadRequest("Please add duration in minutes".into()));
        }

        let poster_url = request.poster_url.unwrap_or_else(|| "no-photo.jpg".to_string());
        let trailer_url = request.trailer_url.unwrap_or_default();
        let created_at = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO movie
            (title, description, duration_minutes, genre, language,
                release_date, poster_url, trailer_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.duration_minutes)
        .bind(&request.genre)
        .bind(&request.language)
        .bind(request.release_date)
        .bind(&poster_url)
        .bind(&trailer_url)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Movie {
            id: result.last_insert_rowid(),
            title: request.title,
            description: request.description,
            duration_minutes: request.duration_minutes,
            genre: request.genre,
            language: request.language,
            release_date: request.release_date,
            poster_url,
            trailer_url,
            created_at,
        })
    }
}
