use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, JsonSchema)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i64,
    pub genre: String,
    pub language: String,
    pub release_date: Option<NaiveDate>,
    pub poster_url: String,
    pub trailer_url: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMovieRequest {
    pub title: String,
    pub description: String,
    pub duration_minutes: i64,
    pub genre: String,
    pub language: String,
    pub release_date: Option<NaiveDate>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MovieListResponse {
    pub count: usize,
    pub movies: Vec<Movie>,
}
