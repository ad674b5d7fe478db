use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, JsonSchema)]
pub struct Theater {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, JsonSchema)]
pub struct Screen {
    pub id: i64,
    pub theater_id: i64,
    pub name: String,
    pub seat_rows: i64,
    pub seat_cols: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateScreenRequest {
    pub name: String,
    pub seat_rows: i64,
    pub seat_cols: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTheaterRequest {
    pub name: String,
    pub city: String,
    pub address: String,
    pub screens: Vec<CreateScreenRequest>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TheaterDetailResponse {
    pub theater: Theater,
    pub screens: Vec<Screen>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TheaterListResponse {
    pub count: usize,
    pub theaters: Vec<Theater>,
}
