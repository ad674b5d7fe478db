use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, JsonSchema, Display, EnumString)]
pub enum ShowFormat {
    #[sqlx(rename = "2D")]
    #[serde(rename = "2D")]
    #[strum(serialize = "2D")]
    TwoD,
    #[sqlx(rename = "3D")]
    #[serde(rename = "3D")]
    #[strum(serialize = "3D")]
    ThreeD,
    #[sqlx(rename = "IMAX")]
    #[serde(rename = "IMAX")]
    #[strum(serialize = "IMAX")]
    Imax,
    #[sqlx(rename = "4DX")]
    #[serde(rename = "4DX")]
    #[strum(serialize = "4DX")]
    FourDx,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, JsonSchema)]
pub struct Show {
    pub id: i64,
    pub movie_id: i64,
    pub theater_id: i64,
    pub screen_name: String,
    pub seat_rows: i64,
    pub seat_cols: i64,
    pub format: ShowFormat,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub ticket_price: i64,
    pub created_at: NaiveDateTime,
}

/// Seat layout of a screen, snapshotted onto each show.
///
/// Seat labels are a row letter followed by a 1-based column number ("A1",
/// "C12"). Rows are capped at 26 so every row maps to a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub rows: i64,
    pub cols: i64,
}

pub const MAX_SEAT_ROWS: i64 = 26;

impl ScreenGeometry {
    /// Parses a seat label into (row index, column number).
    pub fn parse_label(label: &str) -> Option<(u32, i64)> {
        let mut chars = label.chars();
        let row_char = chars.next()?;
        if !row_char.is_ascii_uppercase() {
            return None;
        }
        let col_part = chars.as_str();
        if col_part.is_empty() || col_part.len() > 3 || !col_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let col: i64 = col_part.parse().ok()?;
        Some((row_char as u32 - 'A' as u32, col))
    }

    /// Whether a label denotes a physical seat on this screen.
    pub fn contains(&self, label: &str) -> bool {
        match Self::parse_label(label) {
            Some((row, col)) => i64::from(row) < self.rows && col >= 1 && col <= self.cols,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateShowRequest {
    pub movie_id: i64,
    pub theater_id: i64,
    pub screen_name: String,
    pub format: Option<ShowFormat>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub ticket_price: i64,
}

// Single show row in ShowListResponse, joined with movie and theater names
#[derive(Debug, sqlx::FromRow, Serialize, JsonSchema)]
pub struct ShowSummary {
    pub id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub poster_url: String,
    pub theater_id: i64,
    pub theater_name: String,
    pub theater_city: String,
    pub screen_name: String,
    pub format: ShowFormat,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub ticket_price: i64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ShowListResponse {
    pub count: usize,
    pub shows: Vec<ShowSummary>,
}

// Seat map data for rendering: geometry plus the current sold-set
#[derive(Debug, Serialize, JsonSchema)]
pub struct AvailabilityResponse {
    pub seat_rows: i64,
    pub seat_cols: i64,
    pub booked_seats: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ShowDetailResponse {
    pub id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub theater_id: i64,
    pub theater_name: String,
    pub theater_city: String,
    pub screen_name: String,
    pub seat_rows: i64,
    pub seat_cols: i64,
    pub format: ShowFormat,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub ticket_price: i64,
    pub booked_seats: Vec<String>,
}
