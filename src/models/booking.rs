use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Durable record of a completed, paid purchase.
///
/// `seats` holds the ordered seat labels comma-joined, the same encoding the
/// payment session metadata uses. `payment_ref` is the checkout session id
/// that produced the booking; its uniqueness makes confirmation idempotent.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub show_id: i64,
    pub seats: String,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub payment_ref: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Booking {
    pub fn seat_labels(&self) -> Vec<String> {
        self.seats.split(',').map(str::to_string).collect()
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub user_id: i64,
    pub show_id: i64,
    pub seats: Vec<String>,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let seats = booking.seat_labels();
        BookingResponse {
            id: booking.id,
            user_id: booking.user_id,
            show_id: booking.show_id,
            seats,
            total_amount: booking.total_amount,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct CreateBookingRequest {
    pub show_id: i64,
    #[validate(length(min = 1, max = 6, message = "select between 1 and 6 seats"))]
    pub seats: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct CreateCheckoutSessionRequest {
    pub show_id: i64,
    #[validate(length(min = 1, max = 6, message = "select between 1 and 6 seats"))]
    pub seats: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ConfirmBookingRequest {
    pub session_id: String,
}

// Booking row joined with show, movie and theater for history views
#[derive(Debug, sqlx::FromRow, Serialize, JsonSchema)]
pub struct BookingHistoryDetail {
    pub id: i64,
    pub seats: String,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub movie_title: String,
    pub poster_url: String,
    pub theater_name: String,
    pub theater_city: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingHistoryResponse {
    pub count: usize,
    pub bookings: Vec<BookingHistoryDetail>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct AdminStatsResponse {
    pub revenue: i64,
    pub bookings: i64,
    pub movies: i64,
    pub theaters: i64,
}
