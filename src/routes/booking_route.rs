use crate::models::booking::{
    AdminStatsResponse, BookingHistoryResponse, BookingResponse, CheckoutSessionResponse,
    ConfirmBookingRequest, CreateBookingRequest, CreateCheckoutSessionRequest,
};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, AuthenticatedUser};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Book seats directly, without the external payment flow
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<CreateBookingRequest>,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service
        .create_booking(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(booking.into()))
}

/// Create a checkout session and return the payment redirect URL
#[openapi(tag = "Bookings")]
#[post("/bookings/create-checkout-session", format = "json", data = "<request>")]
pub async fn create_checkout_session(
    request: Json<CreateCheckoutSessionRequest>,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<CheckoutSessionResponse>, AppError> {
    let response = booking_service
        .create_checkout_session(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(response))
}

/// Confirm a booking after returning from the payment provider
#[openapi(tag = "Bookings")]
#[post("/bookings/confirm", format = "json", data = "<request>")]
pub async fn confirm_booking(
    request: Json<ConfirmBookingRequest>,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service
        .confirm_booking(&request.into_inner().session_id)
        .await?;
    Ok(Json(booking.into()))
}

/// Current user's booking history
#[openapi(tag = "Bookings")]
#[get("/bookings/my-bookings")]
pub async fn my_bookings(
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingHistoryResponse>, AppError> {
    let response = booking_service.get_my_bookings(auth.user_id).await?;
    Ok(Json(response))
}

/// Revenue and entity counts (admin)
#[openapi(tag = "Bookings")]
#[get("/bookings/stats")]
pub async fn admin_stats(
    _admin: AdminUser,
    booking_service: &State<BookingService>,
) -> Result<Json<AdminStatsResponse>, AppError> {
    let response = booking_service.get_admin_stats().await?;
    Ok(Json(response))
}

/// Get a single booking; owners and admins only
#[openapi(tag = "Bookings")]
#[get("/bookings/<id>")]
pub async fn get_booking(
    id: i64,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service
        .get_booking(id, auth.user_id, auth.role)
        .await?;
    Ok(Json(booking.into()))
}

/// List all bookings (admin)
#[openapi(tag = "Bookings")]
#[get("/bookings")]
pub async fn all_bookings(
    _admin: AdminUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingHistoryResponse>, AppError> {
    let response = booking_service.get_all_bookings().await?;
    Ok(Json(response))
}
