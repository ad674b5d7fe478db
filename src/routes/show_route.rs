use crate::models::show::{
    AvailabilityResponse, CreateShowRequest, Show, ShowDetailResponse, ShowListResponse,
};
use crate::services::show_service::ShowService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use chrono::NaiveDate;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List shows, optionally filtered by movie and start date
#[openapi(tag = "Shows")]
#[get("/shows?<movie>&<date>")]
pub async fn list_shows(
    movie: Option<i64>,
    date: Option<String>,
    show_service: &State<ShowService>,
) -> Result<Json<ShowListResponse>, AppError> {
    let date = if let Some(date) = date {
        Some(
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest("Invalid date format".into()))?,
        )
    } else {
        None
    };

    let response = show_service.list_shows(movie, date).await?;
    Ok(Json(response))
}

/// Get a show with its current sold-seat set
#[openapi(tag = "Shows")]
#[get("/shows/<id>")]
pub async fn get_show(
    id: i64,
    show_service: &State<ShowService>,
) -> Result<Json<ShowDetailResponse>, AppError> {
    let response = show_service.get_show(id).await?;
    Ok(Json(response))
}

/// Seat map for a show: screen geometry plus booked seats
#[openapi(tag = "Shows")]
#[get("/shows/<id>/seats")]
pub async fn get_availability(
    id: i64,
    show_service: &State<ShowService>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let response = show_service.get_availability(id).await?;
    Ok(Json(response))
}

/// Schedule a show (admin)
#[openapi(tag = "Shows")]
#[post("/shows", format = "json", data = "<request>")]
pub async fn create_show(
    request: Json<CreateShowRequest>,
    _admin: AdminUser,
    show_service: &State<ShowService>,
) -> Result<Json<Show>, AppError> {
    let show = show_service.create_show(request.into_inner()).await?;
    Ok(Json(show))
}

/// Delete a show (admin)
#[openapi(tag = "Shows")]
#[delete("/shows/<id>")]
pub async fn delete_show(
    id: i64,
    _admin: AdminUser,
    show_service: &State<ShowService>,
) -> Result<Json<serde_json::Value>, AppError> {
    show_service.delete_show(id).await?;
    Ok(Json(serde_json::json!({})))
}
