use crate::models::theater::{CreateTheaterRequest, TheaterDetailResponse, TheaterListResponse};
use crate::services::theater_service::TheaterService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List all theaters
#[openapi(tag = "Theaters")]
#[get("/theaters")]
pub async fn list_theaters(
    theater_service: &State<TheaterService>,
) -> Result<Json<TheaterListResponse>, AppError> {
    let response = theater_service.list_theaters().await?;
    Ok(Json(response))
}

/// Get a theater with its screens
#[openapi(tag = "Theaters")]
#[get("/theaters/<id>")]
pub async fn get_theater(
    id: i64,
    theater_service: &State<TheaterService>,
) -> Result<Json<TheaterDetailResponse>, AppError> {
    let response = theater_service.get_theater(id).await?;
    Ok(Json(response))
}

/// Create a theater with its screens (admin)
#[openapi(tag = "Theaters")]
#[post("/theaters", format = "json", data = "<request>")]
pub async fn create_theater(
    request: Json<CreateTheaterRequest>,
    _admin: AdminUser,
    theater_service: &State<TheaterService>,
) -> Result<Json<TheaterDetailResponse>, AppError> {
    let response = theater_service.create_theater(request.into_inner()).await?;
    Ok(Json(response))
}
