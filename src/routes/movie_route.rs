use crate::models::movie::{CreateMovieRequest, Movie, MovieListResponse};
use crate::services::movie_service::MovieService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List all movies
#[openapi(tag = "Movies")]
#[get("/movies")]
pub async fn list_movies(
    movie_service: &State<MovieService>,
) -> Result<Json<MovieListResponse>, AppError> {
    let response = movie_service.list_movies().await?;
    Ok(Json(response))
}

/// Get a single movie
#[openapi(tag = "Movies")]
#[get("/movies/<id>")]
pub async fn get_movie(
    id: i64,
    movie_service: &State<MovieService>,
) -> Result<Json<Movie>, AppError> {
    let movie = movie_service.get_movie(id).await?;
    Ok(Json(movie))
}

/// Create a movie (admin)
#[openapi(tag = "Movies")]
#[post("/movies", format = "json", data = "<request>")]
pub async fn create_movie(
    request: Json<CreateMovieRequest>,
    _admin: AdminUser,
    movie_service: &State<MovieService>,
) -> Result<Json<Movie>, AppError> {
    let movie = movie_service.create_movie(request.into_inner()).await?;
    Ok(Json(movie))
}
