#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

use cinema_booking_system::db;
use cinema_booking_system::routes::{
    auth_route, booking_route, movie_route, show_route, theater_route,
};
use cinema_booking_system::services::booking_service::BookingService;
use cinema_booking_system::services::movie_service::MovieService;
use cinema_booking_system::services::payment_provider::{PaymentProvider, StripeProvider};
use cinema_booking_system::services::show_service::ShowService;
use cinema_booking_system::services::theater_service::TheaterService;
use cinema_booking_system::services::user_service::UserService;
use cinema_booking_system::swagger::swagger_ui;
use dotenv::dotenv;
use rocket::fairing::AdHoc;
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Connect to the database and make sure the schema exists
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let database = db::Database::new(&database_url)
        .await
        .expect("Failed to connect to database");
    let pool = database.pool.clone();
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    let stripe_secret = std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set");
    let client_url =
        std::env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
    let payment_provider: Arc<dyn PaymentProvider> = Arc::new(
        StripeProvider::new(stripe_secret).expect("Failed to build payment provider client"),
    );

    // Initialize the services
    let user_service = UserService::new(pool.clone());
    let movie_service = MovieService::new(pool.clone());
    let theater_service = TheaterService::new(pool.clone());
    let show_service = ShowService::new(pool.clone());
    let booking_service = BookingService::new(pool.clone(), payment_provider, client_url);

    rocket::build()
        .manage(user_service)
        .manage(movie_service)
        .manage(theater_service)
        .manage(show_service)
        .manage(booking_service)
        .mount(
            "/api",
            openapi_get_routes![
                auth_route::register,
                auth_route::login,
                auth_route::me,
                movie_route::list_movies,
                movie_route::get_movie,
                movie_route::create_movie,
                theater_route::list_theaters,
                theater_route::get_theater,
                theater_route::create_theater,
                show_route::list_shows,
                show_route::get_show,
                show_route::get_availability,
                show_route::create_show,
                show_route::delete_show,
                booking_route::create_booking,
                booking_route::create_checkout_session,
                booking_route::confirm_booking,
                booking_route::my_bookings,
                booking_route::admin_stats,
                booking_route::get_booking,
                booking_route::all_bookings,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
