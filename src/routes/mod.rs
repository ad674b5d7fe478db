pub mod auth_route;
pub mod booking_route;
pub mod movie_route;
pub mod show_route;
pub mod theater_route;
