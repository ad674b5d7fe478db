pub mod booking_service;
pub mod movie_service;
pub mod payment_provider;
pub mod reservation_service;
pub mod show_service;
pub mod theater_service;
pub mod user_service;
