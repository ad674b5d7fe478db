use cinema_booking_system::models::show::{CreateShowRequest, ShowFormat};
use cinema_booking_system::services::reservation_service::ReservationService;
use cinema_booking_system::services::show_service::ShowService;
use cinema_booking_system::utils::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{seat_list, seed_movie, seed_show, seed_theater, TestDb};

struct ShowServiceContext {
    pool: SqlitePool,
    show_service: ShowService,
    reservation_service: ReservationService,
}

#[async_trait]
impl AsyncTestContext for ShowServiceContext {
    async fn setup() -> Self {
        let pool = TestDb::get_instance()
            .await
            .expect("Failed to get test database instance");

        let show_service = ShowService::new(pool.clone());
        let reservation_service = ReservationService::new(pool.clone());

        ShowServiceContext {
            pool,
            show_service,
            reservation_service,
        }
    }
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_get_show_includes_sold_seats(ctx: &ShowServiceContext) -> Result<(), AppError> {
    let show_id = seed_show(&ctx.pool, 400, 8, 12).await?;

    let detail = ctx.show_service.get_show(show_id).await?;
    assert_eq!(detail.seat_rows, 8);
    assert_eq!(detail.seat_cols, 12);
    assert_eq!(detail.ticket_price, 400);
    assert!(detail.booked_seats.is_empty());

    ctx.reservation_service
        .claim_seats(show_id, &seat_list(&["B7", "B8"]))
        .await?;

    // The seat map must reflect the committed claim
    let detail = ctx.show_service.get_show(show_id).await?;
    assert_eq!(detail.booked_seats, vec!["B7", "B8"]);

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_get_availability(ctx: &ShowServiceContext) -> Result<(), AppError> {
    let show_id = seed_show(&ctx.pool, 400, 5, 5).await?;

    ctx.reservation_service
        .claim_seats(show_id, &seat_list(&["A1"]))
        .await?;

    let availability = ctx.show_service.get_availability(show_id).await?;
    assert_eq!(availability.seat_rows, 5);
    assert_eq!(availability.seat_cols, 5);
    assert_eq!(availability.booked_seats, vec!["A1"]);

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_show_not_found(ctx: &ShowServiceContext) -> Result<(), AppError> {
    let result = ctx.show_service.get_show(9999).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = ctx.show_service.get_availability(9999).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_list_shows_filters(ctx: &ShowServiceContext) -> Result<(), AppError> {
    let show_id = seed_show(&ctx.pool, 400, 10, 10).await?;
    let detail = ctx.show_service.get_show(show_id).await?;

    let all = ctx.show_service.list_shows(None, None).await?;
    assert_eq!(all.count, 1);

    let by_movie = ctx.show_service.list_shows(Some(detail.movie_id), None).await?;
    assert_eq!(by_movie.count, 1);
    assert_eq!(by_movie.shows[0].id, show_id);

    let other_movie = ctx.show_service.list_shows(Some(detail.movie_id + 1), None).await?;
    assert_eq!(other_movie.count, 0);

    // Date filter keeps shows on or after the given day
    let from_before = ctx
        .show_service
        .list_shows(None, NaiveDate::from_ymd_opt(2025, 1, 1))
        .await?;
    assert_eq!(from_before.count, 1);

    let from_after = ctx
        .show_service
        .list_shows(None, NaiveDate::from_ymd_opt(2030, 1, 1))
        .await?;
    assert_eq!(from_after.count, 0);

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_create_show_snapshots_screen_geometry(
    ctx: &ShowServiceContext,
) -> Result<(), AppError> {
    let movie_id = seed_movie(&ctx.pool, "Another Movie").await?;
    let theater_id = seed_theater(&ctx.pool, "Screen 2", 12, 14).await?;

    let show = ctx
        .show_service
        .create_show(CreateShowRequest {
            movie_id,
            theater_id,
            screen_name: "Screen 2".to_string(),
            format: Some(ShowFormat::Imax),
            show_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            show_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            ticket_price: 550,
        })
        .await?;

    assert_eq!(show.seat_rows, 12);
    assert_eq!(show.seat_cols, 14);
    assert_eq!(show.format, ShowFormat::Imax);

    let detail = ctx.show_service.get_show(show.id).await?;
    assert_eq!(detail.seat_rows, 12);
    assert_eq!(detail.seat_cols, 14);

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_create_show_rejects_unknown_screen(
    ctx: &ShowServiceContext,
) -> Result<(), AppError> {
    let movie_id = seed_movie(&ctx.pool, "Another Movie").await?;
    let theater_id = seed_theater(&ctx.pool, "Screen 2", 12, 14).await?;

    let result = ctx
        .show_service
        .create_show(CreateShowRequest {
            movie_id,
            theater_id,
            screen_name: "Screen 9".to_string(),
            format: None,
            show_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            show_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            ticket_price: 550,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_create_show_rejects_double_booked_screen_slot(
    ctx: &ShowServiceContext,
) -> Result<(), AppError> {
    let movie_id = seed_movie(&ctx.pool, "Another Movie").await?;
    let theater_id = seed_theater(&ctx.pool, "Screen 2", 12, 14).await?;

    let request = CreateShowRequest {
        movie_id,
        theater_id,
        screen_name: "Screen 2".to_string(),
        format: None,
        show_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        show_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        ticket_price: 550,
    };

    ctx.show_service.create_show(request.clone()).await?;

    let result = ctx.show_service.create_show(request).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

#[test_context(ShowServiceContext)]
#[tokio::test]
async fn test_delete_show(ctx: &ShowServiceContext) -> Result<(), AppError> {
    let show_id = seed_show(&ctx.pool, 400, 10, 10).await?;

    ctx.show_service.delete_show(show_id).await?;

    let result = ctx.show_service.get_show(show_id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = ctx.show_service.delete_show(show_id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
