use crate::models::booking::{
    AdminStatsResponse, Booking, BookingHistoryDetail, BookingHistoryResponse, BookingStatus,
    CheckoutSessionResponse, CreateBookingRequest, CreateCheckoutSessionRequest,
};
use crate::models::payment::{
    CheckoutSession, CheckoutSessionParams, METADATA_SEATS, METADATA_SHOW_ID, METADATA_USER_ID,
};
use crate::models::show::{ScreenGeometry, ShowFormat};
use crate::models::user::Role;
use crate::services::payment_provider::PaymentProvider;
use crate::services::reservation_service::ReservationService;
use crate::utils::error::{AppError, AppResult};
use chrono::{NaiveTime, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

const CURRENCY: &str = "inr";
const MAX_RETRIEVE_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Orchestrates the purchase flow: checkout session creation before payment,
/// and the verify -> claim -> record workflow after the client returns from
/// the provider. The session reference is the only business input accepted
/// from the client; user, show, seats and amount are read back from the
/// provider at confirmation time.
#[derive(Clone)]
pub struct BookingService {
    pool: SqlitePool,
    reservation_service: ReservationService,
    payment_provider: Arc<dyn PaymentProvider>,
    client_url: String,
}

// Show row joined with movie and theater names for the checkout line item
#[derive(Debug, sqlx::FromRow)]
struct ShowCheckoutRow {
    seat_rows: i64,
    seat_cols: i64,
    show_time: NaiveTime,
    format: ShowFormat,
    ticket_price: i64,
    movie_title: String,
    theater_name: String,
}

impl BookingService {
    pub fn new(
        pool: SqlitePool,
        payment_provider: Arc<dyn PaymentProvider>,
        client_url: String,
    ) -> Self {
        BookingService {
            reservation_service: ReservationService::new(pool.clone()),
            pool,
            payment_provider,
            client_url,
        }
    }

    /// Direct booking without the external payment flow (counter sales and
    /// development mode): claim first, then record the purchase.
    pub async fn create_booking(
        &self,
        user_id: i64,
        request: CreateBookingRequest,
    ) -> AppResult<Booking> {
        request.validate()?;

        let ticket_price: Option<i64> =
            sqlx::query_scalar("SELECT ticket_price FROM show WHERE id = ?")
                .bind(request.show_id)
                .fetch_optional(&self.pool)
                .await?;
        let ticket_price = ticket_price.ok_or_else(|| {
            AppError::NotFound(format!("Show not found with id of {}", request.show_id))
        })?;

        // Validates the selection and fails with Conflict if any seat is taken
        self.reservation_service
            .claim_seats(request.show_id, &request.seats)
            .await?;

        // Price captured from the show at booking time
        let total_amount = ticket_price * request.seats.len() as i64;
        let created_at = Utc::now().naive_utc();
        let seats = request.seats.join(",");

        let insert = sqlx::query(
            r#"
            INSERT INTO booking (user_id, show_id, seats, total_amount, status, payment_ref, created_at)
            VALUES (?, ?, ?, ?, ?, NULL, ?)
            "#,
        )
        .bind(user_id)
        .bind(request.show_id)
        .bind(&seats)
        .bind(total_amount)
        .bind(BookingStatus::Confirmed)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        let result = match insert {
            Ok(result) => result,
            Err(err) => {
                // Best-effort rollback of the claim; the seats would otherwise
                // stay sold with no booking behind them
                if let Err(release_err) = self
                    .reservation_service
                    .release_seats(request.show_id, &request.seats)
                    .await
                {
                    tracing::error!(
                        show_id = request.show_id,
                        seats = ?request.seats,
                        error = %release_err,
                        "manual rollback failed"
                    );
                }
                return Err(err.into());
            }
        };

        Ok(Booking {
            id: result.last_insert_rowid(),
            user_id,
            show_id: request.show_id,
            seats,
            total_amount,
            status: BookingStatus::Confirmed,
            payment_ref: None,
            created_at,
        })
    }

    /// Registers purchase intent with the payment provider and returns the
    /// redirect target.
    ///
    /// Seat availability is deliberately not checked here: seats are not held
    /// during payment, they are claimed at confirmation. The purchase data is
    /// attached as session metadata so confirmation never has to trust the
    /// client again.
    pub async fn create_checkout_session(
        &self,
        user_id: i64,
        request: CreateCheckoutSessionRequest,
    ) -> AppResult<CheckoutSessionResponse> {
        request.validate()?;

        let show = sqlx::query_as::<_, ShowCheckoutRow>(
            r#"
            SELECT
                s.seat_rows,
                s.seat_cols,
                s.show_time,
                s.format,
                s.ticket_price,
                m.title AS movie_title,
                t.name AS theater_name
            FROM show s
            INNER JOIN movie m ON s.movie_id = m.id
            INNER JOIN theater t ON s.theater_id = t.id
            WHERE s.id = ?
            "#,
        )
        .bind(request.show_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Show not found with id of {}", request.show_id))
        })?;

        let geometry = ScreenGeometry {
            rows: show.seat_rows,
            cols: show.seat_cols,
        };
        ReservationService::validate_seat_selection(geometry, &request.seats)?;

        let metadata = HashMap::from([
            (METADATA_USER_ID.to_string(), user_id.to_string()),
            (METADATA_SHOW_ID.to_string(), request.show_id.to_string()),
            (METADATA_SEATS.to_string(), request.seats.join(",")),
        ]);

        let params = CheckoutSessionParams {
            product_name: format!("{} - {}", show.movie_title, show.theater_name),
            product_description: format!(
                "Seats: {} | {} | {}",
                request.seats.join(", "),
                show.show_time.format("%H:%M"),
                show.format
            ),
            currency: CURRENCY.to_string(),
            // Amount in the currency's minor unit
            unit_amount: show.ticket_price * 100,
            quantity: request.seats.len() as u32,
            metadata,
            success_url: format!(
                "{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}",
                self.client_url
            ),
            cancel_url: format!("{}/payment/failure", self.client_url),
        };

        let session = self.payment_provider.create_checkout_session(params).await?;
        let url = session.url.ok_or_else(|| {
            AppError::PaymentProvider("checkout session has no redirect url".into())
        })?;

        Ok(CheckoutSessionResponse {
            id: session.id,
            url,
        })
    }

    /// Converts a paid checkout session into a durable booking.
    ///
    /// Safe to invoke repeatedly with the same session reference: the session
    /// id is stored on the booking as a unique dedup key, so a duplicate
    /// confirmation returns the original booking instead of claiming seats
    /// again. Seat claim and booking insert share one transaction.
    pub async fn confirm_booking(&self, session_id: &str) -> AppResult<Booking> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(AppError::BadRequest("Session ID is required".into()));
        }

        // 1. Duplicate redirect: return the booking this session already paid for
        if let Some(existing) = self.booking_by_payment_ref(session_id).await? {
            return Ok(existing);
        }

        // 2. Retrieve authoritative payment state from the provider
        let session = self.retrieve_session_with_retry(session_id).await?;
        if !session.is_paid() {
            return Err(AppError::PaymentNotVerified("Payment not verified".into()));
        }

        // 3. Reconstruct the purchase from provider-held metadata only
        let (user_id, show_id, seat_labels) = Self::purchase_from_metadata(&session)?;
        let amount_total = session.amount_total.ok_or_else(|| {
            AppError::PaymentProvider("session has no total amount".into())
        })?;
        let total_amount = amount_total / 100;

        let geometry = self.show_geometry(show_id).await?;
        ReservationService::validate_seat_selection(geometry, &seat_labels)?;

        // 4. Claim seats and write the booking as one atomic unit
        let mut tx = self.pool.begin().await?;

        if let Err(err) = ReservationService::claim_seats_in(&mut tx, show_id, &seat_labels).await {
            tx.rollback().await?;
            if matches!(err, AppError::Conflict(_)) {
                // A concurrent confirmation of the same session may have won
                if let Some(existing) = self.booking_by_payment_ref(session_id).await? {
                    return Ok(existing);
                }
                tracing::error!(
                    session_id,
                    show_id,
                    seats = ?seat_labels,
                    "payment captured but seats already sold; manual refund required"
                );
            } else {
                tracing::error!(session_id, show_id, error = %err, "seat claim failed during confirmation");
            }
            return Err(err);
        }

        let created_at = Utc::now().naive_utc();
        let seats = seat_labels.join(",");
        let insert = sqlx::query(
            r#"
            INSERT INTO booking (user_id, show_id, seats, total_amount, status, payment_ref, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(show_id)
        .bind(&seats)
        .bind(total_amount)
        .bind(BookingStatus::Confirmed)
        .bind(session_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await;

        let booking_id = match insert {
            Ok(result) => result.last_insert_rowid(),
            Err(err) => {
                let duplicate_ref = err
                    .as_database_error()
                    .map(|db_err| db_err.is_unique_violation())
                    .unwrap_or(false);
                tx.rollback().await?;
                if duplicate_ref {
                    if let Some(existing) = self.booking_by_payment_ref(session_id).await? {
                        return Ok(existing);
                    }
                }
                tracing::error!(session_id, show_id, error = %err, "booking insert failed during confirmation");
                return Err(err.into());
            }
        };

        tx.commit().await?;

        tracing::info!(booking_id, session_id, show_id, user_id, "booking confirmed");

        Ok(Booking {
            id: booking_id,
            user_id,
            show_id,
            seats,
            total_amount,
            status: BookingStatus::Confirmed,
            payment_ref: Some(session_id.to_string()),
            created_at,
        })
    }

    pub async fn get_booking(
        &self,
        booking_id: i64,
        user_id: i64,
        role: Role,
    ) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, show_id, seats, total_amount, status, payment_ref, created_at
            FROM booking WHERE id = ?
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Booking not found with id of {}", booking_id))
        })?;

        if booking.user_id != user_id && role != Role::Admin {
            return Err(AppError::Forbidden(
                "Not authorized to access this booking".into(),
            ));
        }

        Ok(booking)
    }

    pub async fn get_my_bookings(&self, user_id: i64) -> AppResult<BookingHistoryResponse> {
        let bookings = sqlx::query_as::<_, BookingHistoryDetail>(
            r#"
            SELECT
                b.id,
                b.seats,
                b.total_amount,
                b.status,
                b.created_at,
                s.show_date,
                s.show_time,
                m.title AS movie_title,
                m.poster_url,
                t.name AS theater_name,
                t.city AS theater_city
            FROM booking b
            INNER JOIN show s ON b.show_id = s.id
            INNER JOIN movie m ON s.movie_id = m.id
            INNER JOIN theater t ON s.theater_id = t.id
            WHERE b.user_id = ?
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookingHistoryResponse {
            count: bookings.len(),
            bookings,
        })
    }

    pub async fn get_all_bookings(&self) -> AppResult<BookingHistoryResponse> {
        let bookings = sqlx::query_as::<_, BookingHistoryDetail>(
            r#"
            SELECT
                b.id,
                b.seats,
                b.total_amount,
                b.status,
                b.created_at,
                s.show_date,
                s.show_time,
                m.title AS movie_title,
                m.poster_url,
                t.name AS theater_name,
                t.city AS theater_city
            FROM booking b
            INNER JOIN show s ON b.show_id = s.id
            INNER JOIN movie m ON s.movie_id = m.id
            INNER JOIN theater t ON s.theater_id = t.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(BookingHistoryResponse {
            count: bookings.len(),
            bookings,
        })
    }

    pub async fn get_admin_stats(&self) -> AppResult<AdminStatsResponse> {
        let (revenue, bookings): (i64, i64) =
            sqlx::query_as("SELECT COALESCE(SUM(total_amount), 0), COUNT(*) FROM booking")
                .fetch_one(&self.pool)
                .await?;
        let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie")
            .fetch_one(&self.pool)
            .await?;
        let theaters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM theater")
            .fetch_one(&self.pool)
            .await?;

        Ok(AdminStatsResponse {
            revenue,
            bookings,
            movies,
            theaters,
        })
    }

    async fn retrieve_session_with_retry(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let mut attempt: u32 = 1;
        loop {
            match self.payment_provider.retrieve_session(session_id).await {
                Ok(session) => return Ok(session),
                Err(AppError::PaymentProvider(msg)) if attempt < MAX_RETRIEVE_ATTEMPTS => {
                    tracing::warn!(session_id, attempt, error = %msg, "retrying session retrieval");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn purchase_from_metadata(session: &CheckoutSession) -> AppResult<(i64, i64, Vec<String>)> {
        let user_id = session
            .metadata
            .get(METADATA_USER_ID)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| {
                AppError::PaymentProvider("session metadata is missing the user id".into())
            })?;
        let show_id = session
            .metadata
            .get(METADATA_SHOW_ID)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| {
                AppError::PaymentProvider("session metadata is missing the show id".into())
            })?;
        let seat_labels: Vec<String> = session
            .metadata
            .get(METADATA_SEATS)
            .map(|value| value.split(',').map(str::to_string).collect())
            .ok_or_else(|| {
                AppError::PaymentProvider("session metadata is missing the seat list".into())
            })?;

        Ok((user_id, show_id, seat_labels))
    }

    async fn booking_by_payment_ref(&self, session_id: &str) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, show_id, seats, total_amount, status, payment_ref, created_at
            FROM booking WHERE payment_ref = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn show_geometry(&self, show_id: i64) -> AppResult<ScreenGeometry> {
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT seat_rows, seat_cols FROM show WHERE id = ?")
                .bind(show_id)
                .fetch_optional(&self.pool)
                .await?;

        let (rows, cols) =
            row.ok_or_else(|| AppError::NotFound(format!("Show not found with id of {}", show_id)))?;

        Ok(ScreenGeometry { rows, cols })
    }
}
