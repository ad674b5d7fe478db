#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use cinema_booking_system::db;
use cinema_booking_system::models::payment::{
    CheckoutSession, CheckoutSessionParams, METADATA_SEATS, METADATA_SHOW_ID, METADATA_USER_ID,
};
use cinema_booking_system::services::payment_provider::PaymentProvider;
use cinema_booking_system::utils::error::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub struct TestDb;

impl TestDb {
    /// Builds a throwaway in-memory database with the full schema.
    ///
    /// A single connection keeps the in-memory database alive for the whole
    /// test; timeouts are disabled so the pool never recycles it away.
    pub async fn get_instance() -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        db::init_schema(&pool).await?;

        Ok(pool)
    }
}

pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO user (name, email, password, role, created_at) VALUES (?, ?, 'x', 'user', ?)",
    )
    .bind(name)
    .bind(email)
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn seed_movie(pool: &SqlitePool, title: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO movie
        (title, description, duration_minutes, genre, language, poster_url, trailer_url, created_at)
        VALUES (?, 'A test movie', 120, 'Drama', 'English', 'no-photo.jpg', '', ?)
        "#,
    )
    .bind(title)
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn seed_theater(
    pool: &SqlitePool,
    screen_name: &str,
    seat_rows: i64,
    seat_cols: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO theater (name, city, address, created_at) VALUES (?, 'Mumbai', '1 Test Road', ?)",
    )
    .bind(format!("Theater {}", Uuid::new_v4()))
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await?;
    let theater_id = result.last_insert_rowid();

    sqlx::query("INSERT INTO screen (theater_id, name, seat_rows, seat_cols) VALUES (?, ?, ?, ?)")
        .bind(theater_id)
        .bind(screen_name)
        .bind(seat_rows)
        .bind(seat_cols)
        .execute(pool)
        .await?;

    Ok(theater_id)
}

/// Seeds a movie, a theater with one screen, and a show on that screen.
/// Returns the show id.
pub async fn seed_show(
    pool: &SqlitePool,
    ticket_price: i64,
    seat_rows: i64,
    seat_cols: i64,
) -> Result<i64, sqlx::Error> {
    let movie_id = seed_movie(pool, "Test Movie").await?;
    let theater_id = seed_theater(pool, "Screen 1", seat_rows, seat_cols).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO show
        (movie_id, theater_id, screen_name, seat_rows, seat_cols, format,
            show_date, show_time, ticket_price, created_at)
        VALUES (?, ?, 'Screen 1', ?, ?, '2D', ?, ?, ?, ?)
        "#,
    )
    .bind(movie_id)
    .bind(theater_id)
    .bind(seat_rows)
    .bind(seat_cols)
    .bind(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    .bind(NaiveTime::from_hms_opt(18, 0, 0).unwrap())
    .bind(ticket_price)
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn sold_seats(pool: &SqlitePool, show_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT seat_label FROM show_seat WHERE show_id = ? ORDER BY seat_label")
        .bind(show_id)
        .fetch_all(pool)
        .await
}

pub async fn booking_count(pool: &SqlitePool, show_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM booking WHERE show_id = ?")
        .bind(show_id)
        .fetch_one(pool)
        .await
}

pub fn seat_list(seats: &[&str]) -> Vec<String> {
    seats.iter().map(|s| s.to_string()).collect()
}

/// In-memory payment provider double.
///
/// Sessions are held in a map keyed by session id; tests either drive the
/// real `create_checkout_session` path or insert sessions directly with the
/// payment status and metadata the provider would hold.
pub struct MockPaymentProvider {
    sessions: Mutex<HashMap<String, CheckoutSession>>,
    created: Mutex<Vec<CheckoutSessionParams>>,
    transient_failures: AtomicU32,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        MockPaymentProvider {
            sessions: Mutex::new(HashMap::new()),
            created: Mutex::new(Vec::new()),
            transient_failures: AtomicU32::new(0),
        }
    }

    /// Parameters of every checkout session created through the provider.
    pub fn created_params(&self) -> Vec<CheckoutSessionParams> {
        self.created.lock().unwrap().clone()
    }

    /// Makes the next `count` retrievals fail with a provider error.
    pub fn set_transient_failures(&self, count: u32) {
        self.transient_failures.store(count, Ordering::SeqCst);
    }

    pub fn insert_session(
        &self,
        payment_status: &str,
        amount_total: Option<i64>,
        metadata: HashMap<String, String>,
    ) -> String {
        let id = format!("cs_test_{}", Uuid::new_v4().simple());
        let session = CheckoutSession {
            id: id.clone(),
            url: Some(format!("https://checkout.test/pay/{}", id)),
            payment_status: payment_status.to_string(),
            amount_total,
            metadata,
        };
        self.sessions.lock().unwrap().insert(id.clone(), session);
        id
    }

    /// Session the provider would hold after a completed payment.
    pub fn insert_paid_session(
        &self,
        user_id: i64,
        show_id: i64,
        seats: &[&str],
        amount_total: i64,
    ) -> String {
        self.insert_session(
            "paid",
            Some(amount_total),
            purchase_metadata(user_id, show_id, seats),
        )
    }

    /// Marks an existing session paid, as the provider does after checkout.
    pub fn mark_paid(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(session_id) {
            session.payment_status = "paid".to_string();
        }
    }
}

pub fn purchase_metadata(user_id: i64, show_id: i64, seats: &[&str]) -> HashMap<String, String> {
    HashMap::from([
        (METADATA_USER_ID.to_string(), user_id.to_string()),
        (METADATA_SHOW_ID.to_string(), show_id.to_string()),
        (METADATA_SEATS.to_string(), seats.join(",")),
    ])
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> AppResult<CheckoutSession> {
        let amount_total = params.unit_amount * i64::from(params.quantity);
        let metadata = params.metadata.clone();
        self.created.lock().unwrap().push(params);

        let id = self.insert_session("unpaid", Some(amount_total), metadata);
        let session = self.sessions.lock().unwrap().get(&id).cloned();
        session.ok_or_else(|| AppError::PaymentProvider("session vanished".into()))
    }

    async fn retrieve_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::PaymentProvider("simulated provider outage".into()));
        }

        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| {
                AppError::PaymentProvider(format!("No such checkout session: {}", session_id))
            })
    }
}
