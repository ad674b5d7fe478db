use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(3));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Database { pool })
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Creates all tables if they do not exist yet.
///
/// The `show_seat` table is the concurrency primitive for seat sales: one row
/// per sold seat, with the primary key on (show_id, seat_label) rejecting any
/// second sale of the same seat.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let tables = [
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT user_email_uindex UNIQUE (email)
        )",
        "CREATE TABLE IF NOT EXISTS movie (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            genre TEXT NOT NULL,
            language TEXT NOT NULL,
            release_date TEXT,
            poster_url TEXT NOT NULL DEFAULT 'no-photo.jpg',
            trailer_url TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        "CREATE TABLE IF NOT EXISTS theater (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            address TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT theater_name_uindex UNIQUE (name)
        )",
        "CREATE TABLE IF NOT EXISTS screen (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            theater_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            seat_rows INTEGER NOT NULL,
            seat_cols INTEGER NOT NULL,
            CONSTRAINT screen_theater_name_uindex UNIQUE (theater_id, name),
            CONSTRAINT screen_theater_id_fk
                FOREIGN KEY (theater_id) REFERENCES theater(id)
                ON DELETE CASCADE
        )",
        "CREATE TABLE IF NOT EXISTS show (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            movie_id INTEGER NOT NULL,
            theater_id INTEGER NOT NULL,
            screen_name TEXT NOT NULL,
            seat_rows INTEGER NOT NULL,
            seat_cols INTEGER NOT NULL,
            format TEXT NOT NULL DEFAULT '2D',
            show_date TEXT NOT NULL,
            show_time TEXT NOT NULL,
            ticket_price INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT show_screen_slot_uindex
                UNIQUE (theater_id, screen_name, show_date, show_time),
            CONSTRAINT show_movie_id_fk
                FOREIGN KEY (movie_id) REFERENCES movie(id)
                ON DELETE CASCADE,
            CONSTRAINT show_theater_id_fk
                FOREIGN KEY (theater_id) REFERENCES theater(id)
                ON DELETE CASCADE
        )",
        "CREATE TABLE IF NOT EXISTS show_seat (
            show_id INTEGER NOT NULL,
            seat_label TEXT NOT NULL,
            PRIMARY KEY (show_id, seat_label),
            CONSTRAINT show_seat_show_id_fk
                FOREIGN KEY (show_id) REFERENCES show(id)
                ON DELETE CASCADE
        )",
        "CREATE TABLE IF NOT EXISTS booking (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            show_id INTEGER NOT NULL,
            seats TEXT NOT NULL,
            total_amount INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'confirmed',
            payment_ref TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT booking_payment_ref_uindex UNIQUE (payment_ref),
            CONSTRAINT booking_user_id_fk
                FOREIGN KEY (user_id) REFERENCES user(id),
            CONSTRAINT booking_show_id_fk
                FOREIGN KEY (show_id) REFERENCES show(id)
        )",
    ];

    for create_sql in tables {
        sqlx::query(create_sql).execute(pool).await?;
    }

    Ok(())
}
