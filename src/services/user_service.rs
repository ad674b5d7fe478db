use crate::models::user::{
    Role, User, UserLoginRequest, UserLoginResponse, UserRegistrationRequest, UserResponse,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        UserService { pool }
    }

    // Register a new user; everyone registers as a regular user
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<i64> {
        let existing_user: Option<i64> = sqlx::query_scalar("SELECT id FROM user WHERE email = ?")
            .bind(&request.email)
            .fetch_optional(&self.pool)
            .await?;

        if existing_user.is_some() {
            return Err(AppError::Conflict("This email is already registered".into()));
        }

        // Hash password
        let hashed_password = hash(request.password.as_bytes(), DEFAULT_COST)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO user (name, email, password, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&hashed_password)
        .bind(Role::User)
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    // Login user
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<UserLoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role FROM user WHERE email = ?",
        )
        .bind(&request.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials".into()))?;

        // Verify password
        let password_matches = verify(request.password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        // Generate JWT token
        let token = jwt::generate_token(user.id, user.role)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        Ok(UserLoginResponse {
            token,
            user_id: user.id,
            name: user.name,
            role: user.role,
        })
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let row: Option<(i64, String, String, Role, NaiveDateTime)> = sqlx::query_as(
            "SELECT id, name, email, role, created_at FROM user WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (id, name, email, role, created_at) = row
            .ok_or_else(|| AppError::NotFound(format!("User not found with id of {}", user_id)))?;

        Ok(UserResponse {
            user_id: id,
            name,
            email,
            role,
            created_at,
        })
    }

    /// Promotes a user to admin. Intended for operational bootstrap, not
    /// exposed over HTTP.
    pub async fn promote_to_admin(&self, user_id: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE user SET role = ? WHERE id = ?")
            .bind(Role::Admin)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User not found with id of {}",
                user_id
            )));
        }

        Ok(())
    }
}
