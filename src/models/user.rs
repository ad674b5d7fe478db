use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserRegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserLoginResponse {
    pub token: String,
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize, JsonSchema)]
#[schemars(example = "RegisterResponse::example")]
pub struct RegisterResponse {
    #[schemars(title = "User ID")]
    pub user_id: i64,

    #[schemars(title = "Register Status")]
    pub status: String,
}

impl RegisterResponse {
    pub fn example() -> Self {
        Self {
            user_id: 123,
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}
