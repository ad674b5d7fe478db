use crate::models::user::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use rocket_okapi::request::OpenApiFromRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,     // user_id
    pub role: String, // "user" | "admin"
    pub exp: usize,
}

#[derive(Debug, OpenApiFromRequest)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

/// Request guard that additionally requires the admin role.
#[derive(Debug, OpenApiFromRequest)]
pub struct AdminUser {
    pub user_id: i64,
}

pub fn generate_token(user_id: i64, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        // Set expiration time to 24 hours
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: expiration,
    };

    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_claims(request: &Request<'_>) -> Option<Claims> {
    let token = match request.headers().get_one("Authorization") {
        Some(token) if token.starts_with("Bearer ") => token[7..].to_string(),
        _ => return None,
    };

    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    decode::<Claims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let claims = match decode_claims(request) {
            Some(claims) => claims,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let role = match Role::from_str(&claims.role) {
            Ok(role) => role,
            Err(_) => return Outcome::Error((Status::Unauthorized, ())),
        };

        Outcome::Success(AuthenticatedUser {
            user_id: claims.sub,
            role,
        })
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let claims = match decode_claims(request) {
            Some(claims) => claims,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        match Role::from_str(&claims.role) {
            Ok(Role::Admin) => Outcome::Success(AdminUser {
                user_id: claims.sub,
            }),
            _ => Outcome::Error((Status::Forbidden, ())),
        }
    }
}
