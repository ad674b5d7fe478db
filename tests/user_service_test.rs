use cinema_booking_system::models::user::{Role, UserLoginRequest, UserRegistrationRequest};
use cinema_booking_system::services::user_service::UserService;
use cinema_booking_system::utils::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::TestDb;

struct UserServiceContext {
    #[allow(dead_code)]
    pool: SqlitePool,
    user_service: UserService,
}

#[async_trait]
impl AsyncTestContext for UserServiceContext {
    async fn setup() -> Self {
        // Token generation reads the secret from the environment
        std::env::set_var("JWT_SECRET", "test_secret");

        let pool = TestDb::get_instance()
            .await
            .expect("Failed to get test database instance");

        let user_service = UserService::new(pool.clone());

        UserServiceContext { pool, user_service }
    }
}

fn registration(name: &str, email: &str) -> UserRegistrationRequest {
    UserRegistrationRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "test_password".to_string(),
    }
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_register_and_login(ctx: &UserServiceContext) -> Result<(), AppError> {
    let user_id = ctx
        .user_service
        .register_user(registration("Asha", "asha@example.com"))
        .await?;

    let response = ctx
        .user_service
        .login_user(UserLoginRequest {
            email: "asha@example.com".to_string(),
            password: "test_password".to_string(),
        })
        .await?;

    assert_eq!(response.user_id, user_id);
    assert_eq!(response.name, "Asha");
    assert_eq!(response.role, Role::User);
    assert!(!response.token.is_empty());

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_login_rejects_wrong_password(ctx: &UserServiceContext) -> Result<(), AppError> {
    ctx.user_service
        .register_user(registration("Asha", "asha@example.com"))
        .await?;

    let result = ctx
        .user_service
        .login_user(UserLoginRequest {
            email: "asha@example.com".to_string(),
            password: "wrong_password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::AuthError(_))));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_login_rejects_unknown_email(ctx: &UserServiceContext) -> Result<(), AppError> {
    let result = ctx
        .user_service
        .login_user(UserLoginRequest {
            email: "nobody@example.com".to_string(),
            password: "test_password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::AuthError(_))));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_register_rejects_duplicate_email(ctx: &UserServiceContext) -> Result<(), AppError> {
    ctx.user_service
        .register_user(registration("Asha", "asha@example.com"))
        .await?;

    let result = ctx
        .user_service
        .register_user(registration("Another Asha", "asha@example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_get_user_profile(ctx: &UserServiceContext) -> Result<(), AppError> {
    let user_id = ctx
        .user_service
        .register_user(registration("Asha", "asha@example.com"))
        .await?;

    let profile = ctx.user_service.get_user(user_id).await?;
    assert_eq!(profile.user_id, user_id);
    assert_eq!(profile.email, "asha@example.com");
    assert_eq!(profile.role, Role::User);

    let result = ctx.user_service.get_user(9999).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_promote_to_admin(ctx: &UserServiceContext) -> Result<(), AppError> {
    let user_id = ctx
        .user_service
        .register_user(registration("Asha", "asha@example.com"))
        .await?;

    ctx.user_service.promote_to_admin(user_id).await?;

    let response = ctx
        .user_service
        .login_user(UserLoginRequest {
            email: "asha@example.com".to_string(),
            password: "test_password".to_string(),
        })
        .await?;

    assert_eq!(response.role, Role::Admin);

    Ok(())
}
