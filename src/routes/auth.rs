use crate::{
    auth::{
        hash_password, issue_access_token, verify_password, CurrentUser, LoginRequest,
        RegisterRequest, TokenResponse,
    },
    config::TokenConfig,
    error::AppError,
    models::{User, UserProfile},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its public profile. The password
/// is hashed before it touches the store; the hash is never returned.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if email already exists
    let existing_user: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&register_data.email)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    let user = User::new(
        register_data.email.clone(),
        register_data.name.clone(),
        password_hash,
    );

    sqlx::query(
        "INSERT INTO users (id, email, name, password_hash, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}

/// Login user
///
/// Authenticates a user by email and password and returns a token pair.
/// An unknown email and a wrong password produce the same 401, so the
/// response does not reveal whether an email is registered.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    token_config: web::Data<TokenConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, name, password_hash, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized("Incorrect email or password".into())),
    };

    let access_token = issue_access_token(user.id, &user.email, token_config.get_ref())?;
    // No distinct refresh semantics exist; see TokenResponse.
    let refresh_token = issue_access_token(user.id, &user.email, token_config.get_ref())?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        token_type: "bearer".to_string(),
    }))
}

/// Get the authenticated user's profile
#[get("/me")]
pub async fn me(current_user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(UserProfile::from(&current_user.0)))
}

/// Logout
///
/// Tokens are stateless and there is no server-side revocation, so this is a
/// no-op the client pairs with discarding its stored tokens.
#[post("/logout")]
pub async fn logout() -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Logged out successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    #[actix_rt::test]
    async fn test_logout_is_a_public_no_op() {
        let app = actix_test::init_service(actix_web::App::new().service(logout)).await;

        let req = actix_test::TestRequest::post().uri("/logout").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "Logged out successfully");
    }

    #[test]
    fn test_register_payload_shapes() {
        // name is optional in the wire format
        let with_name: RegisterRequest = serde_json::from_value(json!({
            "email": "alice@example.com",
            "password": "pw123",
            "name": "Alice"
        }))
        .unwrap();
        assert_eq!(with_name.name.as_deref(), Some("Alice"));

        let without_name: RegisterRequest = serde_json::from_value(json!({
            "email": "alice@example.com",
            "password": "pw123"
        }))
        .unwrap();
        assert!(without_name.name.is_none());
    }
}
