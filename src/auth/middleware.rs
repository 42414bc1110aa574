use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;
use std::rc::Rc;
use uuid::Uuid;

use crate::auth::token::verify_access_token;
use crate::config::TokenConfig;
use crate::error::AppError;
use crate::models::User;

/// Request-level authentication gate for the `/api` scope.
///
/// Every request except the public auth endpoints must carry a valid
/// `Authorization: Bearer <token>` header. The token is verified, its subject
/// resolved to a user row, and the resolved [`User`] inserted into request
/// extensions for the [`CurrentUser`](crate::auth::CurrentUser) extractor.
/// This is the sole gatekeeper: no protected handler runs without it.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Skip authentication for the public auth endpoints. Logout is a
        // stateless no-op and stays public like the original API.
        let path = req.path();
        if path == "/api/auth/login"
            || path == "/api/auth/register"
            || path == "/api/auth/logout"
        {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let user = resolve_user(&req).await?;
            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}

/// Uniform rejection for every authentication failure. The caller learns
/// nothing about which check failed.
fn unauthenticated() -> AppError {
    AppError::Unauthorized("Could not validate credentials".into())
}

/// Resolves the bearer token on `req` to a user row.
///
/// Missing/malformed header, invalid token, unparseable subject, and a
/// subject with no matching user (account removed after issuance) all reject
/// with the same 401.
async fn resolve_user(req: &ServiceRequest) -> Result<User, AppError> {
    let config = req
        .app_data::<web::Data<TokenConfig>>()
        .ok_or_else(|| AppError::Internal("TokenConfig not configured on app".into()))?;
    let pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or_else(|| AppError::Internal("PgPool not configured on app".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(unauthenticated)?;

    let claims = verify_access_token(token, config.get_ref()).ok_or_else(unauthenticated)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| unauthenticated())?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, name, password_hash, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool.get_ref())
    .await?;

    user.ok_or_else(unauthenticated)
}
