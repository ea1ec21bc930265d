/// JWT Authentication Middleware
///
/// Guards a scope of routes: extracts the bearer token, resolves it
/// to a stored user, and injects that user into request extensions
/// for handlers to pick up. Requests without a resolvable user never
/// reach a handler.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;
use std::rc::Rc;

use crate::auth::resolve_user;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// JWT middleware for protecting routes
///
/// Must be applied to every scope that requires authentication.
pub struct JwtMiddleware {
    jwt_config: JwtSettings,
}

impl JwtMiddleware {
    /// Create new JWT middleware instance
    pub fn new(jwt_config: JwtSettings) -> Self {
        Self { jwt_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
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
        // Extract the bearer token from the Authorization header
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").map(|t| t.to_string()));

        let jwt_config = self.jwt_config.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let token = match bearer {
                Some(token) => token,
                None => {
                    tracing::warn!("Missing or malformed Authorization header");
                    return Err(AppError::Auth(AuthError::MissingToken).into());
                }
            };

            let pool = req
                .app_data::<web::Data<SqlitePool>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::Internal("Database pool is not configured".to_string())
                })?;

            let user = resolve_user(&pool, &token, &jwt_config).await?;

            tracing::debug!(
                user_id = %user.id,
                username = %user.username,
                "Bearer token resolved"
            );
            req.extensions_mut().insert(user);

            service.call(req).await
        })
    }
}
