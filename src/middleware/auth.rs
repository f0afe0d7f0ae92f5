use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::MongoDB;
use crate::services::auth_service;
use crate::utils::error::AppError;

/// Authenticated caller, resolved from the bearer token and attached to the
/// request extensions for downstream handlers (`web::ReqData<AuthUser>`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Bearer-token gate wrapped around the `/api` scope.
///
/// Reads (all GETs) plus register/login stay public; every other request
/// must carry `Authorization: Bearer <token>`. A missing or malformed
/// header yields 401; a bad signature, expired token, or deleted user
/// yields 403. On success the claimed id is resolved to a live user record
/// (one extra document lookup per protected request).
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
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
        // Public surface: reads, CORS preflight, and the two auth entry
        // points themselves.
        let public = req.method() == Method::GET
            || req.method() == Method::OPTIONS
            || req.path() == "/api/register"
            || req.path() == "/api/login";

        if public {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let header = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let token = match header {
                Some(header_str) if header_str.starts_with("Bearer ") => {
                    header_str[7..].to_string()
                }
                _ => {
                    log::warn!("❌ {} {} - no bearer token", req.method(), req.path());
                    return Err(AppError::Unauthorized(
                        "Access denied: no token provided".to_string(),
                    )
                    .into());
                }
            };

            let claims = match auth_service::verify_token(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::warn!("❌ {} {} - {}", req.method(), req.path(), e);
                    return Err(e.into());
                }
            };

            let db = req
                .app_data::<web::Data<MongoDB>>()
                .ok_or_else(|| {
                    Error::from(AppError::Internal("Database handle missing".to_string()))
                })?
                .clone();

            // The token may outlive the account: resolve the claim to a live
            // user before letting the request through.
            let user = match auth_service::get_user_info(&db, &claims.id).await {
                Ok(user) => user,
                Err(AppError::DatabaseError(msg)) => {
                    return Err(AppError::DatabaseError(msg).into());
                }
                Err(_) => {
                    log::warn!("❌ Token for unknown user: {}", claims.id);
                    return Err(AppError::Forbidden(
                        "Invalid or expired access token".to_string(),
                    )
                    .into());
                }
            };

            req.extensions_mut().insert(AuthUser {
                id: user.id,
                username: user.username,
                email: user.email,
            });

            service.call(req).await
        })
    }
}
