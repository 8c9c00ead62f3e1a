// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ADMIN_ROLE, Claims, Principal, TokenService};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::web::Data;
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse, body::EitherBody, http::header};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

/// Trait to add authentication methods to HttpRequest
pub trait AuthRequest {
    fn principal(&self) -> Option<Principal>;
    fn has_role(&self, role: &str) -> bool;
    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn principal(&self) -> Option<Principal> {
        self.extensions().get::<Principal>().cloned()
    }

    fn has_role(&self, role: &str) -> bool {
        self.principal()
            .map(|principal| principal.has_role(role))
            .unwrap_or(false)
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Principal>().is_some()
    }
}

/// Decodes the `Authorization: Bearer` header and attaches the caller's
/// [`Principal`] to the request. Never rejects by itself; route gating is
/// [`RequireRole`]'s job.
pub struct BearerAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for BearerAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token_service) = req.app_data::<Data<TokenService>>() {
            if let Some(token) = bearer_token(req.request()) {
                match token_service.verify(token) {
                    Ok(claims) => {
                        req.extensions_mut().insert::<Claims>(claims.clone());
                        req.extensions_mut().insert(Principal::from(claims));
                    }
                    Err(err) => {
                        log::debug!("rejected bearer token: {}", err);
                    }
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Scope middleware gating access: 401 when no valid credential was
/// presented, 403 when a required role is missing.
pub struct RequireRole {
    role: Option<&'static str>,
}

impl RequireRole {
    pub fn authenticated() -> Self {
        Self { role: None }
    }

    pub fn admin() -> Self {
        Self {
            role: Some(ADMIN_ROLE),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service,
            role: self.role,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: S,
    role: Option<&'static str>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !req.request().is_authenticated() {
            let (req, _) = req.into_parts();
            let response = HttpResponse::Unauthorized()
                .json(json!({"error": "authentication required"}))
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
        }

        if let Some(role) = self.role {
            if !req.request().has_role(role) {
                let (req, _) = req.into_parts();
                let response = HttpResponse::Forbidden()
                    .json(json!({"error": format!("{} role required", role)}))
                    .map_into_right_body();
                return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
