// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod devices;
pub mod items;
pub mod tags;

use crate::auth::RequireRole;
use crate::inventory::LifecycleError;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Validation(msg) | StoreError::Duplicate(msg) => ApiError::BadRequest(msg),
            StoreError::File(msg) | StoreError::Parse(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(msg) => ApiError::NotFound(msg),
            LifecycleError::Validation(msg) => ApiError::BadRequest(msg),
            LifecycleError::Store(store_err) => ApiError::from(store_err),
        }
    }
}

/// Query string accepted by every list endpoint. A negative `skip` fails
/// extraction and comes back as a 400.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub search: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Device self-service paths sit outside the admin-gated scope and are
    // registered first so they win over /devices/{id} routes.
    cfg.service(
        web::resource("/devices/register")
            .wrap(RequireRole::authenticated())
            .route(web::post().to(devices::register)),
    )
    .service(
        web::resource("/devices/{id}/report")
            .wrap(RequireRole::authenticated())
            .route(web::put().to(devices::report)),
    )
    .service(
        web::scope("/devices")
            .wrap(RequireRole::admin())
            .route("", web::get().to(devices::list))
            .route("/{id}", web::get().to(devices::get))
            .route("/{id}", web::put().to(devices::update))
            .route("/{id}", web::delete().to(devices::delete)),
    )
    .service(
        web::scope("/items")
            .wrap(RequireRole::authenticated())
            .route("", web::get().to(items::list))
            .route("", web::post().to(items::create))
            .route("/{id}", web::get().to(items::get))
            .route("/{id}", web::put().to(items::update))
            .route("/{id}", web::delete().to(items::delete)),
    )
    .service(
        web::scope("/tags")
            .wrap(RequireRole::authenticated())
            .route("/uid/{uid}", web::get().to(tags::get_by_uid))
            .route("", web::get().to(tags::list))
            .route("/{id}", web::get().to(tags::get))
            .route("/{id}", web::put().to(tags::update))
            .route("/{id}", web::delete().to(tags::delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_codes() {
        let not_found = ApiError::from(StoreError::NotFound("gone".to_string()));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let validation = ApiError::from(StoreError::Validation("bad".to_string()));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let duplicate = ApiError::from(StoreError::Duplicate("dup".to_string()));
        assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);

        let io = ApiError::from(StoreError::File("disk".to_string()));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").expect("parse query");
        assert_eq!(query.skip, 0);
        assert!(query.search.is_none());
    }
}
