// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ApiError, ListQuery};
use crate::app_state::AppState;
use crate::inventory::TagTransition;
use actix_web::{HttpResponse, web};

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let tags = state.tags.list(query.search.as_deref(), query.skip);
    Ok(HttpResponse::Ok().json(tags))
}

pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let tag = state
        .tags
        .get(&path)
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;
    Ok(HttpResponse::Ok().json(tag))
}

/// Physical-identifier lookup: 200 when the tag exists, 201 when this call
/// created it.
pub async fn get_by_uid(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let (tag, created) = state.lifecycle.resolve_uid(&path)?;
    if created {
        Ok(HttpResponse::Created().json(tag))
    } else {
        Ok(HttpResponse::Ok().json(tag))
    }
}

/// State transitions go through the lifecycle manager; a malformed `type`
/// never reaches it (the JSON extractor rejects it with a 400).
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TagTransition>,
) -> Result<HttpResponse, ApiError> {
    let tag = state.lifecycle.transition(&path, body.into_inner())?;
    Ok(HttpResponse::Ok().json(tag))
}

pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let removed = state.tags.delete(&path)?;
    log::info!("deleted tag '{}' (uid '{}')", removed.id, removed.uid);
    Ok(HttpResponse::NoContent().finish())
}
