// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ApiError, ListQuery};
use crate::app_state::AppState;
use crate::inventory::repository::ItemUpdate;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let items = state.items.list(query.search.as_deref(), query.skip);
    Ok(HttpResponse::Ok().json(items))
}

pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let item = state
        .items
        .get(&path)
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;
    Ok(HttpResponse::Ok().json(item))
}

pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<NewItem>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let item = state.items.create(body.name, body.description)?;
    log::info!("created item '{}' ({})", item.name, item.id);
    Ok(HttpResponse::Created().json(item))
}

pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ItemChanges>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let item = state.items.update(
        &path,
        ItemUpdate {
            name: body.name,
            description: body.description,
            amount: body.amount,
        },
    )?;
    log::info!("updated item '{}' ({})", item.name, item.id);
    Ok(HttpResponse::Ok().json(item))
}

/// Item deletion runs through the lifecycle manager so the tag bound to the
/// item (if any) is released.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.lifecycle.delete_item(&path)?;
    Ok(HttpResponse::NoContent().finish())
}
