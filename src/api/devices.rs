// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ApiError, ListQuery};
use crate::app_state::AppState;
use crate::inventory::repository::DeviceRegistration;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AllowedUpdate {
    pub allowed: bool,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let devices = state.devices.list(query.search.as_deref(), query.skip);
    Ok(HttpResponse::Ok().json(devices))
}

pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let device = state
        .devices
        .get(&path)
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;
    Ok(HttpResponse::Ok().json(device))
}

pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AllowedUpdate>,
) -> Result<HttpResponse, ApiError> {
    let device = state.devices.set_allowed(&path, body.allowed)?;
    log::info!(
        "device '{}' allowed set to {}",
        device.device_id,
        device.allowed
    );
    Ok(HttpResponse::Ok().json(device))
}

pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let removed = state.devices.delete(&path)?;
    log::info!("deleted device '{}' ({})", removed.device_id, removed.id);
    Ok(HttpResponse::NoContent().finish())
}

/// Find-or-create on the device's own identifier; new devices start
/// disallowed until an administrator flips the gate.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let (device, created) = state.devices.register(DeviceRegistration {
        device_id: body.device_id,
        name: body.name,
        description: body.description,
        ip_address: body.ip_address,
    })?;
    if created {
        log::info!("registered device '{}' ({})", device.device_id, device.id);
        Ok(HttpResponse::Created().json(device))
    } else {
        Ok(HttpResponse::Ok().json(device))
    }
}

/// Device self-report of its identity fields.
pub async fn report(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ReportRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let device = state
        .devices
        .record_report(&path, body.serial_number, body.version)?;
    log::info!(
        "device '{}' reported serial '{}' version '{}'",
        device.device_id,
        device.serial_number.as_deref().unwrap_or("-"),
        device.version.as_deref().unwrap_or("-")
    );
    Ok(HttpResponse::Ok().json(device))
}
