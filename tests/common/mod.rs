// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, web};
use std::sync::Arc;
use stockroom::api;
use stockroom::app_state::AppState;
use stockroom::auth::{ADMIN_ROLE, BearerAuthMiddlewareFactory, TokenService};
use stockroom::bootstrap;
use stockroom::config::ValidatedConfig;
use tempfile::TempDir;

pub const ADMIN_SUBJECT: &str = "admin@example.com";
pub const MEMBER_SUBJECT: &str = "member@example.com";

pub struct TestHarness {
    pub fixture: TempDir,
    pub config: Arc<ValidatedConfig>,
    pub app_state: web::Data<AppState>,
    pub token_service: web::Data<TokenService>,
    pub admin_token: String,
    pub member_token: String,
}

impl TestHarness {
    pub fn new() -> Self {
        let fixture = tempfile::tempdir().expect("fixture root");
        let bootstrap = bootstrap::bootstrap_runtime(fixture.path()).expect("bootstrap");
        let config = Arc::new(bootstrap.validated_config);
        let app_state =
            web::Data::new(AppState::open(&bootstrap.runtime_paths).expect("app state"));
        let token_service = TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_minutes,
        );
        let admin_token = token_service
            .issue(ADMIN_SUBJECT, &[ADMIN_ROLE.to_string()])
            .expect("admin token");
        let member_token = token_service
            .issue(MEMBER_SUBJECT, &[])
            .expect("member token");

        Self {
            fixture,
            config,
            app_state,
            token_service: web::Data::new(token_service),
            admin_token,
            member_token,
        }
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(harness.app_state.clone())
        .app_data(harness.token_service.clone())
        .wrap(BearerAuthMiddlewareFactory)
        .configure(api::configure)
}

pub fn bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}
