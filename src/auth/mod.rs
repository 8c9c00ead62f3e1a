// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod middleware;

pub use middleware::{AuthRequest, BearerAuthMiddlewareFactory, RequireRole};

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use uuid::Uuid;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug)]
pub enum AuthError {
    TokenCreation(String),
    TokenInvalid(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::TokenCreation(msg) => write!(f, "Failed to create token: {}", msg),
            AuthError::TokenInvalid(msg) => write!(f, "Invalid token: {}", msg),
        }
    }
}

impl Error for AuthError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// The authenticated caller, as placed into request extensions by the
/// bearer middleware.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.roles,
        }
    }
}

/// Issues and verifies HS256 bearer tokens with the shared secret from the
/// config. Tokens are minted out-of-band (operations tooling, device
/// provisioning); the server itself only verifies.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_minutes: u64,
}

impl TokenService {
    pub fn new(secret: &str, token_ttl_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_minutes,
        }
    }

    pub fn issue(&self, subject: &str, roles: &[String]) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.token_ttl_minutes as i64)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|err| AuthError::TokenInvalid(err.to_string()))
    }
}
