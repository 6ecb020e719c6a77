//! Request identity plumbing.
//!
//! Token issuance lives outside this service. The REST layer only consumes
//! identity: a middleware resolves the `Authorization: Bearer <token>` header
//! through an [`IdentityProvider`] and attaches a typed [`AuthUser`] to the
//! request. Handlers never see unauthenticated requests.

use anyhow::Result;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::AppContext;

/// The authenticated caller, inserted as a request extension by
/// [`require_user`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Boundary to the external auth system: maps a bearer token to a user id.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Static token registry backed by `{data_dir}/tokens.toml`:
///
/// ```toml
/// [tokens]
/// "a1b2c3" = "user-1"
/// ```
///
/// The file must be provisioned out of band and kept secret; it is the only
/// credential protecting the HTTP port.
pub struct TokenMap {
    tokens: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: HashMap<String, String>,
}

impl TokenMap {
    /// Read the token registry. A missing file yields an empty map (every
    /// request is rejected 401), which is logged once at startup.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("tokens.toml");
        let tokens = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str::<TokenFile>(&contents)?.tokens,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "no token registry at {} — all requests will be rejected",
                    path.display()
                );
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { tokens })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: pairs.into_iter().collect(),
        }
    }
}

impl IdentityProvider for TokenMap {
    fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// Strip the `Bearer ` prefix from an authorization header value.
fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

/// Middleware guarding the task routes. Resolves the caller or rejects 401
/// before any handler runs.
pub async fn require_user(
    State(ctx): State<Arc<AppContext>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    let user_id = token.and_then(|t| ctx.identity.resolve(t));
    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(AuthUser { user_id });
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
            .into_response(),
    }
}
