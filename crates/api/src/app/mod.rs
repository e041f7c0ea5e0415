//! HTTP application wiring (Axum router + shared state).
//!
//! Layout:
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response bodies and field validation helpers
//! - `errors.rs`: error → HTTP response mapping

use std::sync::Arc;

use axum::{Extension, Router};

use chamados_auth::Hs256Tokens;
use chamados_infra::Db;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// The auth middleware wraps every route; the policy table decides which
/// ones are public.
pub fn build_app(db: Db, jwt_secret: &[u8]) -> Router {
    let tokens = Arc::new(Hs256Tokens::new(jwt_secret));
    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
    };

    routes::router()
        .layer(Extension(db))
        .layer(Extension(tokens))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}
