use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use chamados_auth::{Acesso, AcessoNegado, Hs256Tokens, autorizar};

use crate::{app::errors::ApiError, authz, context::PrincipalContext};

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<Hs256Tokens>,
}

/// Applied to every route. Looks up the access requirement in the policy
/// table, verifies the bearer token when one is required, and attaches the
/// resulting [`PrincipalContext`] as a request extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let acesso = authz::acesso_para(req.method().as_str(), req.uri().path());
    if acesso == Acesso::Publico {
        return Ok(next.run(req).await);
    }

    let claims = match extract_bearer(req.headers()) {
        Some(token) => Some(
            state
                .tokens
                .verificar(token)
                .map_err(|_| ApiError::Auth("token inválido ou expirado"))?,
        ),
        None => None,
    };

    autorizar(acesso, claims.as_ref()).map_err(|negado| match negado {
        AcessoNegado::NaoAutenticado => ApiError::Auth("token de autenticação ausente"),
        AcessoNegado::Proibido => {
            ApiError::Domain(chamados_core::DomainError::forbidden(
                "seu perfil não tem permissão para esta operação",
            ))
        }
    })?;

    if let Some(claims) = &claims {
        req.extensions_mut()
            .insert(PrincipalContext::from_claims(claims));
    }

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
