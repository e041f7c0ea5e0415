//! Registration and login.

use std::sync::Arc;

use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use chamados_auth::{Claims, Hs256Tokens, gerar_hash_senha, verificar_senha};
use chamados_core::Perfil;
use chamados_infra::{Db, store::usuarios};

use crate::app::dto::{self, campo_obrigatorio};
use crate::app::errors::ApiError;

/// Same 401 body for unknown email and wrong password, so responses don't
/// reveal which emails are registered.
const LOGIN_INVALIDO: &str = "Email ou senha inválidos";

pub async fn registrar(
    Extension(db): Extension<Db>,
    Json(body): Json<dto::CriarUsuarioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let nome = campo_obrigatorio(body.nome, "nome")?;
    let email = campo_obrigatorio(body.email, "email")?;
    let senha = campo_obrigatorio(body.senha, "senha")?;
    let perfil: Perfil = campo_obrigatorio(body.perfil, "perfil")?.parse()?;

    let senha_hash = gerar_hash_senha(&senha)?;
    let usuario = usuarios::criar(
        &db.pool,
        &usuarios::NovoUsuario {
            nome,
            email,
            senha_hash,
            perfil,
        },
    )
    .await?;

    tracing::info!(usuario_id = usuario.id, "usuário cadastrado");
    Ok((StatusCode::CREATED, Json(usuario)))
}

pub async fn login(
    Extension(db): Extension<Db>,
    Extension(tokens): Extension<Arc<Hs256Tokens>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = campo_obrigatorio(body.email, "email")?;
    let senha = campo_obrigatorio(body.senha, "senha")?;

    let Some(credenciais) = usuarios::buscar_credenciais(&db.pool, &email).await? else {
        return Err(ApiError::Auth(LOGIN_INVALIDO));
    };

    if !verificar_senha(&senha, &credenciais.senha_hash)? {
        return Err(ApiError::Auth(LOGIN_INVALIDO));
    }

    let claims = Claims::emitir(credenciais.id, credenciais.perfil, Utc::now());
    let token = tokens.emitir(&claims)?;

    Ok(Json(serde_json::json!({
        "token": token,
        "usuario": {
            "id": credenciais.id,
            "nome": credenciais.nome,
            "email": credenciais.email,
            "perfil": credenciais.perfil,
        },
    })))
}
