//! Ticket routes: open, list, detail, update.

use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use chamados_core::{DomainError, NovoChamado, Perfil};
use chamados_infra::{
    Db,
    store::chamados::{self, AtualizaChamado, Visibilidade},
};

use crate::app::dto::{self, campo_obrigatorio};
use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(abrir).get(listar))
        .route("/:id", get(detalhar).patch(atualizar))
}

pub async fn abrir(
    Extension(db): Extension<Db>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::AbrirChamadoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let motivo = campo_obrigatorio(body.motivo, "motivo")?;
    // the requester is always the token holder, never a body field
    let novo = NovoChamado::new(principal.usuario_id(), motivo, body.equipamentos_ids)?;

    let id = chamados::abrir(&db.pool, &novo, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

pub async fn listar(
    Extension(db): Extension<Db>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    let visibilidade = match principal.perfil() {
        Perfil::Admin | Perfil::Tecnico => Visibilidade::Todos,
        Perfil::Usuario => Visibilidade::DoSolicitante(principal.usuario_id()),
    };
    let resumos = chamados::listar(&db.pool, visibilidade).await?;
    Ok(Json(resumos))
}

pub async fn detalhar(
    Extension(db): Extension<Db>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let detalhe = chamados::detalhar(&db.pool, id)
        .await?
        .ok_or(DomainError::NotFound)?;

    if principal.perfil() == Perfil::Usuario
        && detalhe.cabecalho.solicitante_id != principal.usuario_id()
    {
        return Err(DomainError::forbidden("você não pode acessar este chamado").into());
    }

    Ok(Json(detalhe))
}

pub async fn atualizar(
    Extension(db): Extension<Db>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<i64>,
    Json(body): Json<dto::AtualizarChamadoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let atualiza = AtualizaChamado {
        status: campo_obrigatorio(body.status, "status")?,
        descricao_execucao: body.descricao_execucao,
    };

    let chamado = chamados::atualizar(&db.pool, id, &atualiza, principal.usuario_id(), Utc::now())
        .await?
        .ok_or(DomainError::NotFound)?;

    Ok(Json(chamado))
}
