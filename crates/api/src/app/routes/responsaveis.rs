use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::post};

use chamados_infra::{Db, store::catalogo};

use crate::app::dto::{self, campo_obrigatorio};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/", post(criar).get(listar))
}

pub async fn criar(
    Extension(db): Extension<Db>,
    Json(body): Json<dto::CriarResponsavelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let nome = campo_obrigatorio(body.nome, "nome")?;
    let responsavel = catalogo::criar_responsavel(&db.pool, &nome).await?;
    Ok((StatusCode::CREATED, Json(responsavel)))
}

pub async fn listar(Extension(db): Extension<Db>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(catalogo::listar_responsaveis(&db.pool).await?))
}
