use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::post};

use chamados_infra::{Db, store::catalogo};

use crate::app::dto::{self, campo_obrigatorio};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/", post(criar).get(listar))
}

pub async fn criar(
    Extension(db): Extension<Db>,
    Json(body): Json<dto::CriarSalaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sala = catalogo::criar_sala(
        &db.pool,
        &catalogo::NovaSala {
            descricao: campo_obrigatorio(body.descricao, "descricao")?,
            responsavel_id: body.responsavel_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(sala)))
}

pub async fn listar(Extension(db): Extension<Db>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(catalogo::listar_salas(&db.pool).await?))
}
