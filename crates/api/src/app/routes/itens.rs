use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::post};

use chamados_infra::{Db, store::catalogo};

use crate::app::dto::{self, campo_obrigatorio};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/", post(criar).get(listar))
}

pub async fn criar(
    Extension(db): Extension<Db>,
    Json(body): Json<dto::CriarItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = catalogo::criar_item(
        &db.pool,
        &catalogo::NovoItem {
            descricao: campo_obrigatorio(body.descricao, "descricao")?,
            marca: body.marca,
            modelo: body.modelo,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn listar(Extension(db): Extension<Db>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(catalogo::listar_itens(&db.pool).await?))
}
