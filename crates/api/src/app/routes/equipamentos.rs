use axum::{Extension, Json, Router, http::StatusCode, response::IntoResponse, routing::post};

use chamados_infra::{Db, store::catalogo};

use crate::app::dto::{self, campo_obrigatorio, id_obrigatorio};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/", post(criar).get(listar))
}

pub async fn criar(
    Extension(db): Extension<Db>,
    Json(body): Json<dto::CriarEquipamentoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let equipamento = catalogo::criar_equipamento(
        &db.pool,
        &catalogo::NovoEquipamento {
            descricao: campo_obrigatorio(body.descricao, "descricao")?,
            item_id: id_obrigatorio(body.item_id, "item_id")?,
            sala_id: id_obrigatorio(body.sala_id, "sala_id")?,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(equipamento)))
}

pub async fn listar(Extension(db): Extension<Db>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(catalogo::listar_equipamentos(&db.pool).await?))
}
