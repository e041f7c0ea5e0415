//! Request bodies.
//!
//! Required text fields are modeled as `Option` so an absent field produces
//! the same validation error as an empty one, instead of a serde rejection.

use serde::Deserialize;

use chamados_core::DomainError;

use crate::app::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct CriarUsuarioRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub perfil: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AbrirChamadoRequest {
    pub motivo: Option<String>,
    #[serde(default)]
    pub equipamentos_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AtualizarChamadoRequest {
    pub status: Option<String>,
    pub descricao_execucao: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CriarItemRequest {
    pub descricao: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CriarResponsavelRequest {
    pub nome: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CriarSalaRequest {
    pub descricao: Option<String>,
    pub responsavel_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CriarEquipamentoRequest {
    pub descricao: Option<String>,
    pub item_id: Option<i64>,
    pub sala_id: Option<i64>,
}

/// Unwrap a required text field, rejecting absence and blank values alike.
pub(crate) fn campo_obrigatorio(valor: Option<String>, nome: &str) -> Result<String, ApiError> {
    match valor {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("o campo {nome} é obrigatório")).into()),
    }
}

/// Unwrap a required id field.
pub(crate) fn id_obrigatorio(valor: Option<i64>, nome: &str) -> Result<i64, ApiError> {
    valor.ok_or_else(|| DomainError::validation(format!("o campo {nome} é obrigatório")).into())
}
