//! Ticket (chamado) lifecycle rules.
//!
//! Status is deliberately free text (callers may record intermediate states
//! like "Aguardando peça"); the domain only cares about the default initial
//! status and the two terminal values that close a ticket.

use crate::error::{DomainError, DomainResult};

/// Status assigned to every freshly opened ticket.
pub const STATUS_ABERTO: &str = "Aberto";

/// Terminal status: work finished.
pub const STATUS_CONCLUIDO: &str = "Concluído";

/// Terminal status: ticket abandoned.
pub const STATUS_CANCELADO: &str = "Cancelado";

/// Whether a status value closes the ticket.
///
/// Terminal statuses stamp `data_conclusao` exactly once; every other value
/// leaves it untouched.
pub fn status_terminal(status: &str) -> bool {
    status == STATUS_CONCLUIDO || status == STATUS_CANCELADO
}

/// Validated input for opening a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoChamado {
    pub solicitante_id: i64,
    pub motivo: String,
    pub equipamentos_ids: Vec<i64>,
}

impl NovoChamado {
    /// Build a new-ticket request, enforcing the creation invariants:
    /// non-empty motivo and at least one equipment reference.
    pub fn new(
        solicitante_id: i64,
        motivo: impl Into<String>,
        equipamentos_ids: Vec<i64>,
    ) -> DomainResult<Self> {
        let motivo = motivo.into();
        if motivo.trim().is_empty() {
            return Err(DomainError::validation("motivo é obrigatório"));
        }
        if equipamentos_ids.is_empty() {
            return Err(DomainError::validation(
                "equipamentos_ids deve conter pelo menos um equipamento",
            ));
        }
        Ok(Self {
            solicitante_id,
            motivo,
            equipamentos_ids,
        })
    }
}
