//! `chamados-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod chamado;
pub mod error;
pub mod perfil;

pub use chamado::{NovoChamado, STATUS_ABERTO, STATUS_CANCELADO, STATUS_CONCLUIDO, status_terminal};
pub use error::{DomainError, DomainResult};
pub use perfil::Perfil;
