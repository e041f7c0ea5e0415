//! Role-gate decision, kept pure (no IO, no HTTP types).
//!
//! The API layer owns the route → requirement table; this module only decides
//! whether a given set of verified claims satisfies a requirement, keeping
//! the two failure kinds distinct so the transport can map them to 401/403.

use thiserror::Error;

use chamados_core::Perfil;

use crate::claims::Claims;

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acesso {
    /// No token required.
    Publico,
    /// Any authenticated identity.
    Autenticado,
    /// Authenticated and holding one of the listed roles.
    Perfis(&'static [Perfil]),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcessoNegado {
    /// No (valid) token presented.
    #[error("não autenticado")]
    NaoAutenticado,

    /// Valid identity, insufficient role.
    #[error("perfil sem permissão")]
    Proibido,
}

/// Decide whether `claims` satisfy `acesso`.
pub fn autorizar(acesso: Acesso, claims: Option<&Claims>) -> Result<(), AcessoNegado> {
    match acesso {
        Acesso::Publico => Ok(()),
        Acesso::Autenticado => match claims {
            Some(_) => Ok(()),
            None => Err(AcessoNegado::NaoAutenticado),
        },
        Acesso::Perfis(perfis) => {
            let claims = claims.ok_or(AcessoNegado::NaoAutenticado)?;
            if perfis.contains(&claims.perfil) {
                Ok(())
            } else {
                Err(AcessoNegado::Proibido)
            }
        }
    }
}
