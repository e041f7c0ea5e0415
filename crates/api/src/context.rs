use chamados_auth::Claims;
use chamados_core::Perfil;

/// Verified identity of the current request.
///
/// Built by the auth middleware from validated token claims and attached as
/// a request extension; handlers never look at the token themselves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    usuario_id: i64,
    perfil: Perfil,
}

impl PrincipalContext {
    pub fn new(usuario_id: i64, perfil: Perfil) -> Self {
        Self { usuario_id, perfil }
    }

    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.perfil)
    }

    pub fn usuario_id(&self) -> i64 {
        self.usuario_id
    }

    pub fn perfil(&self) -> Perfil {
        self.perfil
    }
}
