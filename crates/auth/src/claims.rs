use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chamados_core::Perfil;

/// Fixed token validity window: 8 hours, no refresh mechanism.
pub const VALIDADE_TOKEN_SEGUNDOS: i64 = 8 * 60 * 60;

/// JWT claims model (transport-agnostic).
///
/// `iat`/`exp` are Unix-epoch seconds so the JWT library's own expiry
/// validation applies on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user id.
    pub sub: i64,

    /// Role granted to the user at login time.
    pub perfil: Perfil,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiration (Unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Claims for a token issued at `agora` with the fixed validity window.
    pub fn emitir(sub: i64, perfil: Perfil, agora: DateTime<Utc>) -> Self {
        let iat = agora.timestamp();
        Self {
            sub,
            perfil,
            iat,
            exp: iat + VALIDADE_TOKEN_SEGUNDOS,
        }
    }
}
