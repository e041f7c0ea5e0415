//! User role (perfil) used for access decisions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Role of an authenticated user.
///
/// The set is closed: every route-gating decision in the system is expressed
/// in terms of these three roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perfil {
    Admin,
    Tecnico,
    Usuario,
}

impl Perfil {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perfil::Admin => "admin",
            Perfil::Tecnico => "tecnico",
            Perfil::Usuario => "usuario",
        }
    }
}

impl core::fmt::Display for Perfil {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Perfil {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Perfil {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Perfil::Admin),
            "tecnico" => Ok(Perfil::Tecnico),
            "usuario" => Ok(Perfil::Usuario),
            other => Err(DomainError::validation(format!(
                "perfil inválido: '{other}' (esperado admin, tecnico ou usuario)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("admin".parse::<Perfil>().unwrap(), Perfil::Admin);
        assert_eq!("tecnico".parse::<Perfil>().unwrap(), Perfil::Tecnico);
        assert_eq!("usuario".parse::<Perfil>().unwrap(), Perfil::Usuario);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(matches!(
            "gerente".parse::<Perfil>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Perfil::Tecnico).unwrap();
        assert_eq!(json, "\"tecnico\"");
        let back: Perfil = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(back, Perfil::Admin);
    }
}
