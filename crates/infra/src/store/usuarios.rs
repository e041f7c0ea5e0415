//! User rows: registration insert and credential lookup.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use chamados_core::Perfil;

use crate::error::{StoreResult, mapear_sqlx};

/// Public view of a user (hash never leaves the store).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub perfil: Perfil,
}

/// Credential row used by login only. Deliberately not `Serialize`.
#[derive(Debug, FromRow)]
pub struct Credenciais {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    #[sqlx(try_from = "String")]
    pub perfil: Perfil,
}

#[derive(Debug, Clone)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub perfil: Perfil,
}

/// Insert a user; a duplicate email surfaces as a Conflict.
pub async fn criar(pool: &SqlitePool, novo: &NovoUsuario) -> StoreResult<Usuario> {
    sqlx::query_as::<_, Usuario>(
        "INSERT INTO usuario (nome, email, senha_hash, perfil) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, nome, email, perfil",
    )
    .bind(&novo.nome)
    .bind(&novo.email)
    .bind(&novo.senha_hash)
    .bind(novo.perfil.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| mapear_sqlx(e, "este email já está cadastrado", "referência inválida"))
}

pub async fn buscar_credenciais(
    pool: &SqlitePool,
    email: &str,
) -> StoreResult<Option<Credenciais>> {
    let linha = sqlx::query_as::<_, Credenciais>(
        "SELECT id, nome, email, senha_hash, perfil FROM usuario WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(linha)
}

#[cfg(test)]
mod tests {
    use chamados_core::DomainError;

    use super::*;
    use crate::{StoreError, teste::db_temporario};

    fn novo(email: &str, perfil: Perfil) -> NovoUsuario {
        NovoUsuario {
            nome: "Ana".to_string(),
            email: email.to_string(),
            senha_hash: "$2b$10$hashfalsoapenasparateste".to_string(),
            perfil,
        }
    }

    #[tokio::test]
    async fn criar_e_buscar_credenciais() {
        let db = db_temporario().await;

        let criado = criar(&db.pool, &novo("ana@exemplo.com", Perfil::Usuario))
            .await
            .unwrap();
        assert_eq!(criado.email, "ana@exemplo.com");
        assert_eq!(criado.perfil, Perfil::Usuario);

        let cred = buscar_credenciais(&db.pool, "ana@exemplo.com")
            .await
            .unwrap()
            .expect("usuário recém-criado deve existir");
        assert_eq!(cred.id, criado.id);
        assert_eq!(cred.senha_hash, "$2b$10$hashfalsoapenasparateste");

        assert!(
            buscar_credenciais(&db.pool, "ninguem@exemplo.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn email_duplicado_vira_conflito() {
        let db = db_temporario().await;

        criar(&db.pool, &novo("ana@exemplo.com", Perfil::Usuario))
            .await
            .unwrap();
        let err = criar(&db.pool, &novo("ana@exemplo.com", Perfil::Admin))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Domain(DomainError::Conflict(_))
        ));
    }
}
