//! `chamados-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! issuance/verification, password hashing and the role-gate decision are all
//! deterministic functions over explicit inputs. Wiring them to requests and
//! rows happens in `chamados-api` and `chamados-infra`.

pub mod authorize;
pub mod claims;
pub mod password;
pub mod token;

pub use authorize::{Acesso, AcessoNegado, autorizar};
pub use claims::{Claims, VALIDADE_TOKEN_SEGUNDOS};
pub use password::{PasswordError, gerar_hash_senha, verificar_senha};
pub use token::{Hs256Tokens, TokenError};
