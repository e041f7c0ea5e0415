use thiserror::Error;

/// bcrypt work factor. Matches the 10-round budget the service always used;
/// raising it only affects newly stored hashes.
pub const CUSTO_HASH: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("falha ao processar senha")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password with a fresh salt.
pub fn gerar_hash_senha(senha: &str) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(senha, CUSTO_HASH)?)
}

/// Compare a plaintext candidate against a stored hash.
///
/// Delegates to bcrypt's verify so the comparison is not a plain string
/// equality; returns `Ok(false)` on mismatch, `Err` only on malformed hashes.
pub fn verificar_senha(senha: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(senha, hash)?)
}
