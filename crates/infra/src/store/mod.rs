//! One module per table group; each operation takes the pool explicitly.

pub mod catalogo;
pub mod chamados;
pub mod usuarios;
