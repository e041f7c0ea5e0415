use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod chamados;
pub mod equipamentos;
pub mod itens;
pub mod responsaveis;
pub mod salas;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/usuarios", post(auth::registrar))
        .route("/login", post(auth::login))
        .nest("/chamados", chamados::router())
        .nest("/itens", itens::router())
        .nest("/responsaveis", responsaveis::router())
        .nest("/salas", salas::router())
        .nest("/equipamentos", equipamentos::router())
}
