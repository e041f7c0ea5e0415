#[tokio::main]
async fn main() {
    chamados_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET não definido; usando segredo de desenvolvimento inseguro");
        "dev-secret".to_string()
    });

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://chamados.sqlite".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let db = chamados_infra::Db::connect(&database_url)
        .await
        .expect("falha ao abrir o banco de dados");

    let app = chamados_api::app::build_app(db, jwt_secret.as_bytes());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("falha ao escutar em {bind_addr}: {e}"));

    tracing::info!("escutando em {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
