use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "segredo-de-teste";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, over a fresh temp-file database, bound to an
    /// ephemeral port.
    async fn spawn() -> Self {
        let caminho = std::env::temp_dir().join(format!(
            "chamados-api-teste-{}.sqlite",
            uuid::Uuid::new_v4()
        ));
        let db = chamados_infra::Db::connect(&format!("sqlite://{}", caminho.display()))
            .await
            .expect("falha ao abrir banco de teste");

        let app = chamados_api::app::build_app(db, JWT_SECRET.as_bytes());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Register a user through the public endpoint and log in, returning the
/// bearer token and user id.
async fn cadastrar_e_logar(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    perfil: &str,
) -> (String, i64) {
    let res = client
        .post(format!("{base_url}/usuarios"))
        .json(&json!({
            "nome": email.split('@').next().unwrap(),
            "email": email,
            "senha": "senha123",
            "perfil": perfil,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let criado: serde_json::Value = res.json().await.unwrap();
    let id = criado["id"].as_i64().unwrap();

    let res = client
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "senha": "senha123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    (body["token"].as_str().unwrap().to_string(), id)
}

/// Admin seeds one item, one room and one equipment; returns the equipment id.
async fn semear_equipamento(
    client: &reqwest::Client,
    base_url: &str,
    token_admin: &str,
) -> i64 {
    let res = client
        .post(format!("{base_url}/itens"))
        .bearer_auth(token_admin)
        .json(&json!({ "descricao": "Projetor", "marca": "Epson" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{base_url}/salas"))
        .bearer_auth(token_admin)
        .json(&json!({ "descricao": "Auditório" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let sala: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{base_url}/equipamentos"))
        .bearer_auth(token_admin)
        .json(&json!({
            "descricao": "Projetor do teto",
            "item_id": item["id"],
            "sala_id": sala["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let equipamento: serde_json::Value = res.json().await.unwrap();
    equipamento["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_e_publico_e_o_resto_nao() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/itens", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/itens", srv.base_url))
        .bearer_auth("nao-e-um-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cadastro_nao_expoe_senha_e_faz_login() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/usuarios", srv.base_url))
        .json(&json!({
            "nome": "Ana",
            "email": "ana@exemplo.com",
            "senha": "senha123",
            "perfil": "usuario",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let criado: serde_json::Value = res.json().await.unwrap();
    assert_eq!(criado["email"], "ana@exemplo.com");
    assert!(criado.get("senha").is_none());
    assert!(criado.get("senha_hash").is_none());

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "email": "ana@exemplo.com", "senha": "senha123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["token"].as_str().unwrap().contains('.'));
    assert_eq!(body["usuario"]["perfil"], "usuario");
}

#[tokio::test]
async fn cadastro_sem_campo_obrigatorio_e_email_duplicado_viram_400() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/usuarios", srv.base_url))
        .json(&json!({ "nome": "Ana", "senha": "senha123", "perfil": "usuario" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    cadastrar_e_logar(&client, &srv.base_url, "ana@exemplo.com", "usuario").await;
    let res = client
        .post(format!("{}/usuarios", srv.base_url))
        .json(&json!({
            "nome": "Outra Ana",
            "email": "ana@exemplo.com",
            "senha": "outra-senha",
            "perfil": "admin",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn login_nao_distingue_email_desconhecido_de_senha_errada() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    cadastrar_e_logar(&client, &srv.base_url, "ana@exemplo.com", "usuario").await;

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "email": "ninguem@exemplo.com", "senha": "senha123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let corpo_desconhecido: serde_json::Value = res.json().await.unwrap();

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "email": "ana@exemplo.com", "senha": "senha-errada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let corpo_errada: serde_json::Value = res.json().await.unwrap();

    assert_eq!(corpo_desconhecido, corpo_errada);
}

#[tokio::test]
async fn token_expirado_e_rejeitado() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let agora = chrono::Utc::now().timestamp();
    let expirado = json!({
        "sub": 1,
        "perfil": "admin",
        "iat": agora - 9 * 60 * 60,
        "exp": agora - 60 * 60,
    });
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &expirado,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let res = client
        .get(format!("{}/itens", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalogo_escreve_so_admin_mas_todos_leem() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (token_admin, _) =
        cadastrar_e_logar(&client, &srv.base_url, "admin@exemplo.com", "admin").await;
    let (token_usuario, _) =
        cadastrar_e_logar(&client, &srv.base_url, "ana@exemplo.com", "usuario").await;

    let res = client
        .post(format!("{}/itens", srv.base_url))
        .bearer_auth(&token_usuario)
        .json(&json!({ "descricao": "Projetor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/itens", srv.base_url))
        .bearer_auth(&token_admin)
        .json(&json!({ "descricao": "Projetor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/itens", srv.base_url))
        .bearer_auth(&token_usuario)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let itens: serde_json::Value = res.json().await.unwrap();
    assert_eq!(itens.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn chamado_com_equipamento_invalido_nao_deixa_rastro() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (token_admin, _) =
        cadastrar_e_logar(&client, &srv.base_url, "admin@exemplo.com", "admin").await;
    let (token_usuario, _) =
        cadastrar_e_logar(&client, &srv.base_url, "ana@exemplo.com", "usuario").await;
    let equipamento_id = semear_equipamento(&client, &srv.base_url, &token_admin).await;

    // empty equipment set
    let res = client
        .post(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_usuario)
        .json(&json!({ "motivo": "Sem imagem", "equipamentos_ids": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // one valid id among invalid ones
    let res = client
        .post(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_usuario)
        .json(&json!({ "motivo": "Sem imagem", "equipamentos_ids": [equipamento_id, 999] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_reference");

    let res = client
        .get(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_usuario)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let lista: serde_json::Value = res.json().await.unwrap();
    assert!(lista.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ciclo_completo_do_chamado() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (token_admin, _) =
        cadastrar_e_logar(&client, &srv.base_url, "admin@exemplo.com", "admin").await;
    let (token_tecnico, tecnico_id) =
        cadastrar_e_logar(&client, &srv.base_url, "tec@exemplo.com", "tecnico").await;
    let (token_ana, _) =
        cadastrar_e_logar(&client, &srv.base_url, "ana@exemplo.com", "usuario").await;
    let (token_beto, _) =
        cadastrar_e_logar(&client, &srv.base_url, "beto@exemplo.com", "usuario").await;

    let equipamento_id = semear_equipamento(&client, &srv.base_url, &token_admin).await;

    // Ana opens the ticket
    let res = client
        .post(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_ana)
        .json(&json!({ "motivo": "Sem imagem", "equipamentos_ids": [equipamento_id] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let criado: serde_json::Value = res.json().await.unwrap();
    let chamado_id = criado["id"].as_i64().unwrap();

    // listing scope: Ana sees hers, Beto sees none, staff sees all
    let res = client
        .get(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_beto)
        .send()
        .await
        .unwrap();
    let lista: serde_json::Value = res.json().await.unwrap();
    assert!(lista.as_array().unwrap().is_empty());

    let res = client
        .get(format!("{}/chamados", srv.base_url))
        .bearer_auth(&token_tecnico)
        .send()
        .await
        .unwrap();
    let lista: serde_json::Value = res.json().await.unwrap();
    assert_eq!(lista.as_array().unwrap().len(), 1);
    assert_eq!(lista[0]["solicitante_nome"], "ana");

    // detail: owner sees equipment descriptions, another requester gets 403
    let res = client
        .get(format!("{}/chamados/{chamado_id}", srv.base_url))
        .bearer_auth(&token_ana)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let detalhe: serde_json::Value = res.json().await.unwrap();
    assert_eq!(detalhe["status"], "Aberto");
    assert_eq!(detalhe["equipamentos"][0]["item_descricao"], "Projetor");
    assert_eq!(detalhe["equipamentos"][0]["sala_descricao"], "Auditório");

    let res = client
        .get(format!("{}/chamados/{chamado_id}", srv.base_url))
        .bearer_auth(&token_beto)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // requesters cannot update; the technician closes it in one call
    let res = client
        .patch(format!("{}/chamados/{chamado_id}", srv.base_url))
        .bearer_auth(&token_ana)
        .json(&json!({ "status": "Concluído" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .patch(format!("{}/chamados/{chamado_id}", srv.base_url))
        .bearer_auth(&token_tecnico)
        .json(&json!({ "status": "Concluído", "descricao_execucao": "Cabo trocado" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let atualizado: serde_json::Value = res.json().await.unwrap();
    assert_eq!(atualizado["tecnico_id"].as_i64().unwrap(), tecnico_id);
    assert_eq!(atualizado["status"], "Concluído");
    assert!(atualizado["data_conclusao"].is_string());

    // missing status on update
    let res = client
        .patch(format!("{}/chamados/{chamado_id}", srv.base_url))
        .bearer_auth(&token_tecnico)
        .json(&json!({ "descricao_execucao": "sem status" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // unknown ticket
    let res = client
        .patch(format!("{}/chamados/9999", srv.base_url))
        .bearer_auth(&token_tecnico)
        .json(&json!({ "status": "Em andamento" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
