//! Catalog tables: itens, responsáveis, salas, equipamentos.
//!
//! Uniform contract: insert validates required fields and returns the created
//! row; listings are joined for display and readable by any authenticated
//! caller (the role gate lives in the API policy table).

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use chamados_core::DomainError;

use crate::error::{StoreResult, mapear_sqlx};

// -------------------------
// Itens
// -------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub descricao: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NovoItem {
    pub descricao: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
}

pub async fn criar_item(pool: &SqlitePool, novo: &NovoItem) -> StoreResult<Item> {
    if novo.descricao.trim().is_empty() {
        return Err(DomainError::validation("descricao é obrigatória").into());
    }
    let item = sqlx::query_as::<_, Item>(
        "INSERT INTO item (descricao, marca, modelo) VALUES (?, ?, ?) \
         RETURNING id, descricao, marca, modelo",
    )
    .bind(&novo.descricao)
    .bind(novo.marca.as_deref())
    .bind(novo.modelo.as_deref())
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn listar_itens(pool: &SqlitePool) -> StoreResult<Vec<Item>> {
    let itens = sqlx::query_as::<_, Item>(
        "SELECT id, descricao, marca, modelo FROM item ORDER BY descricao",
    )
    .fetch_all(pool)
    .await?;
    Ok(itens)
}

// -------------------------
// Responsáveis
// -------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Responsavel {
    pub id: i64,
    pub nome: String,
}

pub async fn criar_responsavel(pool: &SqlitePool, nome: &str) -> StoreResult<Responsavel> {
    if nome.trim().is_empty() {
        return Err(DomainError::validation("nome é obrigatório").into());
    }
    let responsavel = sqlx::query_as::<_, Responsavel>(
        "INSERT INTO responsavel (nome) VALUES (?) RETURNING id, nome",
    )
    .bind(nome)
    .fetch_one(pool)
    .await?;
    Ok(responsavel)
}

pub async fn listar_responsaveis(pool: &SqlitePool) -> StoreResult<Vec<Responsavel>> {
    let responsaveis =
        sqlx::query_as::<_, Responsavel>("SELECT id, nome FROM responsavel ORDER BY nome")
            .fetch_all(pool)
            .await?;
    Ok(responsaveis)
}

// -------------------------
// Salas
// -------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sala {
    pub id: i64,
    pub descricao: String,
    pub responsavel_id: Option<i64>,
}

/// Listing row: room plus the (optional) responsible party's name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SalaComResponsavel {
    pub id: i64,
    pub descricao: String,
    pub responsavel_id: Option<i64>,
    pub responsavel_nome: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NovaSala {
    pub descricao: String,
    pub responsavel_id: Option<i64>,
}

pub async fn criar_sala(pool: &SqlitePool, nova: &NovaSala) -> StoreResult<Sala> {
    if nova.descricao.trim().is_empty() {
        return Err(DomainError::validation("descricao é obrigatória").into());
    }
    sqlx::query_as::<_, Sala>(
        "INSERT INTO sala (descricao, responsavel_id) VALUES (?, ?) \
         RETURNING id, descricao, responsavel_id",
    )
    .bind(&nova.descricao)
    .bind(nova.responsavel_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        mapear_sqlx(
            e,
            "sala duplicada",
            "o responsavel_id informado não existe",
        )
    })
}

pub async fn listar_salas(pool: &SqlitePool) -> StoreResult<Vec<SalaComResponsavel>> {
    let salas = sqlx::query_as::<_, SalaComResponsavel>(
        "SELECT s.id, s.descricao, s.responsavel_id, r.nome AS responsavel_nome \
         FROM sala s \
         LEFT JOIN responsavel r ON s.responsavel_id = r.id \
         ORDER BY s.descricao",
    )
    .fetch_all(pool)
    .await?;
    Ok(salas)
}

// -------------------------
// Equipamentos
// -------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Equipamento {
    pub id: i64,
    pub descricao: String,
    pub item_id: i64,
    pub sala_id: i64,
}

/// Listing row: one physical unit joined to its item and room.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EquipamentoDetalhado {
    pub id: i64,
    pub descricao: String,
    pub item_id: i64,
    pub item_descricao: String,
    pub item_marca: Option<String>,
    pub item_modelo: Option<String>,
    pub sala_id: i64,
    pub sala_descricao: String,
}

#[derive(Debug, Clone)]
pub struct NovoEquipamento {
    pub descricao: String,
    pub item_id: i64,
    pub sala_id: i64,
}

pub async fn criar_equipamento(
    pool: &SqlitePool,
    novo: &NovoEquipamento,
) -> StoreResult<Equipamento> {
    if novo.descricao.trim().is_empty() {
        return Err(DomainError::validation("descricao é obrigatória").into());
    }
    sqlx::query_as::<_, Equipamento>(
        "INSERT INTO equipamento (descricao, item_id, sala_id) VALUES (?, ?, ?) \
         RETURNING id, descricao, item_id, sala_id",
    )
    .bind(&novo.descricao)
    .bind(novo.item_id)
    .bind(novo.sala_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        mapear_sqlx(
            e,
            "equipamento duplicado",
            "o item_id ou sala_id informado não existe",
        )
    })
}

pub async fn listar_equipamentos(pool: &SqlitePool) -> StoreResult<Vec<EquipamentoDetalhado>> {
    let equipamentos = sqlx::query_as::<_, EquipamentoDetalhado>(
        "SELECT \
             eq.id, eq.descricao, eq.item_id, \
             it.descricao AS item_descricao, it.marca AS item_marca, it.modelo AS item_modelo, \
             eq.sala_id, sa.descricao AS sala_descricao \
         FROM equipamento eq \
         JOIN item it ON eq.item_id = it.id \
         JOIN sala sa ON eq.sala_id = sa.id \
         ORDER BY sa.descricao, it.descricao",
    )
    .fetch_all(pool)
    .await?;
    Ok(equipamentos)
}
