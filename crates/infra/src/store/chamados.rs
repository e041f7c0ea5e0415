//! Ticket (manutenção) lifecycle: transactional creation, role-scoped
//! listing, detail with equipment join, and the single-statement update
//! carrying the derived-field rules.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use chamados_core::{DomainError, NovoChamado, STATUS_ABERTO, status_terminal};

use crate::error::{StoreResult, mapear_sqlx};

/// Who may see which tickets. Derived from verified claims by the caller,
/// never from request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibilidade {
    /// admin / tecnico: every ticket.
    Todos,
    /// usuario: only tickets they opened.
    DoSolicitante(i64),
}

/// Full ticket row, as returned by the update statement.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Chamado {
    pub id: i64,
    pub solicitante_id: i64,
    pub tecnico_id: Option<i64>,
    pub motivo: String,
    pub descricao_execucao: Option<String>,
    pub status: String,
    pub data_abertura: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
}

/// Listing row with requester/technician display names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChamadoResumo {
    pub id: i64,
    pub status: String,
    pub motivo: String,
    pub data_abertura: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
    pub solicitante_nome: String,
    pub tecnico_nome: Option<String>,
}

/// Header of the detail view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChamadoCabecalho {
    pub id: i64,
    pub status: String,
    pub motivo: String,
    pub descricao_execucao: Option<String>,
    pub data_abertura: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
    pub solicitante_id: i64,
    pub solicitante_nome: String,
    pub tecnico_id: Option<i64>,
    pub tecnico_nome: Option<String>,
}

/// One associated equipment entry, carrying display descriptions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EquipamentoDoChamado {
    pub id: i64,
    pub descricao: String,
    pub item_descricao: String,
    pub sala_descricao: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChamadoDetalhe {
    #[serde(flatten)]
    pub cabecalho: ChamadoCabecalho,
    pub equipamentos: Vec<EquipamentoDoChamado>,
}

#[derive(Debug, Clone)]
pub struct AtualizaChamado {
    pub status: String,
    pub descricao_execucao: Option<String>,
}

/// Open a ticket together with its equipment links, all-or-nothing.
///
/// The whole multi-statement unit runs on one dedicated connection inside an
/// explicit transaction; any failure (including a nonexistent equipment id)
/// rolls everything back via the transaction guard, and the connection
/// returns to the pool on every exit path.
pub async fn abrir(
    pool: &SqlitePool,
    novo: &NovoChamado,
    agora: DateTime<Utc>,
) -> StoreResult<i64> {
    let mut tx = pool.begin().await?;

    let chamado_id: i64 = sqlx::query_scalar(
        "INSERT INTO manutencao (solicitante_id, motivo, status, data_abertura) \
         VALUES (?, ?, ?, ?) \
         RETURNING id",
    )
    .bind(novo.solicitante_id)
    .bind(&novo.motivo)
    .bind(STATUS_ABERTO)
    .bind(agora)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| mapear_sqlx(e, "chamado duplicado", "o solicitante informado não existe"))?;

    for equipamento_id in &novo.equipamentos_ids {
        sqlx::query(
            "INSERT INTO equipamento_manutencao (manutencao_id, equipamento_id) VALUES (?, ?)",
        )
        .bind(chamado_id)
        .bind(equipamento_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            mapear_sqlx(
                e,
                "equipamento repetido no chamado",
                "um dos IDs de equipamento informados não existe",
            )
        })?;
    }

    tx.commit().await?;

    tracing::info!(chamado_id, solicitante_id = novo.solicitante_id, "chamado aberto");
    Ok(chamado_id)
}

const LISTAR_TODOS: &str = "SELECT \
         m.id, m.status, m.motivo, m.data_abertura, m.data_conclusao, \
         u_solic.nome AS solicitante_nome, u_tec.nome AS tecnico_nome \
     FROM manutencao m \
     JOIN usuario u_solic ON m.solicitante_id = u_solic.id \
     LEFT JOIN usuario u_tec ON m.tecnico_id = u_tec.id \
     ORDER BY m.data_abertura DESC";

const LISTAR_DO_SOLICITANTE: &str = "SELECT \
         m.id, m.status, m.motivo, m.data_abertura, m.data_conclusao, \
         u_solic.nome AS solicitante_nome, u_tec.nome AS tecnico_nome \
     FROM manutencao m \
     JOIN usuario u_solic ON m.solicitante_id = u_solic.id \
     LEFT JOIN usuario u_tec ON m.tecnico_id = u_tec.id \
     WHERE m.solicitante_id = ? \
     ORDER BY m.data_abertura DESC";

/// Tickets newest-first, scoped by `visibilidade`.
pub async fn listar(
    pool: &SqlitePool,
    visibilidade: Visibilidade,
) -> StoreResult<Vec<ChamadoResumo>> {
    let resumos = match visibilidade {
        Visibilidade::Todos => {
            sqlx::query_as::<_, ChamadoResumo>(LISTAR_TODOS)
                .fetch_all(pool)
                .await?
        }
        Visibilidade::DoSolicitante(solicitante_id) => {
            sqlx::query_as::<_, ChamadoResumo>(LISTAR_DO_SOLICITANTE)
                .bind(solicitante_id)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(resumos)
}

/// Ticket detail plus its associated equipment (join through the link table).
///
/// Ownership checks belong to the caller; this returns the row regardless of
/// who asks.
pub async fn detalhar(pool: &SqlitePool, id: i64) -> StoreResult<Option<ChamadoDetalhe>> {
    let cabecalho = sqlx::query_as::<_, ChamadoCabecalho>(
        "SELECT \
             m.id, m.status, m.motivo, m.descricao_execucao, \
             m.data_abertura, m.data_conclusao, \
             u_solic.id AS solicitante_id, u_solic.nome AS solicitante_nome, \
             u_tec.id AS tecnico_id, u_tec.nome AS tecnico_nome \
         FROM manutencao m \
         JOIN usuario u_solic ON m.solicitante_id = u_solic.id \
         LEFT JOIN usuario u_tec ON m.tecnico_id = u_tec.id \
         WHERE m.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(cabecalho) = cabecalho else {
        return Ok(None);
    };

    let equipamentos = sqlx::query_as::<_, EquipamentoDoChamado>(
        "SELECT \
             eq.id, eq.descricao, \
             it.descricao AS item_descricao, \
             sa.descricao AS sala_descricao \
         FROM equipamento_manutencao em \
         JOIN equipamento eq ON em.equipamento_id = eq.id \
         JOIN item it ON eq.item_id = it.id \
         JOIN sala sa ON eq.sala_id = sa.id \
         WHERE em.manutencao_id = ?",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ChamadoDetalhe {
        cabecalho,
        equipamentos,
    }))
}

/// Apply a status update with the two derived-field rules, in one statement:
///
/// - assign-if-unset: `tecnico_id = COALESCE(tecnico_id, ?)` — the first
///   updating technician wins, later updates never overwrite;
/// - stamp-on-terminal: `data_conclusao = COALESCE(data_conclusao, ?)` with
///   the bind NULL unless the new status is terminal, so the completion
///   timestamp is written at most once and left untouched otherwise.
///
/// Returns `None` when no row matches `id`.
pub async fn atualizar(
    pool: &SqlitePool,
    id: i64,
    atualiza: &AtualizaChamado,
    tecnico_id: i64,
    agora: DateTime<Utc>,
) -> StoreResult<Option<Chamado>> {
    if atualiza.status.trim().is_empty() {
        return Err(DomainError::validation("o campo status é obrigatório").into());
    }

    let conclusao: Option<DateTime<Utc>> = status_terminal(&atualiza.status).then_some(agora);

    let chamado = sqlx::query_as::<_, Chamado>(
        "UPDATE manutencao SET \
             status = ?1, \
             descricao_execucao = COALESCE(?2, descricao_execucao), \
             tecnico_id = COALESCE(tecnico_id, ?3), \
             data_conclusao = COALESCE(data_conclusao, ?4) \
         WHERE id = ?5 \
         RETURNING id, solicitante_id, tecnico_id, motivo, descricao_execucao, \
                   status, data_abertura, data_conclusao",
    )
    .bind(&atualiza.status)
    .bind(atualiza.descricao_execucao.as_deref())
    .bind(tecnico_id)
    .bind(conclusao)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(chamado)
}
