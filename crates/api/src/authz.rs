//! Route access policy.
//!
//! One declarative table keyed by (method, path pattern), consulted by the
//! auth middleware before dispatch. `:` segments match any single path
//! segment. Routes absent from the table require authentication, so a new
//! endpoint is never accidentally public.

use chamados_auth::Acesso;
use chamados_core::Perfil;

const SO_ADMIN: Acesso = Acesso::Perfis(&[Perfil::Admin]);
const ADMIN_OU_TECNICO: Acesso = Acesso::Perfis(&[Perfil::Admin, Perfil::Tecnico]);

const POLITICA: &[(&str, &str, Acesso)] = &[
    ("GET", "/health", Acesso::Publico),
    ("POST", "/usuarios", Acesso::Publico),
    ("POST", "/login", Acesso::Publico),
    ("GET", "/itens", Acesso::Autenticado),
    ("POST", "/itens", SO_ADMIN),
    ("GET", "/responsaveis", Acesso::Autenticado),
    ("POST", "/responsaveis", SO_ADMIN),
    ("GET", "/salas", Acesso::Autenticado),
    ("POST", "/salas", SO_ADMIN),
    ("GET", "/equipamentos", Acesso::Autenticado),
    ("POST", "/equipamentos", SO_ADMIN),
    ("GET", "/chamados", Acesso::Autenticado),
    ("POST", "/chamados", Acesso::Autenticado),
    ("GET", "/chamados/:id", Acesso::Autenticado),
    ("PATCH", "/chamados/:id", ADMIN_OU_TECNICO),
];

/// Access requirement for a request line. Defaults to `Autenticado` when no
/// table entry matches.
pub fn acesso_para(metodo: &str, caminho: &str) -> Acesso {
    POLITICA
        .iter()
        .find(|(m, padrao, _)| *m == metodo && casa(padrao, caminho))
        .map(|(_, _, acesso)| *acesso)
        .unwrap_or(Acesso::Autenticado)
}

/// Segment-wise pattern match; `:x` segments are wildcards.
fn casa(padrao: &str, caminho: &str) -> bool {
    let mut segmentos_padrao = padrao.trim_matches('/').split('/');
    let mut segmentos = caminho.trim_matches('/').split('/');
    loop {
        match (segmentos_padrao.next(), segmentos.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) => {
                if !p.starts_with(':') && p != s {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_e_cadastro_sao_publicos() {
        assert_eq!(acesso_para("GET", "/health"), Acesso::Publico);
        assert_eq!(acesso_para("POST", "/usuarios"), Acesso::Publico);
        assert_eq!(acesso_para("POST", "/login"), Acesso::Publico);
    }

    #[test]
    fn metodo_distingue_leitura_de_escrita() {
        assert_eq!(acesso_para("GET", "/itens"), Acesso::Autenticado);
        assert_eq!(acesso_para("POST", "/itens"), SO_ADMIN);
    }

    #[test]
    fn padrao_com_parametro_casa_qualquer_id() {
        assert_eq!(acesso_para("GET", "/chamados/42"), Acesso::Autenticado);
        assert_eq!(acesso_para("PATCH", "/chamados/42"), ADMIN_OU_TECNICO);
        // a deeper path is not the same route
        assert_eq!(
            acesso_para("PATCH", "/chamados/42/extra"),
            Acesso::Autenticado
        );
    }

    #[test]
    fn rota_desconhecida_exige_autenticacao() {
        assert_eq!(acesso_para("GET", "/qualquer-coisa"), Acesso::Autenticado);
        assert_eq!(acesso_para("DELETE", "/itens"), Acesso::Autenticado);
    }
}
