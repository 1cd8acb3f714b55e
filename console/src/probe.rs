//! Connectivity check run once when the console loads.
//!
//! The probe bypasses `Fetcher`: it only looks at the status, never parses
//! the body, and replaces the generic error text with a diagnostic.

use escola_core::ApiClient;

use crate::display::{DisplaySink, Payload};
use crate::transport::Transport;

pub const PROBE_LOADING: &str = "Verificando conexão com a API...";
pub const CONNECTED_MESSAGE: &str =
    "✅ Conexão com a API estabelecida com sucesso!\n\nVocê pode começar a usar o sistema.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Connected,
    Unreachable(String),
}

pub fn run(client: &ApiClient, transport: &dyn Transport, sink: &dyn DisplaySink) -> ProbeOutcome {
    sink.show_loading(PROBE_LOADING);

    let outcome = match transport.execute(&client.build_list_users()) {
        Ok(response) if response.is_success() => ProbeOutcome::Connected,
        Ok(response) => ProbeOutcome::Unreachable(format!("Status: {}", response.status)),
        Err(err) => ProbeOutcome::Unreachable(err.to_string()),
    };

    match &outcome {
        ProbeOutcome::Connected => {
            sink.show_result(&Payload::Text(CONNECTED_MESSAGE.to_string()), false)
        }
        ProbeOutcome::Unreachable(reason) => sink.show_result(
            &Payload::Text(diagnostic(client.base_url(), reason)),
            true,
        ),
    }
    outcome
}

fn diagnostic(base_url: &str, reason: &str) -> String {
    format!(
        "❌ Erro ao conectar com a API em {base_url}\n\n\
         Verifique se:\n\
         1. O servidor da API está rodando\n\
         2. A aplicação está rodando na porta configurada em {base_url}\n\
         3. Não há problemas de CORS\n\n\
         Erro: {reason}"
    )
}
