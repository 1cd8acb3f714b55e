//! On-demand lookups, one per trigger element.
//!
//! Each trigger reads at most one field. Empty input never reaches the
//! network: `ApiClient` rejects it and the message is shown on the panel.

use escola_core::{ApiClient, ApiError, HttpRequest};
use serde_json::Value;

use crate::fetch::Fetcher;
use crate::forms::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    UserById,
    UserByEmail,
    AllUsers,
    ProfessorById,
    ProfessorByCpf,
    ProfessorByEmail,
    AllProfessors,
}

impl Query {
    pub const ALL: [Query; 7] = [
        Query::UserById,
        Query::UserByEmail,
        Query::AllUsers,
        Query::ProfessorById,
        Query::ProfessorByCpf,
        Query::ProfessorByEmail,
        Query::AllProfessors,
    ];

    /// Name of the element whose click runs this query.
    pub fn trigger(self) -> &'static str {
        match self {
            Query::UserById => "searchUser",
            Query::UserByEmail => "searchUserByEmail",
            Query::AllUsers => "listAllUsers",
            Query::ProfessorById => "searchProfessor",
            Query::ProfessorByCpf => "searchProfessorByCpf",
            Query::ProfessorByEmail => "searchProfessorByEmail",
            Query::AllProfessors => "listAllProfessors",
        }
    }

    /// The input field read by this query, if any.
    pub fn field(self) -> Option<&'static str> {
        match self {
            Query::UserById => Some("searchUserId"),
            Query::UserByEmail => Some("searchUserEmail"),
            Query::ProfessorById => Some("searchProfId"),
            Query::ProfessorByCpf => Some("searchProfCpf"),
            Query::ProfessorByEmail => Some("searchProfEmail"),
            Query::AllUsers | Query::AllProfessors => None,
        }
    }

    pub fn build(self, client: &ApiClient, input: &str) -> Result<HttpRequest, ApiError> {
        match self {
            Query::UserById => client.build_get_user(input),
            Query::UserByEmail => client.build_get_user_by_email(input),
            Query::AllUsers => Ok(client.build_list_users()),
            Query::ProfessorById => client.build_get_professor(input),
            Query::ProfessorByCpf => client.build_get_professor_by_cpf(input),
            Query::ProfessorByEmail => client.build_get_professor_by_email(input),
            Query::AllProfessors => Ok(client.build_list_professors()),
        }
    }
}

pub fn run(fetcher: &Fetcher, fields: &Fields, query: Query) -> Option<Value> {
    let input = query.field().map(|name| fields.get(name)).unwrap_or_default();
    match query.build(fetcher.client(), &input) {
        Ok(request) => fetcher.request(request),
        Err(err) => {
            fetcher.report(&err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DisplayPolicy;
    use crate::display::{Panel, PanelClass};
    use crate::testing::ScriptedTransport;

    const BASE: &str = "http://api.test/api";

    fn setup() -> (Fetcher, Arc<ScriptedTransport>, Arc<Panel>) {
        let transport = Arc::new(ScriptedTransport::new());
        let panel = Arc::new(Panel::new());
        let fetcher = Fetcher::new(
            ApiClient::new(BASE),
            transport.clone(),
            panel.clone(),
            DisplayPolicy::LastResolved,
        );
        (fetcher, transport, panel)
    }

    #[test]
    fn triggers_hit_the_documented_endpoints() {
        let (fetcher, transport, _panel) = setup();
        let fields = Fields::new();
        fields.set("searchUserId", "12");
        fields.set("searchUserEmail", "ana@escola.br");
        fields.set("searchProfId", "3");
        fields.set("searchProfCpf", "123.456.789-01");
        fields.set("searchProfEmail", "joao+x@escola.br");

        for query in Query::ALL {
            run(&fetcher, &fields, query);
        }

        let urls: Vec<String> = transport.calls().into_iter().map(|c| c.url).collect();
        assert_eq!(
            urls,
            vec![
                format!("{BASE}/usuarios/12"),
                format!("{BASE}/usuarios/email/ana%40escola.br"),
                format!("{BASE}/usuarios"),
                format!("{BASE}/professores/3"),
                format!("{BASE}/professores/cpf/123.456.789-01"),
                format!("{BASE}/professores/email/joao%2Bx%40escola.br"),
                format!("{BASE}/professores"),
            ]
        );
    }

    #[test]
    fn empty_input_short_circuits_without_network() {
        let (fetcher, transport, panel) = setup();
        let fields = Fields::new();

        for query in Query::ALL.into_iter().filter(|q| q.field().is_some()) {
            assert_eq!(run(&fetcher, &fields, query), None);
            assert_eq!(panel.view().class, PanelClass::Error);
        }

        assert!(transport.calls().is_empty());
        assert_eq!(panel.view().text, "Por favor, insira um email válido.");
    }

    #[test]
    fn cpf_trigger_reports_its_own_message() {
        let (fetcher, _transport, panel) = setup();
        run(&fetcher, &Fields::new(), Query::ProfessorByCpf);
        assert_eq!(panel.view().text, "Por favor, insira um CPF válido.");
    }

    #[test]
    fn trigger_names_are_unique() {
        let mut names: Vec<&str> = Query::ALL.iter().map(|q| q.trigger()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Query::ALL.len());
    }
}
