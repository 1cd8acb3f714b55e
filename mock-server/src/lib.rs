use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Public view of a user. Passwords are accepted on create and never echoed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: u64,
    pub email: String,
    pub perfil: String,
    pub ativo: bool,
}

/// Public view of a professor. `cpf` is stored as digits only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    pub id: u64,
    pub nome: String,
    pub cpf: String,
    pub formacao: Option<String>,
    pub telefone: Option<String>,
    pub ativo: bool,
}

#[derive(Deserialize)]
pub struct CreateUsuario {
    pub email: String,
    pub senha: String,
    pub perfil: String,
}

#[derive(Deserialize)]
pub struct CreateProfessor {
    pub email: String,
    pub senha: String,
    pub nome: String,
    pub cpf: String,
    #[serde(default)]
    pub formacao: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
}

/// Error body returned for rejected writes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

struct Account {
    email: String,
    perfil: String,
}

/// Professors share their id with the account they extend.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    accounts: BTreeMap<u64, Account>,
    professors: BTreeMap<u64, Professor>,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn usuario(&self, id: u64) -> Option<Usuario> {
        self.accounts.get(&id).map(|account| Usuario {
            id,
            email: account.email.clone(),
            perfil: account.perfil.clone(),
            ativo: true,
        })
    }

    fn id_by_email(&self, email: &str) -> Option<u64> {
        self.accounts
            .iter()
            .find(|(_, account)| account.email == email)
            .map(|(id, _)| *id)
    }
}

pub type Db = Arc<RwLock<Store>>;

struct Rejection(StatusCode, String);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.1,
            status: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> Rejection {
    Rejection(StatusCode::BAD_REQUEST, message.into())
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route("/usuarios/{id}", get(get_usuario))
        .route("/usuarios/email/{email}", get(get_usuario_by_email))
        .route("/professores", get(list_professores).post(create_professor))
        .route("/professores/{id}", get(get_professor))
        .route("/professores/cpf/{cpf}", get(get_professor_by_cpf))
        .route("/professores/email/{email}", get(get_professor_by_email))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn cpf_digits(cpf: &str) -> String {
    cpf.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn email_shape_ok(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+_.-".contains(c))
        }
        None => false,
    }
}

// --- usuarios ---

async fn list_usuarios(State(db): State<Db>) -> Json<Vec<Usuario>> {
    let store = db.read().await;
    Json(store.accounts.keys().filter_map(|id| store.usuario(*id)).collect())
}

async fn create_usuario(
    State(db): State<Db>,
    Json(input): Json<CreateUsuario>,
) -> Result<(StatusCode, Json<Usuario>), Rejection> {
    let mut store = db.write().await;
    if store.id_by_email(&input.email).is_some() {
        return Err(bad_request(format!("Email já cadastrado: {}", input.email)));
    }
    let id = store.allocate_id();
    store.accounts.insert(
        id,
        Account {
            email: input.email.clone(),
            perfil: input.perfil.clone(),
        },
    );
    tracing::debug!(id, "usuario created");
    let created = Usuario {
        id,
        email: input.email,
        perfil: input.perfil,
        ativo: true,
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_usuario(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Usuario>, StatusCode> {
    db.read().await.usuario(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_usuario_by_email(
    State(db): State<Db>,
    Path(email): Path<String>,
) -> Result<Json<Usuario>, StatusCode> {
    let store = db.read().await;
    store
        .id_by_email(&email)
        .and_then(|id| store.usuario(id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- professores ---

async fn list_professores(State(db): State<Db>) -> Json<Vec<Professor>> {
    Json(db.read().await.professors.values().cloned().collect())
}

async fn create_professor(
    State(db): State<Db>,
    Json(input): Json<CreateProfessor>,
) -> Result<(StatusCode, Json<Professor>), Rejection> {
    if input.nome.trim().is_empty() {
        return Err(bad_request("Nome do professor é obrigatório"));
    }
    if input.email.trim().is_empty() {
        return Err(bad_request("Email do professor é obrigatório"));
    }
    if !email_shape_ok(&input.email) {
        return Err(bad_request("Formato de email inválido"));
    }
    if input.cpf.trim().is_empty() {
        return Err(bad_request("CPF do professor é obrigatório"));
    }
    let cpf = cpf_digits(&input.cpf);
    if cpf.len() != 11 {
        return Err(bad_request("CPF deve conter 11 dígitos"));
    }

    let mut store = db.write().await;
    if store.professors.values().any(|p| p.cpf == cpf) {
        return Err(bad_request(format!("CPF já cadastrado: {cpf}")));
    }
    if store.id_by_email(&input.email).is_some() {
        return Err(bad_request(format!("Email já cadastrado: {}", input.email)));
    }

    let id = store.allocate_id();
    store.accounts.insert(
        id,
        Account {
            email: input.email,
            perfil: "PROFESSOR".to_string(),
        },
    );
    let professor = Professor {
        id,
        nome: input.nome,
        cpf,
        formacao: input.formacao,
        telefone: input.telefone,
        ativo: true,
    };
    store.professors.insert(id, professor.clone());
    tracing::debug!(id, "professor created");
    Ok((StatusCode::CREATED, Json(professor)))
}

async fn get_professor(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Professor>, StatusCode> {
    let store = db.read().await;
    store.professors.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_professor_by_cpf(
    State(db): State<Db>,
    Path(cpf): Path<String>,
) -> Result<Json<Professor>, StatusCode> {
    let digits = cpf_digits(&cpf);
    let store = db.read().await;
    store
        .professors
        .values()
        .find(|p| p.cpf == digits)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_professor_by_email(
    State(db): State<Db>,
    Path(email): Path<String>,
) -> Result<Json<Professor>, StatusCode> {
    let store = db.read().await;
    store
        .id_by_email(&email)
        .and_then(|id| store.professors.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
