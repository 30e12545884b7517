use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// O que a busca por chave estrangeira devolve quando nada casa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyMiss {
    /// Lista (possivelmente vazia) com todos os documentos do telefone
    EmptyList,
    /// Um único documento ou 404
    NotFound,
}

/// Descreve um recurso CRUD genérico guardado em uma coleção.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub collection: &'static str,
    /// Nome usado nas mensagens, ex: "Loan request"
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
    pub foreign_key: &'static str,
    pub foreign_key_miss: ForeignKeyMiss,
    /// Carimba `created_at` / `updated_at`
    pub timestamps: bool,
    /// Listagem ordenada por `created_at` decrescente
    pub newest_first: bool,
}

/// Corpo livre (objeto JSON) usado em criação e updates parciais
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct FieldMap(pub Map<String, Value>);

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            id,
        }
    }
}
