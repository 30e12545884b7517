use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use super::error::AppError;

/// Converte um documento para o JSON devolvido aos clientes:
/// ObjectId vira string hex e datas viram RFC 3339.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(inner) => document_to_json(inner),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Corpo JSON de uma requisição para documento BSON. `_id` nunca vem do cliente.
pub fn json_to_document(body: Map<String, Value>) -> Result<Document, AppError> {
    let mut document = mongodb::bson::to_document(&body)
        .map_err(|e| AppError::validation(format!("Invalid document: {}", e)))?;
    document.remove("_id");
    Ok(document)
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::validation("Invalid ID"))
}

/// Parâmetro de rota obrigatório: vazio ou só espaços é tratado como ausente.
pub fn required_param<'a>(value: &'a str, message: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::validation(message))
    } else {
        Ok(trimmed)
    }
}
