// Predicados de "etapa do cadastro concluída". Funções puras: um documento
// inexistente é simplesmente incompleto, nunca um erro.

use mongodb::bson::{Bson, Document};

use crate::models::{BANK_INFO_FIELD, BASIC_INFO_FIELDS, NOMINEE_INFO_FIELDS};

/// Campo presente e diferente de null e de string vazia.
pub fn is_present(document: &Document, key: &str) -> bool {
    match document.get(key) {
        None | Some(Bson::Null) => false,
        Some(Bson::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

pub fn is_complete(document: Option<&Document>, required_keys: &[&str]) -> bool {
    match document {
        Some(doc) => required_keys.iter().all(|key| is_present(doc, key)),
        None => false,
    }
}

/// Primeiro campo obrigatório ausente, para mensagens de validação
pub fn first_missing<'a>(document: &Document, required_keys: &[&'a str]) -> Option<&'a str> {
    required_keys.iter().copied().find(|key| !is_present(document, key))
}

pub fn basic_info_complete(user: Option<&Document>) -> bool {
    is_complete(user, BASIC_INFO_FIELDS)
}

/// `bank_info` precisa ser uma lista não vazia de documentos não vazios.
pub fn bank_info_complete(user: Option<&Document>) -> bool {
    let Some(user) = user else {
        return false;
    };

    match user.get(BANK_INFO_FIELD) {
        Some(Bson::Array(entries)) if !entries.is_empty() => entries
            .iter()
            .all(|entry| matches!(entry, Bson::Document(d) if !d.is_empty())),
        _ => false,
    }
}

pub fn nominee_info_complete(nominee: Option<&Document>) -> bool {
    is_complete(nominee, NOMINEE_INFO_FIELDS)
}
