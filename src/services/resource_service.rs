// CRUD genérico para LoanRequest e NomineeInfo, parametrizado por ResourceSpec.

use mongodb::bson::{doc, DateTime, Document};

use crate::{
    database::DocumentStore,
    models::{ForeignKeyMiss, ResourceSpec},
    services::completeness,
    utils::{json::parse_object_id, AppError},
};

/// Resultado da busca por chave estrangeira, conforme `ForeignKeyMiss`
#[derive(Debug)]
pub enum ForeignKeyMatch {
    Many(Vec<Document>),
    One(Document),
}

fn not_found(resource: &ResourceSpec) -> AppError {
    AppError::not_found(format!("{} not found", resource.label))
}

fn stamp(resource: &ResourceSpec, document: &mut Document, field: &str) {
    if resource.timestamps {
        document.insert(field, DateTime::now());
    }
}

pub async fn list(db: &dyn DocumentStore, resource: &ResourceSpec) -> Result<Vec<Document>, AppError> {
    let sort = resource.newest_first.then(|| doc! { "created_at": -1 });
    Ok(db.find_many(resource.collection, doc! {}, sort).await?)
}

pub async fn get_by_id(db: &dyn DocumentStore, resource: &ResourceSpec, id: &str) -> Result<Document, AppError> {
    let object_id = parse_object_id(id)?;
    db.find_one(resource.collection, doc! { "_id": object_id })
        .await?
        .ok_or_else(|| not_found(resource))
}

pub async fn get_by_foreign_key(
    db: &dyn DocumentStore,
    resource: &ResourceSpec,
    key: &str,
) -> Result<ForeignKeyMatch, AppError> {
    if key.trim().is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }
    let filter = doc! { resource.foreign_key: key };

    match resource.foreign_key_miss {
        ForeignKeyMiss::EmptyList => {
            let docs = db.find_many(resource.collection, filter, None).await?;
            Ok(ForeignKeyMatch::Many(docs))
        }
        ForeignKeyMiss::NotFound => db
            .find_one(resource.collection, filter)
            .await?
            .map(ForeignKeyMatch::One)
            .ok_or_else(|| not_found(resource)),
    }
}

pub async fn find_by_foreign_key(
    db: &dyn DocumentStore,
    resource: &ResourceSpec,
    key: &str,
) -> Result<Option<Document>, AppError> {
    Ok(db.find_one(resource.collection, doc! { resource.foreign_key: key }).await?)
}

pub async fn create(db: &dyn DocumentStore, resource: &ResourceSpec, mut document: Document) -> Result<String, AppError> {
    if let Some(field) = completeness::first_missing(&document, resource.required_fields) {
        log::debug!("{} rejected, missing '{}'", resource.label, field);
        return Err(AppError::validation("Missing required fields"));
    }

    stamp(resource, &mut document, "created_at");
    let id = db.insert_one(resource.collection, document).await?;
    Ok(id.to_hex())
}

async fn update_matching(
    db: &dyn DocumentStore,
    resource: &ResourceSpec,
    filter: Document,
    mut fields: Document,
) -> Result<(), AppError> {
    fields.remove("_id");
    if fields.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    stamp(resource, &mut fields, "updated_at");
    let outcome = db.update_one(resource.collection, filter, fields).await?;
    if outcome.matched == 0 {
        return Err(not_found(resource));
    }
    Ok(())
}

pub async fn update(db: &dyn DocumentStore, resource: &ResourceSpec, id: &str, fields: Document) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    update_matching(db, resource, doc! { "_id": object_id }, fields).await
}

pub async fn update_by_foreign_key(
    db: &dyn DocumentStore,
    resource: &ResourceSpec,
    key: &str,
    fields: Document,
) -> Result<(), AppError> {
    if key.trim().is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }
    update_matching(db, resource, doc! { resource.foreign_key: key }, fields).await
}

/// Mutação estreita do campo `status`, gravado como enviado. Status vazio ou
/// só com espaços é 400; sem mudança efetiva (id inexistente ou mesmo status) é 404.
pub async fn update_status(
    db: &dyn DocumentStore,
    resource: &ResourceSpec,
    id: &str,
    status: Option<&str>,
) -> Result<(), AppError> {
    let status = status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation("Status is required"))?;
    let object_id = parse_object_id(id)?;

    let outcome = db
        .update_one(resource.collection, doc! { "_id": object_id }, doc! { "status": status })
        .await?;

    if outcome.modified == 0 {
        return Err(AppError::not_found(format!("{} not found or status unchanged", resource.label)));
    }
    Ok(())
}

pub async fn delete(db: &dyn DocumentStore, resource: &ResourceSpec, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    if db.delete_one(resource.collection, doc! { "_id": object_id }).await? == 0 {
        return Err(not_found(resource));
    }
    Ok(())
}
