use mongodb::bson::{doc, Bson, DateTime, Document};

use crate::{
    database::{DocumentStore, StoreError, USERS},
    models::{RegisterRequest, LoginRequest, VerifiedUser, ADMIN_ROLE, PROTECTED_FIELDS},
    services::completeness,
    utils::{
        json::parse_object_id,
        password::{hash_password, verify_password},
        AppError,
    },
};

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Senha vai para o bcrypt exatamente como enviada
fn required_password(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn conflict_on_duplicate(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::Conflict("Phone number already registered".to_string()),
        other => AppError::Store(other),
    }
}

/// Remove o hash antes de devolver o documento a um cliente
pub fn without_password(mut user: Document) -> Document {
    user.remove("password");
    user
}

/// Cadastro: nome, telefone e senha obrigatórios; telefone único.
pub async fn register(
    db: &dyn DocumentStore,
    request: &RegisterRequest,
    bcrypt_cost: u32,
) -> Result<String, AppError> {
    let (Some(name), Some(phone), Some(password)) = (
        required(&request.name),
        required(&request.phone),
        required_password(&request.password),
    ) else {
        return Err(AppError::validation("Name, phone, and password are required"));
    };

    if db.find_one(USERS, doc! { "phone": phone }).await?.is_some() {
        return Err(AppError::Conflict("Phone number already registered".to_string()));
    }

    let hashed = hash_password(password, bcrypt_cost).await?;
    let now = DateTime::now();

    // o índice único cobre a corrida entre a checagem acima e o insert
    let id = db
        .insert_one(
            USERS,
            doc! {
                "name": name,
                "phone": phone,
                "password": hashed,
                "created_at": now,
            },
        )
        .await
        .map_err(conflict_on_duplicate)?;

    Ok(id.to_hex())
}

pub async fn verify_credentials(db: &dyn DocumentStore, request: &LoginRequest) -> Result<VerifiedUser, AppError> {
    let (Some(phone), Some(password)) = (required(&request.phone), required_password(&request.password)) else {
        return Err(AppError::validation("Phone and password are required"));
    };

    let user = db
        .find_one(USERS, doc! { "phone": phone })
        .await?
        .ok_or_else(|| AppError::not_found("No match found"))?;

    let stored = user.get_str("password").unwrap_or_default();
    if stored.is_empty() || !verify_password(password, stored).await? {
        return Err(AppError::Auth("Password doesn't match".to_string()));
    }

    let role = match user.get_str("role") {
        Ok(role) if role == ADMIN_ROLE => Some(ADMIN_ROLE.to_string()),
        _ => None,
    };

    Ok(VerifiedUser {
        phone: phone.to_string(),
        role,
    })
}

pub async fn list(db: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    let users = db.find_many(USERS, doc! {}, None).await?;
    Ok(users.into_iter().map(without_password).collect())
}

pub async fn find_by_phone(db: &dyn DocumentStore, phone: &str) -> Result<Document, AppError> {
    db.find_one(USERS, doc! { "phone": phone })
        .await?
        .map(without_password)
        .ok_or_else(|| AppError::not_found("User not found"))
}

pub async fn find_by_id(db: &dyn DocumentStore, id: &str) -> Result<Document, AppError> {
    let object_id = parse_object_id(id)?;
    db.find_one(USERS, doc! { "_id": object_id })
        .await?
        .map(without_password)
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// Sem cadastro para o telefone devolve `None`, não erro.
pub async fn find_name_by_phone(db: &dyn DocumentStore, phone: &str) -> Result<Option<String>, AppError> {
    let user = db.find_one(USERS, doc! { "phone": phone }).await?;
    Ok(user.and_then(|u| u.get_str("name").ok().map(str::to_string)))
}

/// Limpa campos protegidos, re-hasheia a senha e carimba `updated_at`.
async fn prepare_user_update(mut fields: Document, bcrypt_cost: u32) -> Result<Document, AppError> {
    for key in PROTECTED_FIELDS {
        fields.remove(*key);
    }

    if fields.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    if fields.contains_key("password") {
        let plain = match fields.get("password") {
            Some(Bson::String(p)) if !p.is_empty() => p.clone(),
            _ => return Err(AppError::validation("Password must be a non-empty string")),
        };
        fields.insert("password", hash_password(&plain, bcrypt_cost).await?);
    }

    if fields.contains_key("phone") {
        match fields.get("phone") {
            Some(Bson::String(p)) if !p.trim().is_empty() => {
                let phone = p.trim().to_string();
                fields.insert("phone", phone);
            }
            _ => return Err(AppError::validation("Phone number cannot be empty")),
        }
    }

    fields.insert("updated_at", DateTime::now());
    Ok(fields)
}

async fn update_user(
    db: &dyn DocumentStore,
    filter: Document,
    fields: Document,
    bcrypt_cost: u32,
) -> Result<(), AppError> {
    let fields = prepare_user_update(fields, bcrypt_cost).await?;
    let outcome = db
        .update_one(USERS, filter, fields)
        .await
        .map_err(conflict_on_duplicate)?;

    if outcome.matched == 0 {
        return Err(AppError::not_found("User not found"));
    }
    Ok(())
}

pub async fn update_by_phone(
    db: &dyn DocumentStore,
    phone: &str,
    fields: Document,
    bcrypt_cost: u32,
) -> Result<(), AppError> {
    update_user(db, doc! { "phone": phone }, fields, bcrypt_cost).await
}

pub async fn update_by_id(
    db: &dyn DocumentStore,
    id: &str,
    fields: Document,
    bcrypt_cost: u32,
) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    update_user(db, doc! { "_id": object_id }, fields, bcrypt_cost).await
}

pub async fn delete_by_id(db: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
    let object_id = parse_object_id(id)?;
    if db.delete_one(USERS, doc! { "_id": object_id }).await? == 0 {
        return Err(AppError::not_found("User not found"));
    }
    Ok(())
}

pub async fn basic_info_submitted(db: &dyn DocumentStore, phone: &str) -> Result<bool, AppError> {
    let user = db.find_one(USERS, doc! { "phone": phone }).await?;
    Ok(completeness::basic_info_complete(user.as_ref()))
}

pub async fn bank_info_submitted(db: &dyn DocumentStore, phone: &str) -> Result<bool, AppError> {
    let user = db.find_one(USERS, doc! { "phone": phone }).await?;
    Ok(completeness::bank_info_complete(user.as_ref()))
}
