use actix_web::{web, HttpResponse};

use crate::{
    models::{CreatedResponse, FieldMap, MessageResponse, NomineeInfoStatus, NOMINEE_INFO},
    services::{
        completeness,
        resource_service::{self, ForeignKeyMatch},
    },
    state::AppState,
    utils::{
        json::{document_to_json, json_to_document, required_param},
        AppError,
    },
};

const USER_PHONE_REQUIRED: &str = "User phone number is required";

#[utoipa::path(
    get,
    path = "/NomineeInfo",
    tag = "NomineeInfo",
    responses((status = 200, description = "All nominees, newest first"))
)]
pub async fn list_nominees(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let docs = resource_service::list(state.store(), &NOMINEE_INFO).await?;
    let body: Vec<_> = docs.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/NomineeInfo/NomineeInfoExistCheck/{phone}",
    tag = "NomineeInfo",
    params(("phone" = String, Path, description = "User phone number")),
    responses(
        (status = 200, description = "Whether every nominee field is filled", body = NomineeInfoStatus),
        (status = 400, description = "Phone number is required")
    )
)]
pub async fn nominee_info_check(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, "Phone number is required")?;
    let nominee = resource_service::find_by_foreign_key(state.store(), &NOMINEE_INFO, phone).await?;

    Ok(HttpResponse::Ok().json(NomineeInfoStatus {
        nominee_info_submitted: completeness::nominee_info_complete(nominee.as_ref()),
    }))
}

#[utoipa::path(
    get,
    path = "/NomineeInfo/Phone/{phone}",
    tag = "NomineeInfo",
    params(("phone" = String, Path, description = "User phone number")),
    responses(
        (status = 200, description = "Nominee document"),
        (status = 400, description = "User phone number is required"),
        (status = 404, description = "Nominee not found")
    )
)]
pub async fn get_nominee_by_phone(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, USER_PHONE_REQUIRED)?;

    match resource_service::get_by_foreign_key(state.store(), &NOMINEE_INFO, phone).await? {
        ForeignKeyMatch::One(doc) => Ok(HttpResponse::Ok().json(document_to_json(doc))),
        ForeignKeyMatch::Many(docs) => docs
            .into_iter()
            .next()
            .map(|doc| HttpResponse::Ok().json(document_to_json(doc)))
            .ok_or_else(|| AppError::not_found("Nominee not found")),
    }
}

#[utoipa::path(
    get,
    path = "/NomineeInfo/{id}",
    tag = "NomineeInfo",
    params(("id" = String, Path, description = "Nominee ObjectId")),
    responses(
        (status = 200, description = "Nominee document"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Nominee not found")
    )
)]
pub async fn get_nominee(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let doc = resource_service::get_by_id(state.store(), &NOMINEE_INFO, &path).await?;
    Ok(HttpResponse::Ok().json(document_to_json(doc)))
}

#[utoipa::path(
    post,
    path = "/NomineeInfo",
    tag = "NomineeInfo",
    request_body = FieldMap,
    responses(
        (status = 201, description = "Nominee created", body = CreatedResponse),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_nominee(state: web::Data<AppState>, body: web::Json<FieldMap>) -> Result<HttpResponse, AppError> {
    let document = json_to_document(body.into_inner().0)?;
    let id = resource_service::create(state.store(), &NOMINEE_INFO, document).await?;
    log::info!("👤 Nominee created: {}", id);
    Ok(HttpResponse::Created().json(CreatedResponse::new("Nominee created", id)))
}

#[utoipa::path(
    put,
    path = "/NomineeInfo/Phone/{phone}",
    tag = "NomineeInfo",
    params(("phone" = String, Path, description = "User phone number")),
    request_body = FieldMap,
    responses(
        (status = 200, description = "Nominee updated", body = MessageResponse),
        (status = 400, description = "User phone number is required"),
        (status = 404, description = "Nominee not found")
    )
)]
pub async fn update_nominee_by_phone(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, USER_PHONE_REQUIRED)?;
    let fields = json_to_document(body.into_inner().0)?;

    resource_service::update_by_foreign_key(state.store(), &NOMINEE_INFO, phone, fields).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Nominee data updated successfully")))
}

#[utoipa::path(
    put,
    path = "/NomineeInfo/{id}",
    tag = "NomineeInfo",
    params(("id" = String, Path, description = "Nominee ObjectId")),
    request_body = FieldMap,
    responses(
        (status = 200, description = "Nominee updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or empty update"),
        (status = 404, description = "Nominee not found")
    )
)]
pub async fn update_nominee(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let fields = json_to_document(body.into_inner().0)?;
    resource_service::update(state.store(), &NOMINEE_INFO, &path, fields).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/NomineeInfo/{id}",
    tag = "NomineeInfo",
    params(("id" = String, Path, description = "Nominee ObjectId")),
    responses(
        (status = 200, description = "Nominee deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Nominee not found")
    )
)]
pub async fn delete_nominee(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    resource_service::delete(state.store(), &NOMINEE_INFO, &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Deleted successfully")))
}
