use actix_web::{web, HttpResponse};

use crate::{
    models::{CreatedResponse, FieldMap, MessageResponse, StatusUpdateRequest, LOAN_REQUEST},
    services::resource_service::{self, ForeignKeyMatch},
    state::AppState,
    utils::{
        json::{document_to_json, json_to_document, required_param},
        AppError,
    },
};

#[utoipa::path(
    get,
    path = "/LoanRequest",
    tag = "LoanRequest",
    responses((status = 200, description = "All loan requests"))
)]
pub async fn list_loan_requests(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let docs = resource_service::list(state.store(), &LOAN_REQUEST).await?;
    let body: Vec<_> = docs.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/LoanRequest/Phone/{phone}",
    tag = "LoanRequest",
    params(("phone" = String, Path, description = "Borrower phone number")),
    responses(
        (status = 200, description = "Loan requests for the phone, possibly empty"),
        (status = 400, description = "Phone number is required")
    )
)]
pub async fn get_loan_requests_by_phone(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, "Phone number is required")?;

    let docs = match resource_service::get_by_foreign_key(state.store(), &LOAN_REQUEST, phone).await? {
        ForeignKeyMatch::Many(docs) => docs,
        ForeignKeyMatch::One(doc) => vec![doc],
    };
    let body: Vec<_> = docs.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/LoanRequest/{id}",
    tag = "LoanRequest",
    params(("id" = String, Path, description = "Loan request ObjectId")),
    responses(
        (status = 200, description = "Loan request document"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Loan request not found")
    )
)]
pub async fn get_loan_request(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let doc = resource_service::get_by_id(state.store(), &LOAN_REQUEST, &path).await?;
    Ok(HttpResponse::Ok().json(document_to_json(doc)))
}

#[utoipa::path(
    post,
    path = "/LoanRequest",
    tag = "LoanRequest",
    request_body = FieldMap,
    responses(
        (status = 201, description = "Loan request created", body = CreatedResponse),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_loan_request(
    state: web::Data<AppState>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let document = json_to_document(body.into_inner().0)?;
    let id = resource_service::create(state.store(), &LOAN_REQUEST, document).await?;
    log::info!("💰 Loan request created: {}", id);
    Ok(HttpResponse::Created().json(CreatedResponse::new("Loan request created", id)))
}

#[utoipa::path(
    put,
    path = "/LoanRequest/Status/{id}",
    tag = "LoanRequest",
    params(("id" = String, Path, description = "Loan request ObjectId")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Status is required"),
        (status = 404, description = "Loan request not found or status unchanged")
    )
)]
pub async fn update_loan_request_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let status = body.status.as_deref();
    log::info!("🔄 PUT /LoanRequest/Status/{} - status: {}", path.as_str(), status.unwrap_or("N/A"));

    resource_service::update_status(state.store(), &LOAN_REQUEST, &path, status).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Status updated successfully")))
}

#[utoipa::path(
    put,
    path = "/LoanRequest/{id}",
    tag = "LoanRequest",
    params(("id" = String, Path, description = "Loan request ObjectId")),
    request_body = FieldMap,
    responses(
        (status = 200, description = "Loan request updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or empty update"),
        (status = 404, description = "Loan request not found")
    )
)]
pub async fn update_loan_request(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let fields = json_to_document(body.into_inner().0)?;
    resource_service::update(state.store(), &LOAN_REQUEST, &path, fields).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Loan request updated")))
}

#[utoipa::path(
    delete,
    path = "/LoanRequest/{id}",
    tag = "LoanRequest",
    params(("id" = String, Path, description = "Loan request ObjectId")),
    responses(
        (status = 200, description = "Loan request deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Loan request not found")
    )
)]
pub async fn delete_loan_request(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    resource_service::delete(state.store(), &LOAN_REQUEST, &path).await?;
    log::info!("🗑️  Loan request deleted: {}", path.as_str());
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Loan request deleted")))
}
