use actix_web::{web, HttpResponse};

use crate::{
    models::{
        BankInfoStatus, BasicInfoStatus, CreatedResponse, FieldMap, LoginRequest, LoginResponse,
        MessageResponse, NameResponse, RegisterRequest,
    },
    services::identity_service,
    state::AppState,
    utils::{
        json::{document_to_json, json_to_document, required_param},
        AppError,
    },
};

const PHONE_REQUIRED: &str = "Phone number is required";

#[utoipa::path(
    get,
    path = "/Users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, without password hashes")
    )
)]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = identity_service::list(state.store()).await?;
    let body: Vec<_> = users.into_iter().map(document_to_json).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/Users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User document"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let user = identity_service::find_by_id(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(document_to_json(user)))
}

#[utoipa::path(
    post,
    path = "/Users",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = CreatedResponse),
        (status = 400, description = "Name, phone, and password are required"),
        (status = 409, description = "Phone number already registered")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let phone = request.phone.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /Users - phone: {}", phone);

    match identity_service::register(state.store(), &request, state.bcrypt_cost).await {
        Ok(id) => {
            log::info!("✅ User registered: {}", phone);
            Ok(HttpResponse::Created().json(CreatedResponse::new("User added successfully", id)))
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", phone, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/Users/Login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Phone and password are required"),
        (status = 401, description = "Password doesn't match"),
        (status = 404, description = "No match found")
    )
)]
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    let phone = request.phone.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /Users/Login - phone: {}", phone);

    match identity_service::verify_credentials(state.store(), &request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", phone);
            Ok(HttpResponse::Ok().json(LoginResponse::from(user)))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", phone, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/Users/Phone/{phone}",
    tag = "Users",
    params(("phone" = String, Path, description = "Registered phone number")),
    responses(
        (status = 200, description = "User document"),
        (status = 400, description = "Phone number is required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_phone(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, PHONE_REQUIRED)?;
    let user = identity_service::find_by_phone(state.store(), phone).await?;
    Ok(HttpResponse::Ok().json(document_to_json(user)))
}

#[utoipa::path(
    put,
    path = "/Users/Phone/{phone}",
    tag = "Users",
    params(("phone" = String, Path, description = "Registered phone number")),
    request_body = FieldMap,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Missing phone or empty update"),
        (status = 404, description = "User not found"),
        (status = 409, description = "New phone belongs to another user")
    )
)]
pub async fn update_user_by_phone(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, PHONE_REQUIRED)?;
    log::info!("✏️  PUT /Users/Phone/{}", phone);

    let fields = json_to_document(body.into_inner().0)?;
    identity_service::update_by_phone(state.store(), phone, fields, state.bcrypt_cost).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("User updated successfully")))
}

#[utoipa::path(
    get,
    path = "/Users/Name/{phone}",
    tag = "Users",
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "`{ name }`, or `{}` when the phone is unknown", body = NameResponse),
        (status = 400, description = "Phone number is required")
    )
)]
pub async fn get_name_by_phone(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, PHONE_REQUIRED)?;
    let name = identity_service::find_name_by_phone(state.store(), phone).await?;
    Ok(HttpResponse::Ok().json(NameResponse { name }))
}

#[utoipa::path(
    get,
    path = "/Users/BasicInfoExistCheck/{phone}",
    tag = "Users",
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Whether every basic info field is filled", body = BasicInfoStatus),
        (status = 400, description = "Phone number is required")
    )
)]
pub async fn basic_info_check(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, PHONE_REQUIRED)?;
    let basic_info_submitted = identity_service::basic_info_submitted(state.store(), phone).await?;
    Ok(HttpResponse::Ok().json(BasicInfoStatus { basic_info_submitted }))
}

#[utoipa::path(
    get,
    path = "/Users/BankInfoExistCheck/{phone}",
    tag = "Users",
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Whether bank info holds at least one complete entry", body = BankInfoStatus),
        (status = 400, description = "Phone number is required")
    )
)]
pub async fn bank_info_check(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let phone = required_param(&path, PHONE_REQUIRED)?;
    let bank_info_submitted = identity_service::bank_info_submitted(state.store(), phone).await?;
    Ok(HttpResponse::Ok().json(BankInfoStatus { bank_info_submitted }))
}

#[utoipa::path(
    put,
    path = "/Users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = FieldMap,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or empty update"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<FieldMap>,
) -> Result<HttpResponse, AppError> {
    let fields = json_to_document(body.into_inner().0)?;
    identity_service::update_by_id(state.store(), &path, fields, state.bcrypt_cost).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/Users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /Users/{}", path.as_str());
    identity_service::delete_by_id(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::api::test_state;

    #[actix_web::test]
    async fn register_and_login_scenario() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users")
            .set_json(json!({ "name": "A", "phone": "123", "password": "p" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"].as_str().map(str::len), Some(24));

        let req = test::TestRequest::post()
            .uri("/Users/Login")
            .set_json(json!({ "phone": "123", "password": "p" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["phone"], "123");
        assert!(body.get("role").is_none());

        let req = test::TestRequest::post()
            .uri("/Users/Login")
            .set_json(json!({ "phone": "123", "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn registration_errors() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users")
            .set_json(json!({ "name": "A", "phone": "123" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/Users")
                .set_json(json!({ "name": "A", "phone": "123", "password": "p" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }

        let req = test::TestRequest::get().uri("/Users").to_request();
        let users: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(users.as_array().map(Vec::len), Some(1));
        assert!(users[0].get("password").is_none());
    }

    #[actix_web::test]
    async fn login_lookup_failures() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users/login")
            .set_json(json!({ "phone": "404" , "password": "p" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/Users/Login")
            .set_json(json!({ "phone": "404" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Phone and password are required");
    }

    #[actix_web::test]
    async fn malformed_json_is_a_json_400() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn phone_routes_and_onboarding_checks() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users")
            .set_json(json!({ "name": "Rahim", "phone": "123", "password": "p" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/Users/Phone/123").to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user["name"], "Rahim");
        assert!(user.get("password").is_none());

        let req = test::TestRequest::get().uri("/Users/Phone/999").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/Users/Phone/%20").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/Users/Name/999").to_request();
        let name: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(name, json!({}));

        let req = test::TestRequest::get().uri("/Users/BasicInfoExistCheck/123").to_request();
        let check: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check, json!({ "basicInfoSubmitted": false }));

        let basic = json!({
            "father_name": "F", "mother_name": "M", "nid": "1990", "blood_group": "O+",
            "permanent_address": "Dhaka", "temporary_address": "Dhaka", "job": "farmer",
            "nid_front": "front.png", "nid_back": "back.png", "passport_photo": "me.png",
            "signature": "sig.png",
            "bank_info": [{ "bank_name": "Sonali", "account_no": "42" }]
        });
        let req = test::TestRequest::put().uri("/Users/Phone/123").set_json(basic).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/Users/BasicInfoExistCheck/123").to_request();
        let check: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check, json!({ "basicInfoSubmitted": true }));

        let req = test::TestRequest::get().uri("/Users/BankInfoExistCheck/123").to_request();
        let check: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check, json!({ "bankInfoSubmitted": true }));

        let req = test::TestRequest::put()
            .uri("/Users/Phone/999")
            .set_json(json!({ "job": "x" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn id_routes() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/Users")
            .set_json(json!({ "name": "A", "phone": "123", "password": "p" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri(&format!("/Users/{}", id)).to_request();
        let user: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user["_id"], id.as_str());

        let req = test::TestRequest::put()
            .uri(&format!("/Users/{}", id))
            .set_json(json!({ "job": "teacher" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/Users/not-an-id").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri(&format!("/Users/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri(&format!("/Users/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
