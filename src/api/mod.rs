use actix_web::web;

use crate::utils::AppError;

/// App de teste com as rotas reais sobre o `AppState` informado
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(crate::api::configure),
        )
        .await
    };
}

pub mod health;
pub mod loan_requests;
pub mod nominees;
pub mod swagger;
pub mod users;

/// Registra todas as rotas. Rotas literais (`/Phone/..`, `/Status/..`)
/// vêm antes das rotas `/{id}` de cada escopo.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::validation(format!("Invalid JSON body: {}", err)).into()),
    )
    .route("/", web::get().to(health::root))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/Users")
            .route("", web::get().to(users::list_users))
            .route("", web::post().to(users::register))
            .route("/Login", web::post().to(users::login))
            .route("/login", web::post().to(users::login))
            .route("/Phone/{phone}", web::get().to(users::get_user_by_phone))
            .route("/Phone/{phone}", web::put().to(users::update_user_by_phone))
            .route("/Name/{phone}", web::get().to(users::get_name_by_phone))
            .route("/BasicInfoExistCheck/{phone}", web::get().to(users::basic_info_check))
            .route("/BankInfoExistCheck/{phone}", web::get().to(users::bank_info_check))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    )
    .service(
        web::scope("/LoanRequest")
            .route("", web::get().to(loan_requests::list_loan_requests))
            .route("", web::post().to(loan_requests::create_loan_request))
            .route("/Phone/{phone}", web::get().to(loan_requests::get_loan_requests_by_phone))
            .route("/Status/{id}", web::put().to(loan_requests::update_loan_request_status))
            .route("/{id}", web::get().to(loan_requests::get_loan_request))
            .route("/{id}", web::put().to(loan_requests::update_loan_request))
            .route("/{id}", web::delete().to(loan_requests::delete_loan_request)),
    )
    .service(
        web::scope("/NomineeInfo")
            .route("", web::get().to(nominees::list_nominees))
            .route("", web::post().to(nominees::create_nominee))
            .route("/NomineeInfoExistCheck/{phone}", web::get().to(nominees::nominee_info_check))
            .route("/Phone/{phone}", web::get().to(nominees::get_nominee_by_phone))
            .route("/Phone/{phone}", web::put().to(nominees::update_nominee_by_phone))
            .route("/{id}", web::get().to(nominees::get_nominee))
            .route("/{id}", web::put().to(nominees::update_nominee))
            .route("/{id}", web::delete().to(nominees::delete_nominee)),
    );
}

#[cfg(test)]
pub fn test_state() -> crate::state::AppState {
    use crate::database::memory::MemoryStore;
    use std::sync::Arc;

    crate::state::AppState::new(Arc::new(MemoryStore::new()), 4)
}
