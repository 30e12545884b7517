use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microfinance Back-Office API",
        version = "1.0.0",
        description = "Users, nominee info and loan requests for the onboarding front-end.\n\n**Authentication:** none. Routes are open; deploy behind a trusted network boundary."
    ),
    paths(
        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::register,
        crate::api::users::login,
        crate::api::users::get_user_by_phone,
        crate::api::users::update_user_by_phone,
        crate::api::users::get_name_by_phone,
        crate::api::users::basic_info_check,
        crate::api::users::bank_info_check,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Loan requests
        crate::api::loan_requests::list_loan_requests,
        crate::api::loan_requests::get_loan_requests_by_phone,
        crate::api::loan_requests::get_loan_request,
        crate::api::loan_requests::create_loan_request,
        crate::api::loan_requests::update_loan_request_status,
        crate::api::loan_requests::update_loan_request,
        crate::api::loan_requests::delete_loan_request,

        // Nominees
        crate::api::nominees::list_nominees,
        crate::api::nominees::nominee_info_check,
        crate::api::nominees::get_nominee_by_phone,
        crate::api::nominees::get_nominee,
        crate::api::nominees::create_nominee,
        crate::api::nominees::update_nominee_by_phone,
        crate::api::nominees::update_nominee,
        crate::api::nominees::delete_nominee,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::LoginResponse,
            crate::models::NameResponse,
            crate::models::BasicInfoStatus,
            crate::models::BankInfoStatus,
            crate::models::NomineeInfoStatus,
            crate::models::StatusUpdateRequest,
            crate::models::FieldMap,
            crate::models::MessageResponse,
            crate::models::CreatedResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, phone lookups and onboarding completeness checks."),
        (name = "LoanRequest", description = "Loan requests keyed by borrower phone. `status` is free text."),
        (name = "NomineeInfo", description = "Nominee records keyed by `user_phone`."),
        (name = "Health", description = "Liveness and store reachability."),
    )
)]
pub struct ApiDoc;
