use serde::{Deserialize, Serialize};

/// Único valor de `role` reconhecido
pub const ADMIN_ROLE: &str = "admin";

/// Etapa "informações básicas" do cadastro (documento Users)
pub const BASIC_INFO_FIELDS: &[&str] = &[
    "name",
    "father_name",
    "mother_name",
    "nid",
    "blood_group",
    "permanent_address",
    "temporary_address",
    "job",
    "nid_front",
    "nid_back",
    "passport_photo",
    "signature",
];

/// Lista de contas bancárias no documento Users
pub const BANK_INFO_FIELD: &str = "bank_info";

/// Campos que nunca são alterados por update parcial
pub const PROTECTED_FIELDS: &[&str] = &["_id", "role"];

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Resultado de `verify_credentials`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub phone: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<VerifiedUser> for LoginResponse {
    fn from(user: VerifiedUser) -> Self {
        LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Vazio (`{}`) quando o telefone não está cadastrado
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NameResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoStatus {
    pub basic_info_submitted: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankInfoStatus {
    pub bank_info_submitted: bool,
}
