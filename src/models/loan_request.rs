use serde::Deserialize;

use super::resource::{ForeignKeyMiss, ResourceSpec};
use crate::database;

pub const LOAN_REQUEST: ResourceSpec = ResourceSpec {
    collection: database::LOAN_REQUEST,
    label: "Loan request",
    required_fields: &["phone", "loan_type", "loan_amount"],
    foreign_key: "phone",
    foreign_key_miss: ForeignKeyMiss::EmptyList,
    timestamps: false,
    newest_first: false,
};

/// `status` é texto livre; nenhuma transição é validada.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}
