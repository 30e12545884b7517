use serde::Serialize;

use super::resource::{ForeignKeyMiss, ResourceSpec};
use crate::database;

pub const NOMINEE_INFO: ResourceSpec = ResourceSpec {
    collection: database::NOMINEE_INFO,
    label: "Nominee",
    required_fields: &["nominee_name", "nominee_phone", "relation", "nominee_nid", "user_phone"],
    foreign_key: "user_phone",
    foreign_key_miss: ForeignKeyMiss::NotFound,
    timestamps: true,
    newest_first: true,
};

/// Etapa "indicado" do cadastro, avaliada no documento NomineeInfo
pub const NOMINEE_INFO_FIELDS: &[&str] = &[
    "nominee_name",
    "nominee_phone",
    "relation",
    "nominee_nid",
    "nominee_nid_front",
    "nominee_nid_back",
    "nominee_passport_photo",
];

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NomineeInfoStatus {
    pub nominee_info_submitted: bool,
}
