pub mod completeness;
pub mod identity_service;
pub mod resource_service;
