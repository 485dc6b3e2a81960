pub mod auth_service;
pub mod class_service;
pub mod enrollment_service;
pub mod payment_service;
pub mod user_service;

use serde::Serialize;

/// Driver counts surfaced to the caller after an insert
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsertResponse {
    pub success: bool,
    pub inserted_id: String,
}

/// Driver counts surfaced after a field-level update
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateResponse {
    pub success: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Driver counts surfaced after a delete. Deleting a missing id is a
/// zero-effect success, not an error.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}
