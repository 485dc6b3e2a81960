use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::enrollment::deserialize_payment_flag;
use crate::models::Enrollment;
use crate::services::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::utils::error::AppError;

const ENROLLMENTS_COLLECTION: &str = "userClasses";

/// Enrollment as the client submits it. The payment flag is not accepted
/// from the caller - every enrollment starts unpaid.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub class_id: String,
    pub class_name: String,
    #[serde(default)]
    pub class_image: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub email: String,
}

/// Confirmation body written once per enrollment. Accepts the legacy
/// "true"/"false" string encoding of the flag.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(deserialize_with = "deserialize_payment_flag")]
    pub payment: bool,
    pub transaction_id: String,
    pub date: String,
}

pub async fn create_enrollment(
    db: &MongoDB,
    request: CreateEnrollmentRequest,
) -> Result<InsertResponse, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "email must not be empty".to_string(),
        ));
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "Invalid price: {}",
            request.price
        )));
    }

    let enrollment = Enrollment {
        id: None,
        class_id: request.class_id,
        class_name: request.class_name,
        class_image: request.class_image,
        instructor: request.instructor,
        price: request.price,
        email: request.email,
        payment: false,
        transaction_id: None,
        date: None,
    };

    let result = db
        .collection::<Enrollment>(ENROLLMENTS_COLLECTION)
        .insert_one(&enrollment)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    Ok(InsertResponse {
        success: true,
        inserted_id,
    })
}

pub async fn list_enrollments(db: &MongoDB) -> Result<Vec<Enrollment>, AppError> {
    find_enrollments(db, doc! {}).await
}

/// Pending selections for a user, shown until payment clears
pub async fn list_unpaid(db: &MongoDB, email: &str) -> Result<Vec<Enrollment>, AppError> {
    // Legacy documents stored the flag as a string
    find_enrollments(db, doc! { "email": email, "payment": { "$in": [false, "false"] } }).await
}

pub async fn list_paid(db: &MongoDB, email: &str) -> Result<Vec<Enrollment>, AppError> {
    find_enrollments(db, doc! { "email": email, "payment": { "$in": [true, "true"] } }).await
}

async fn find_enrollments(db: &MongoDB, filter: Document) -> Result<Vec<Enrollment>, AppError> {
    let mut cursor = db
        .collection::<Enrollment>(ENROLLMENTS_COLLECTION)
        .find(filter)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut enrollments = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(enrollment) => enrollments.push(enrollment),
            Err(e) => log::warn!("⚠️ Skipping undecodable enrollment document: {}", e),
        }
    }

    Ok(enrollments)
}

/// Marks an enrollment paid and records the transaction. The unpaid -> paid
/// transition is the only one allowed; there is no route that reverts it.
pub async fn confirm_payment(
    db: &MongoDB,
    id: &str,
    request: ConfirmPaymentRequest,
) -> Result<UpdateResponse, AppError> {
    let object_id = ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidId(format!("Invalid enrollment id: {}", id)))?;

    if !request.payment {
        return Err(AppError::InvalidRequest(
            "payment can only transition to paid".to_string(),
        ));
    }

    let update = doc! {
        "$set": {
            "payment": true,
            "transactionId": &request.transaction_id,
            "date": &request.date,
        }
    };

    let result = db
        .collection::<Enrollment>(ENROLLMENTS_COLLECTION)
        .update_one(doc! { "_id": object_id }, update)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(UpdateResponse {
        success: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}

pub async fn delete_enrollment(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let object_id = ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidId(format!("Invalid enrollment id: {}", id)))?;

    let result = db
        .collection::<Enrollment>(ENROLLMENTS_COLLECTION)
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(DeleteResponse {
        success: true,
        deleted_count: result.deleted_count,
    })
}
