use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;
use crate::models::{Role, User};
use crate::services::{InsertResponse, UpdateResponse};
use crate::utils::error::AppError;

const USERS_COLLECTION: &str = "users";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Body shared by the promotion routes; role values outside the enum are
/// rejected at deserialization.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PromoteRoleRequest {
    pub role: Role,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

pub async fn create_user(
    db: &MongoDB,
    request: CreateUserRequest,
) -> Result<InsertResponse, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "email must not be empty".to_string(),
        ));
    }

    let user = User {
        id: None,
        email: request.email,
        name: request.name,
        photo: request.photo,
        role: request.role,
        updated: None,
    };

    let result = db
        .collection::<User>(USERS_COLLECTION)
        .insert_one(&user)
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

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    find_users(db, doc! {}).await
}

pub async fn list_instructors(db: &MongoDB) -> Result<Vec<User>, AppError> {
    find_users(db, doc! { "role": Role::Instructor.as_str() }).await
}

async fn find_users(db: &MongoDB, filter: Document) -> Result<Vec<User>, AppError> {
    let mut cursor = db
        .collection::<User>(USERS_COLLECTION)
        .find(filter)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::warn!("⚠️ Skipping undecodable user document: {}", e),
        }
    }

    Ok(users)
}

/// True only when the stored role is exactly "admin". Raw-document read so
/// documents with out-of-vocabulary roles still answer false instead of
/// failing to decode.
pub async fn is_admin(db: &MongoDB, email: &str) -> Result<bool, AppError> {
    let user = db
        .collection::<Document>(USERS_COLLECTION)
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(user
        .and_then(|document| document.get_str("role").ok().map(|role| role == "admin"))
        .unwrap_or(false))
}

pub async fn update_user_role(
    db: &MongoDB,
    id: &str,
    request: PromoteRoleRequest,
) -> Result<UpdateResponse, AppError> {
    let object_id = ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidId(format!("Invalid user id: {}", id)))?;

    let updated = request
        .updated
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    let update = doc! {
        "$set": {
            "role": request.role.as_str(),
            "updated": updated,
        }
    };

    let result = db
        .collection::<User>(USERS_COLLECTION)
        .update_one(doc! { "_id": object_id }, update)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(UpdateResponse {
        success: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    })
}
