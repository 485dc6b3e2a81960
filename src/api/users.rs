use actix_web::{web, HttpResponse, Responder};

use crate::database::MongoDB;
use crate::services::user_service::{self, AdminCheckResponse, CreateUserRequest, PromoteRoleRequest};

/// POST /users - Records a signup
pub async fn create_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> impl Responder {
    log::info!("📝 POST /users - Creating user {}", request.email);

    match user_service::create_user(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            e.to_response()
        }
    }
}

/// GET /users - Full account listing for the dashboard
pub async fn list_users(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            e.to_response()
        }
    }
}

/// GET /instructors - Public instructor directory
pub async fn list_instructors(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_instructors(&db).await {
        Ok(instructors) => HttpResponse::Ok().json(instructors),
        Err(e) => {
            log::error!("❌ Error listing instructors: {}", e);
            e.to_response()
        }
    }
}

/// GET /users/admin/{email} - Whether the stored role is exactly admin
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "Account email to check")
    ),
    responses(
        (status = 200, description = "Admin flag for the account", body = AdminCheckResponse)
    )
)]
pub async fn check_admin(path: web::Path<String>, db: web::Data<MongoDB>) -> impl Responder {
    let email = path.into_inner();

    match user_service::is_admin(&db, &email).await {
        Ok(admin) => HttpResponse::Ok().json(AdminCheckResponse { admin }),
        Err(e) => {
            log::error!("❌ Error checking admin role for {}: {}", email, e);
            e.to_response()
        }
    }
}

/// PATCH /makeadmin/{id} and /makeinstructor/{id} - Promotes an account to
/// the role carried in the body. Both routes share this handler; neither
/// checks the caller's own role (matching the deployed contract - see
/// DESIGN.md).
pub async fn update_role(
    path: web::Path<String>,
    db: web::Data<MongoDB>,
    request: web::Json<PromoteRoleRequest>,
) -> impl Responder {
    let id = path.into_inner();
    log::info!("🔧 PATCH promotion - Setting {} to {}", id, request.role.as_str());

    match user_service::update_user_role(&db, &id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error updating role for {}: {}", id, e);
            e.to_response()
        }
    }
}
