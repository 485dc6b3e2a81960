use actix_web::{web, HttpResponse, Responder};

use crate::database::MongoDB;
use crate::services::auth_service::SessionClaims;
use crate::services::enrollment_service::{self, CreateEnrollmentRequest};

/// POST /userclasses - Records a class selection for the authenticated caller
pub async fn create_enrollment(
    claims: web::ReqData<SessionClaims>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateEnrollmentRequest>,
) -> impl Responder {
    let claimed = claims.email.as_deref().unwrap_or("unknown");
    log::info!(
        "📝 POST /userclasses - {} selecting {}",
        claimed,
        request.class_name
    );

    match enrollment_service::create_enrollment(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating enrollment: {}", e);
            e.to_response()
        }
    }
}

/// GET /userclasses - All enrollments, paid and unpaid
pub async fn list_enrollments(
    claims: web::ReqData<SessionClaims>,
    db: web::Data<MongoDB>,
) -> impl Responder {
    log::info!(
        "📋 GET /userclasses - Listing for {}",
        claims.email.as_deref().unwrap_or("unknown")
    );

    match enrollment_service::list_enrollments(&db).await {
        Ok(enrollments) => HttpResponse::Ok().json(enrollments),
        Err(e) => {
            log::error!("❌ Error listing enrollments: {}", e);
            e.to_response()
        }
    }
}

/// GET /userclasses/{email} - Pending (unpaid) selections for an email
pub async fn list_unpaid(
    _claims: web::ReqData<SessionClaims>,
    path: web::Path<String>,
    db: web::Data<MongoDB>,
) -> impl Responder {
    let email = path.into_inner();

    match enrollment_service::list_unpaid(&db, &email).await {
        Ok(enrollments) => HttpResponse::Ok().json(enrollments),
        Err(e) => {
            log::error!("❌ Error listing unpaid enrollments for {}: {}", email, e);
            e.to_response()
        }
    }
}

/// DELETE /deleteclass/{id} - Drops a selection; deleting an id that is
/// already gone reports deleted_count 0
pub async fn delete_enrollment(path: web::Path<String>, db: web::Data<MongoDB>) -> impl Responder {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /deleteclass/{}", id);

    match enrollment_service::delete_enrollment(&db, &id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error deleting enrollment {}: {}", id, e);
            e.to_response()
        }
    }
}
