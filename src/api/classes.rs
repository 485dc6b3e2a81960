use actix_web::{web, HttpResponse, Responder};

use crate::database::MongoDB;
use crate::services::class_service;

/// GET /classes - Catalog sorted by enrollment count, most popular first
pub async fn list_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::list_classes(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => {
            log::error!("❌ Error listing classes: {}", e);
            e.to_response()
        }
    }
}
