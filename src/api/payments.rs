use actix_web::{web, HttpResponse, Responder};

use crate::database::MongoDB;
use crate::services::enrollment_service::{self, ConfirmPaymentRequest};
use crate::services::payment_service::{self, CreatePaymentIntentRequest, PaymentIntentResponse};

/// POST /create-payment-intent - Authorizes a card charge with the
/// processor and hands back the client confirmation secret
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Client-side confirmation secret", body = PaymentIntentResponse),
        (status = 400, description = "Non-positive or non-finite price")
    )
)]
pub async fn create_payment_intent(
    request: web::Json<CreatePaymentIntentRequest>,
) -> impl Responder {
    match payment_service::create_payment_intent(request.price).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating payment intent: {}", e);
            e.to_response()
        }
    }
}

/// PATCH /payment/{id} - Marks an enrollment paid and stores the
/// transaction id and date
pub async fn confirm_payment(
    path: web::Path<String>,
    db: web::Data<MongoDB>,
    request: web::Json<ConfirmPaymentRequest>,
) -> impl Responder {
    let id = path.into_inner();
    log::info!("💳 PATCH /payment/{} - Confirming payment", id);

    match enrollment_service::confirm_payment(&db, &id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error confirming payment for {}: {}", id, e);
            e.to_response()
        }
    }
}

/// GET /payment/{email} - Paid enrollments for an email
pub async fn list_paid(path: web::Path<String>, db: web::Data<MongoDB>) -> impl Responder {
    let email = path.into_inner();

    match enrollment_service::list_paid(&db, &email).await {
        Ok(enrollments) => HttpResponse::Ok().json(enrollments),
        Err(e) => {
            log::error!("❌ Error listing paid enrollments for {}: {}", email, e);
            e.to_response()
        }
    }
}
