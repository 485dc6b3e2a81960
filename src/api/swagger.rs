use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Music School Service API",
        version = "1.0.0",
        description = "Backend API for the music-lesson booking platform.\n\n**Authentication:** Enrollment endpoints require a JWT Bearer token issued by `POST /jwt`.\n\n**Features:**\n- Instructor directory and class catalog\n- Session token issuance\n- Class enrollment tracking\n- Card payments via Stripe payment intents",
        contact(
            name = "Music School Team",
            email = "support@music-school.app"
        )
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Users
        crate::api::users::check_admin,

        // Payments
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::auth::TokenResponse,
            crate::models::user::Role,
            crate::services::user_service::CreateUserRequest,
            crate::services::user_service::PromoteRoleRequest,
            crate::services::user_service::AdminCheckResponse,
            crate::services::enrollment_service::CreateEnrollmentRequest,
            crate::services::enrollment_service::ConfirmPaymentRequest,
            crate::services::payment_service::CreatePaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
            crate::services::InsertResponse,
            crate::services::UpdateResponse,
            crate::services::DeleteResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health endpoints for monitoring service status."),
        (name = "Auth", description = "Session token issuance. Tokens are signed server-side and expire after 30 days."),
        (name = "Users", description = "Account management: signup, listing, role checks and promotions."),
        (name = "Payments", description = "Stripe payment-intent creation and enrollment payment confirmation."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter a token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
