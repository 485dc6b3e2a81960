use actix_web::HttpResponse;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    PaymentError(String),
    Configuration(String),
    InvalidId(String),
    InvalidRequest(String),
    Unauthorized(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::PaymentError(msg) => write!(f, "Payment error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Maps the error taxonomy onto client-visible responses. Upstream
    /// failures are not distinguished from each other beyond the status code.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidId(_) | AppError::InvalidRequest(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": self.to_string()
                }))
            }
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": true,
                "message": msg
            })),
            AppError::DatabaseError(_) | AppError::PaymentError(_) | AppError::Configuration(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": self.to_string()
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidId("abc".to_string()).to_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRequest("bad price".to_string())
                .to_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("unauthorized access".to_string())
                .to_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DatabaseError("down".to_string()).to_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::PaymentError("declined".to_string())
                .to_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
