use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Subset of the processor response this service is allowed to expose
#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: String,
}

/// Converts a dollar amount to the integer cents the processor expects,
/// truncating sub-cent precision. Non-finite and non-positive prices are
/// rejected before any processor call.
pub fn to_minor_units(price: f64) -> Result<i64, AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "Price must be a positive amount, got {}",
            price
        )));
    }
    Ok((price * 100.0) as i64)
}

/// Creates a card payment intent in USD and returns only the client-side
/// confirmation secret, never the full processor response.
pub async fn create_payment_intent(price: f64) -> Result<PaymentIntentResponse, AppError> {
    let amount = to_minor_units(price)?;
    let secret_key = std::env::var("PAYMENT_SECRET_KEY")
        .map_err(|_| AppError::Configuration("PAYMENT_SECRET_KEY not configured".to_string()))?;

    log::info!("💳 Creating payment intent for {} cents", amount);

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .bearer_auth(&secret_key)
        .form(&[
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ])
        .send()
        .await
        .map_err(|e| AppError::PaymentError(format!("Failed to reach payment processor: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::PaymentError(format!(
            "Payment processor error: {}",
            response.status()
        )));
    }

    let intent: StripePaymentIntent = response
        .json()
        .await
        .map_err(|e| AppError::PaymentError(format!("Failed to parse payment intent: {}", e)))?;

    log::info!("✅ Payment intent created");

    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_dollars_to_cents() {
        assert_eq!(to_minor_units(10.0).unwrap(), 1000);
    }

    #[test]
    fn test_fractional_dollars_to_cents() {
        assert_eq!(to_minor_units(10.5).unwrap(), 1050);
    }

    #[test]
    fn test_sub_cent_precision_truncates() {
        assert_eq!(to_minor_units(0.999).unwrap(), 99);
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        assert!(to_minor_units(0.0).is_err());
        assert!(to_minor_units(-10.0).is_err());
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
    }
}
