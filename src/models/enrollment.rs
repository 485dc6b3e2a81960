use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Document in the "userClasses" collection: links a user (by email) to a
/// class, carrying payment status. `transactionId` and `date` are written
/// once, at payment confirmation.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub class_id: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_payment_flag")]
    pub payment: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
}

/// Older documents stored the payment flag as "true"/"false" strings.
/// Serialization always writes a real boolean.
pub fn deserialize_payment_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bson_value = Bson::deserialize(deserializer)?;
    match bson_value {
        Bson::Boolean(flag) => Ok(flag),
        Bson::String(s) => match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "Expected boolean payment flag, got \"{}\"",
                other
            ))),
        },
        _ => Err(serde::de::Error::custom("Expected boolean or string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn base_doc() -> serde_json::Value {
        serde_json::json!({
            "classId": "64a1f0c2e4b0a1b2c3d4e5f6",
            "className": "Guitar Ensemble",
            "price": 80.0,
            "email": "student@music.school"
        })
    }

    #[test]
    fn test_payment_flag_accepts_boolean() {
        let mut value = base_doc();
        value["payment"] = serde_json::json!(true);
        let enrollment: Enrollment = serde_json::from_value(value).unwrap();
        assert!(enrollment.payment);
    }

    #[test]
    fn test_payment_flag_accepts_legacy_strings() {
        let mut value = base_doc();
        value["payment"] = serde_json::json!("true");
        let enrollment: Enrollment = serde_json::from_value(value.clone()).unwrap();
        assert!(enrollment.payment);

        value["payment"] = serde_json::json!("false");
        let enrollment: Enrollment = serde_json::from_value(value).unwrap();
        assert!(!enrollment.payment);
    }

    #[test]
    fn test_payment_flag_rejects_other_strings() {
        let mut value = base_doc();
        value["payment"] = serde_json::json!("maybe");
        assert!(serde_json::from_value::<Enrollment>(value).is_err());
    }

    #[test]
    fn test_missing_payment_flag_means_unpaid() {
        let enrollment: Enrollment = serde_json::from_value(base_doc()).unwrap();
        assert!(!enrollment.payment);
        assert!(enrollment.transaction_id.is_none());
    }

    #[test]
    fn test_bson_document_with_string_flag_deserializes() {
        let document = doc! {
            "classId": "64a1f0c2e4b0a1b2c3d4e5f6",
            "className": "Drum Circle",
            "price": 45.5,
            "email": "student@music.school",
            "payment": "false",
        };
        let enrollment: Enrollment = mongodb::bson::from_document(document).unwrap();
        assert!(!enrollment.payment);
    }

    #[test]
    fn test_serialization_writes_real_boolean() {
        let enrollment = Enrollment {
            id: None,
            class_id: "64a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            class_name: "Jazz Improv".to_string(),
            class_image: None,
            instructor: None,
            price: 120.0,
            email: "student@music.school".to_string(),
            payment: true,
            transaction_id: Some("tx1".to_string()),
            date: Some("2024-01-01".to_string()),
        };
        let value = serde_json::to_value(&enrollment).unwrap();
        assert_eq!(value["payment"], serde_json::json!(true));
        assert_eq!(value["transactionId"], serde_json::json!("tx1"));
    }
}
