use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "classes" collection. Written by the admin dashboard and
/// read-only from this API; the store is schemaless, so every descriptive
/// field is optional.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub available_seats: Option<i64>,
    /// Enrollment count, the catalog sort key
    #[serde(default)]
    pub students: i64,
}
