use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::database::MongoDB;
use crate::models::Class;
use crate::utils::error::AppError;

const CLASSES_COLLECTION: &str = "classes";

/// Full catalog, most-enrolled first. Ties keep store order.
pub async fn list_classes(db: &MongoDB) -> Result<Vec<Class>, AppError> {
    let mut cursor = db
        .collection::<Class>(CLASSES_COLLECTION)
        .find(doc! {})
        .sort(doc! { "students": -1 })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut classes = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(class) => classes.push(class),
            Err(e) => log::warn!("⚠️ Skipping undecodable class document: {}", e),
        }
    }

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_catalog_is_sorted_by_enrollment() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "musicDbTest").await.unwrap();

        let classes = list_classes(&db).await.unwrap();
        for pair in classes.windows(2) {
            assert!(pair[0].students >= pair[1].students);
        }
    }
}
