use mongodb::bson::{oid::ObjectId, Bson};
use mongodb::results::{DeleteResult, UpdateResult};
use serde::{Deserialize, Serialize};

/// A document as read back from MongoDB: the `_id` plus the typed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRecord<T> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub data: T,
}

/// A document as sent to clients, with `_id` rendered as a hex string.
#[derive(Debug, Clone, Serialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: ObjectId, data: T) -> Self {
        Record {
            id: id.to_hex(),
            data,
        }
    }
}

impl<T> From<StoredRecord<T>> for Record<T> {
    fn from(stored: StoredRecord<T>) -> Self {
        Record::new(stored.id, stored.data)
    }
}

/// Parses a path identifier into an ObjectId.
pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw.trim()).ok()
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<serde_json::Value>,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.map(|id| match id {
            Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        });

        UpdateResponse {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(result: DeleteResult) -> Self {
        DeleteResponse {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}
