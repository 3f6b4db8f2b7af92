use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A stored user document. `name` and `email` are the fields clients usually
/// send; anything else in the request body is kept verbatim in `extra`, so the
/// permissive "any JSON object is a user" contract still holds.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    /// PRIMARY IDENTIFIER - assigned by MongoDB on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}
