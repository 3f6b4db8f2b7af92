// ==================== USER CRUD ====================
// Thin pass-through to the "users" collection. Each function issues exactly
// one MongoDB call and surfaces the raw driver error text to the caller.

use crate::{database::MongoDB, models::User};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

const USERS_COLLECTION: &str = "users";

/// PUT body: every field optional, undeclared fields overwrite too.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// Inserts the body as a new user document. The store assigns the identifier.
pub async fn create_user(db: &MongoDB, mut user: User) -> Result<User, String> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    user.id = None;
    let result = collection
        .insert_one(&user)
        .await
        .map_err(|e| e.to_string())?;

    user.id = result.inserted_id.as_object_id();
    Ok(user)
}

/// Full collection scan: unfiltered, unpaginated, order unspecified.
pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, String> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| e.to_string())?;

    let mut users = Vec::new();
    while let Some(user) = cursor.next().await {
        users.push(user.map_err(|e| e.to_string())?);
    }
    Ok(users)
}

/// Overwrites the provided fields and returns the document as it exists after
/// the update. A missing id yields `Ok(None)`, not an error.
pub async fn update_user(
    db: &MongoDB,
    id: &str,
    request: UpdateUserRequest,
) -> Result<Option<User>, String> {
    let oid = parse_user_id(id)?;
    let collection = db.collection::<User>(USERS_COLLECTION);

    let fields = update_document(&request)?;
    if fields.is_empty() {
        // Nothing to overwrite; the post-update state is the current document.
        return collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| e.to_string());
    }

    collection
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": fields })
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| e.to_string())
}

/// Removes the matching document if present. Deleting an absent id is a
/// silent no-op.
pub async fn delete_user(db: &MongoDB, id: &str) -> Result<(), String> {
    let oid = parse_user_id(id)?;
    let collection = db.collection::<User>(USERS_COLLECTION);

    let result = collection
        .delete_one(doc! { "_id": oid })
        .await
        .map_err(|e| e.to_string())?;

    if result.deleted_count == 0 {
        log::warn!("⚠️ Delete matched no user for id {}", id);
    }
    Ok(())
}

fn parse_user_id(id: &str) -> Result<ObjectId, String> {
    ObjectId::parse_str(id).map_err(|e| format!("Invalid user id '{}': {}", id, e))
}

fn update_document(request: &UpdateUserRequest) -> Result<Document, String> {
    let mut fields = to_document(request).map_err(|e| e.to_string())?;
    // The identifier is immutable; a client-supplied _id must not reach $set.
    fields.remove("_id");
    Ok(fields)
}
