use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{database::MongoDB, models::User, services::user_service};

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// Every failure mode is reported the same way: 400 plus the raw error text.
fn client_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(MessageResponse { message })
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "Stored user document including assigned id", body = User),
        (status = 400, description = "Malformed body or store failure", body = MessageResponse)
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, body: web::Json<User>) -> HttpResponse {
    log::info!("📝 POST /users - Creating user");

    match user_service::create_user(&db, body.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User created: {:?}", user.id);
            HttpResponse::Created().json(user)
        }
        Err(e) => {
            log::error!("❌ Failed to create user: {}", e);
            client_error(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user documents, order unspecified", body = [User]),
        (status = 400, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /users - Listing all users");

    match user_service::list_users(&db).await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Failed to list users: {}", e);
            client_error(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (ObjectId hex)")),
    request_body = user_service::UpdateUserRequest,
    responses(
        (status = 200, description = "Post-update document, or null when no user matches", body = Option<User>),
        (status = 400, description = "Malformed id, body, or store failure", body = MessageResponse)
    )
)]
pub async fn update_user(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    body: web::Json<user_service::UpdateUserRequest>,
) -> HttpResponse {
    let id = id.into_inner();
    log::info!("🔧 PUT /users/{} - Updating user", id);

    match user_service::update_user(&db, &id, body.into_inner()).await {
        Ok(Some(user)) => {
            log::info!("✅ User {} updated", id);
            HttpResponse::Ok().json(user)
        }
        Ok(None) => {
            // An unknown id is not an error here; the response is simply null.
            log::warn!("⚠️ No user found for id {}", id);
            HttpResponse::Ok().json(serde_json::Value::Null)
        }
        Err(e) => {
            log::error!("❌ Failed to update user {}: {}", id, e);
            client_error(e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier (ObjectId hex)")),
    responses(
        (status = 200, description = "Confirmation, whether or not a user was removed", body = MessageResponse),
        (status = 400, description = "Malformed id or store failure", body = MessageResponse)
    )
)]
pub async fn delete_user(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    let id = id.into_inner();
    log::info!("🗑️  DELETE /users/{} - Removing user", id);

    match user_service::delete_user(&db, &id).await {
        Ok(()) => {
            log::info!("✅ Delete confirmed for {}", id);
            HttpResponse::Ok().json(MessageResponse {
                message: "User deleted".to_string(),
            })
        }
        Err(e) => {
            log::error!("❌ Failed to delete user {}: {}", id, e);
            client_error(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::oid::ObjectId;

    async fn echo_user(body: web::Json<User>) -> HttpResponse {
        HttpResponse::Created().json(body.into_inner())
    }

    #[actix_rt::test]
    async fn malformed_json_body_yields_400_with_message() {
        let app = test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(crate::utils::json_error_handler))
                .route("/api/users", web::post().to(echo_user)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"name": "Alice""#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.get("message").is_some());
    }

    // init_service's concrete type is unnameable, so the live app is a macro.
    macro_rules! live_app {
        () => {{
            dotenv::dotenv().ok();
            let db = MongoDB::new("mongodb://localhost:27017/user_service_test")
                .await
                .expect("MongoDB available");

            test::init_service(
                App::new()
                    .app_data(web::Data::new(db))
                    .app_data(
                        web::JsonConfig::default()
                            .error_handler(crate::utils::json_error_handler),
                    )
                    .service(
                        web::scope("/api/users")
                            .route("", web::post().to(create_user))
                            .route("", web::get().to(get_users))
                            .route("/{id}", web::put().to(update_user))
                            .route("/{id}", web::delete().to(delete_user)),
                    ),
            )
            .await
        }};
    }

    #[actix_rt::test]
    #[ignore] // Requires MongoDB to be running
    async fn create_then_list_round_trip() {
        let app = live_app!();

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(serde_json::json!({"name": "Alice", "age": 30}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], "Alice");
        assert_eq!(created["age"], 30);
        assert!(created.get("_id").is_some());

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let users: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let users = users.as_array().expect("list is an array");
        assert!(users.iter().any(|u| u["_id"] == created["_id"] && u["name"] == "Alice"));
    }

    #[actix_rt::test]
    #[ignore] // Requires MongoDB to be running
    async fn updating_unknown_id_returns_null() {
        let app = live_app!();

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", ObjectId::new().to_hex()))
            .set_json(serde_json::json!({"name": "Nobody"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.is_null());
    }

    #[actix_rt::test]
    #[ignore] // Requires MongoDB to be running
    async fn deleting_unknown_id_still_confirms() {
        let app = live_app!();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{}", ObjectId::new().to_hex()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User deleted");
    }

    #[actix_rt::test]
    #[ignore] // Requires MongoDB to be running
    async fn malformed_id_yields_400_with_message() {
        let app = live_app!();

        let req = test::TestRequest::delete()
            .uri("/api/users/not-an-object-id")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("Invalid user id"));
    }
}
