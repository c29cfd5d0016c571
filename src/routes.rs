use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use crate::models::{
    BlogPost, CreatePostReq, PostResponse, UpdatePostReq, ValidationError, POSTS_COLLECTION,
};
use crate::store::{Collection, DocumentStore, StoreError};

pub type ApiResult<T> = Result<T, (Status, Json<ApiError>)>;

// ─── Models ───

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Body of `GET /posts`.
#[derive(Serialize)]
pub struct PostList {
    #[serde(rename = "blogPost")]
    pub blog_post: Vec<PostResponse>,
}

fn err(status: Status, msg: &str, code: &str) -> (Status, Json<ApiError>) {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

fn store_err(e: StoreError) -> (Status, Json<ApiError>) {
    log::error!("event=store_failure error={e}");
    err(Status::InternalServerError, &e.to_string(), "DB_ERROR")
}

fn validation_err(e: ValidationError) -> (Status, Json<ApiError>) {
    err(Status::UnprocessableEntity, &e.to_string(), "VALIDATION_ERROR")
}

fn not_found() -> (Status, Json<ApiError>) {
    err(Status::NotFound, "Post not found", "NOT_FOUND")
}

fn posts(store: &DocumentStore) -> Collection<'_, BlogPost> {
    store.collection(POSTS_COLLECTION)
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

#[get("/posts")]
pub fn list_posts(store: &State<DocumentStore>) -> ApiResult<Json<PostList>> {
    let docs = posts(store).find_all().map_err(store_err)?;
    Ok(Json(PostList {
        blog_post: docs.into_iter().map(PostResponse::from).collect(),
    }))
}

#[get("/posts/<id>")]
pub fn get_post(id: &str, store: &State<DocumentStore>) -> ApiResult<Json<PostResponse>> {
    posts(store)
        .find_by_id(id)
        .map_err(store_err)?
        .map(|doc| Json(doc.into()))
        .ok_or_else(not_found)
}

#[post("/posts", format = "json", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, store: &State<DocumentStore>) -> ApiResult<(Status, Json<PostResponse>)> {
    let post = req.validate().map_err(validation_err)?;
    let doc = posts(store).insert_one(post).map_err(store_err)?;
    log::info!("event=post_created id={}", doc.id);
    Ok((Status::Created, Json(doc.into())))
}

#[put("/posts/<id>", format = "json", data = "<req>")]
pub fn update_post(id: &str, req: Json<UpdatePostReq>, store: &State<DocumentStore>) -> ApiResult<Json<PostResponse>> {
    if let Some(body_id) = req.id.as_deref() {
        if body_id != id {
            return Err(err(
                Status::BadRequest,
                &format!("Request path id ({id}) and request body id ({body_id}) must match"),
                "ID_MISMATCH",
            ));
        }
    }

    let collection = posts(store);
    let current = collection.find_by_id(id).map_err(store_err)?.ok_or_else(not_found)?;
    let updated = req.apply(current.body).map_err(validation_err)?;

    collection
        .replace_one(id, updated)
        .map_err(store_err)?
        .map(|doc| Json(doc.into()))
        .ok_or_else(not_found)
}

#[delete("/posts/<id>")]
pub fn delete_post(id: &str, store: &State<DocumentStore>) -> ApiResult<Json<serde_json::Value>> {
    let deleted = posts(store).delete_one(id).map_err(store_err)?;
    if !deleted {
        return Err(not_found());
    }
    log::info!("event=post_deleted id={id}");
    Ok(Json(serde_json::json!({"deleted": true})))
}

// ─── Catchers ───

#[catch(400)]
pub fn bad_request() -> Json<ApiError> {
    Json(ApiError { error: "Malformed request body".to_string(), code: "BAD_REQUEST".to_string() })
}

#[catch(404)]
pub fn not_found_catcher() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable() -> Json<ApiError> {
    Json(ApiError { error: "Request body has the wrong shape".to_string(), code: "VALIDATION_ERROR".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}
