use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::image::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/presigned-url",
    tag = "Images",
    operation_id = "createPresignedUrl",
    summary = "Get a signed upload URL",
    description = "Returns a URL the client can `PUT` the file to (with the same `Content-Type`) before it expires, and the public URL the image will be served from.",
    request_body = PresignRequest,
    responses(
        (status = 201, description = "Upload URL minted", body = PresignResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage backend rejected the request (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(file_name = %payload.file_name))]
pub async fn create_presigned_url(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<PresignRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_presign_request(&payload)?;

    let response = state
        .images
        .presign(
            &payload.file_name,
            &payload.file_type,
            &auth_user.customer_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Images",
    operation_id = "listImages",
    summary = "List your images",
    description = "Public URLs of every image you uploaded. A storage failure also yields an empty list.",
    responses(
        (status = 200, description = "Image URLs", body = Vec<String>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_images(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<String>> {
    Json(state.images.list_for_user(&auth_user.customer_id).await)
}

#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Delete one of your images",
    description = "Deletes the first of your images whose key ends with `key`, e.g. `1700000000000-photo.png`.",
    params(("key" = String, Path, description = "Key or key suffix (URL-encoded)")),
    responses(
        (status = 200, description = "Image deleted", body = DeleteImageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Image not found or not yours (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage backend failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteImageResponse>, AppError> {
    state.images.delete(&key, &auth_user.customer_id).await?;
    Ok(Json(DeleteImageResponse { success: true }))
}
