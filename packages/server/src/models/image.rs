use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::validate_non_blank;

/// Body of `POST /images/presigned-url`.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    #[schema(example = "photo.png")]
    pub file_name: String,
    /// MIME type the client will upload with.
    #[schema(example = "image/png")]
    pub file_type: String,
}

/// A signed upload URL and the URL the image will be served from.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    /// `PUT` the file here within the expiry window.
    pub upload_url: String,
    #[schema(example = "https://menu-images.s3.amazonaws.com/user-1/1700000000000-photo.png")]
    pub image_url: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteImageResponse {
    #[schema(example = true)]
    pub success: bool,
}

pub fn validate_presign_request(payload: &PresignRequest) -> Result<(), AppError> {
    validate_non_blank(&payload.file_name, "File name")?;
    if payload.file_name.contains('/') {
        return Err(AppError::Validation("File name must not contain '/'".into()));
    }
    validate_non_blank(&payload.file_type, "File type")
}
