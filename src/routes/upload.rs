use std::path::Path as FsPath;

use axum::{Json, Router, extract::Multipart, extract::State, routing::post};
use uuid::Uuid;

use crate::{dto::upload::UploadResponse, error::AppError, state::SharedState};

/// Routes handling image uploads for player avatars.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/upload", post(upload_image))
}

/// Store an uploaded image under a random filename and return its URL
/// relative to the static image mount.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file or not an image")
    )
)]
pub async fn upload_image(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(format!(
                "expected an image, got {content_type}"
            )));
        }

        let extension = field
            .file_name()
            .and_then(|name| FsPath::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or("png")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("failed to read upload: {err}")))?;

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let dir = FsPath::new(&state.config.upload_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| AppError::Internal(format!("creating upload dir: {err}")))?;
        tokio::fs::write(dir.join(&filename), &bytes)
            .await
            .map_err(|err| AppError::Internal(format!("writing upload: {err}")))?;

        tracing::info!(%filename, size = bytes.len(), "stored uploaded image");
        return Ok(Json(UploadResponse {
            url: format!("/images/usr/{filename}"),
        }));
    }

    Err(AppError::BadRequest("no file field in upload".to_string()))
}
