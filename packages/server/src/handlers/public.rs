use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::menu::Menu;
use crate::models::shared::parse_id;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicMenu",
    summary = "Read any menu by ID",
    description = "No authentication. Anyone holding the ID can read the full menu. Unavailable items are included unless `menus.public_hide_unavailable` is set.",
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu with items", body = Menu),
        (status = 404, description = "Menu not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_public_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let menu = state.menus.get_public_menu(id).await?;
    Ok(Json(menu))
}
