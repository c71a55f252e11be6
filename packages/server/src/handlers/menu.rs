use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::menu::*;
use crate::models::shared::{parse_id, validate_categories, validate_non_blank};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Menus",
    operation_id = "listMenus",
    summary = "List your menus",
    description = "Returns every menu owned by the caller, oldest first, with items.",
    responses(
        (status = 200, description = "Menus owned by the caller", body = Vec<Menu>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(customer_id = %auth_user.customer_id))]
pub async fn list_menus(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Menu>>, AppError> {
    let menus = state.menus.list_menus(&auth_user.customer_id).await?;
    Ok(Json(menus))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Menus",
    operation_id = "createMenu",
    summary = "Create a menu",
    description = "Creates an empty menu owned by the caller. Duplicate category names are collapsed.",
    request_body = MenuDraft,
    responses(
        (status = 201, description = "Menu created", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(display_name = %payload.display_name))]
pub async fn create_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<MenuDraft>,
) -> Result<impl IntoResponse, AppError> {
    validate_menu_draft(&payload)?;

    let menu = state
        .menus
        .create_menu(&auth_user.customer_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Menus",
    operation_id = "getMenu",
    summary = "Get one of your menus",
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu with items", body = Menu),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let menu = state.menus.get_menu(&auth_user.customer_id, id).await?;
    Ok(Json(menu))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Menus",
    operation_id = "updateMenu",
    summary = "Update a menu",
    description = "Partial update. Fields omitted from the body are left unchanged. Items are edited through the item routes.",
    params(("id" = String, Path, description = "Menu ID")),
    request_body = MenuPatch,
    responses(
        (status = 200, description = "Updated menu", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MenuPatch>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    validate_menu_patch(&payload)?;

    let menu = state
        .menus
        .update_menu(&auth_user.customer_id, id, payload)
        .await?;
    Ok(Json(menu))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Menus",
    operation_id = "deleteMenu",
    summary = "Delete a menu",
    description = "Deletes the menu and all of its items.",
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "Menu")?;
    state.menus.delete_menu(&auth_user.customer_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/items",
    tag = "Menu Items",
    operation_id = "addMenuItem",
    summary = "Add an item to a menu",
    description = "Creates an item in the menu. Its category is free-form and is not added to the menu's category list.",
    params(("id" = String, Path, description = "Menu ID")),
    request_body = MenuItemDraft,
    responses(
        (status = 201, description = "Menu including the new item", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn add_menu_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MenuItemDraft>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Menu")?;
    validate_menu_item_draft(&payload)?;

    let menu = state
        .menus
        .add_menu_item(&auth_user.customer_id, id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    put,
    path = "/{id}/items/{item_id}",
    tag = "Menu Items",
    operation_id = "updateMenuItem",
    summary = "Update a menu item",
    description = "Partial update. `null` clears `imageUrl` or `contents`; omitted fields are left unchanged.",
    params(
        ("id" = String, Path, description = "Menu ID"),
        ("item_id" = String, Path, description = "Item ID"),
    ),
    request_body = MenuItemPatch,
    responses(
        (status = 200, description = "Updated menu", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu or item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_menu_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    AppJson(payload): AppJson<MenuItemPatch>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let item_id = parse_id(&item_id, "Item")?;
    validate_menu_item_patch(&payload)?;

    let menu = state
        .menus
        .update_menu_item(&auth_user.customer_id, id, item_id, payload)
        .await?;
    Ok(Json(menu))
}

#[utoipa::path(
    delete,
    path = "/{id}/items/{item_id}",
    tag = "Menu Items",
    operation_id = "deleteMenuItem",
    summary = "Remove an item from a menu",
    params(
        ("id" = String, Path, description = "Menu ID"),
        ("item_id" = String, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Menu without the item", body = Menu),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu or item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_menu_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let item_id = parse_id(&item_id, "Item")?;

    let menu = state
        .menus
        .delete_menu_item(&auth_user.customer_id, id, item_id)
        .await?;
    Ok(Json(menu))
}

#[utoipa::path(
    get,
    path = "/{id}/categories",
    tag = "Categories",
    operation_id = "getCategories",
    summary = "List a menu's categories",
    description = "Returns the stored category list in display order. Categories used only by items are not included.",
    params(("id" = String, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Category names", body = Vec<String>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_categories(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let categories = state
        .menus
        .get_categories(&auth_user.customer_id, id)
        .await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/{id}/categories",
    tag = "Categories",
    operation_id = "addCategory",
    summary = "Add a category",
    description = "Appends the category if it is not already listed. Adding an existing name is a no-op.",
    params(("id" = String, Path, description = "Menu ID")),
    request_body = AddCategoryRequest,
    responses(
        (status = 201, description = "Updated menu", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(category = %payload.name))]
pub async fn add_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<AddCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Menu")?;
    validate_non_blank(&payload.name, "Category name")?;

    let menu = state
        .menus
        .add_category(&auth_user.customer_id, id, &payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

#[utoipa::path(
    delete,
    path = "/{id}/categories/{category}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Removes the category from the list and moves its items to `uncategorized`.",
    params(
        ("id" = String, Path, description = "Menu ID"),
        ("category" = String, Path, description = "Category name (URL-encoded)"),
    ),
    responses(
        (status = 200, description = "Updated menu", body = Menu),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, category)): Path<(String, String)>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    let menu = state
        .menus
        .delete_category(&auth_user.customer_id, id, &category)
        .await?;
    Ok(Json(menu))
}

#[utoipa::path(
    put,
    path = "/{id}/category-order",
    tag = "Categories",
    operation_id = "updateCategoryOrder",
    summary = "Reorder categories",
    description = "Rebuilds the category list from the categories items actually use. Names in `categoryOrder` come first in the given order; unused names are dropped and used names not listed are appended.",
    params(("id" = String, Path, description = "Menu ID")),
    request_body = CategoryOrderRequest,
    responses(
        (status = 200, description = "Updated menu", body = Menu),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Menu not found or not yours (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_category_order(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CategoryOrderRequest>,
) -> Result<Json<Menu>, AppError> {
    let id = parse_id(&id, "Menu")?;
    validate_categories(&payload.category_order)?;

    let menu = state
        .menus
        .update_category_order(&auth_user.customer_id, id, &payload.category_order)
        .await?;
    Ok(Json(menu))
}
