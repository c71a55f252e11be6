use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/menus", menu_routes())
        .nest("/public/menus", public_routes())
        .nest("/images", image_routes())
}

fn menu_routes() -> OpenApiRouter<AppState> {
    use handlers::menu::*;

    OpenApiRouter::new()
        .routes(routes!(list_menus, create_menu))
        .routes(routes!(get_menu, update_menu, delete_menu))
        .routes(routes!(add_menu_item))
        .routes(routes!(update_menu_item, delete_menu_item))
        .routes(routes!(get_categories, add_category))
        .routes(routes!(delete_category))
        .routes(routes!(update_category_order))
}

fn public_routes() -> OpenApiRouter<AppState> {
    use handlers::public::*;

    OpenApiRouter::new().routes(routes!(get_public_menu))
}

fn image_routes() -> OpenApiRouter<AppState> {
    use handlers::image::*;

    OpenApiRouter::new()
        .routes(routes!(list_images))
        .routes(routes!(create_presigned_url))
        .routes(routes!(delete_image))
}
