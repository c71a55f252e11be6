use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn public_menu_needs_no_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;
    let item_id = app.add_item(&token, &id, "Soup", "Starters").await;
    app.put_with_token(
        &routes::item(&id, &item_id),
        &json!({ "available": false }),
        &token,
    )
    .await;

    let res = app.get_without_token(&routes::public_menu(&id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["displayName"], "Dinner");
    // Unavailable items are served by default.
    assert_eq!(res.body["items"][0]["available"], false);
}

#[tokio::test]
async fn public_menu_can_hide_unavailable_items() {
    let app = TestApp::spawn_hiding_unavailable().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;
    let hidden = app.add_item(&token, &id, "Soup", "Starters").await;
    app.add_item(&token, &id, "Bread", "Starters").await;
    app.put_with_token(
        &routes::item(&id, &hidden),
        &json!({ "available": false }),
        &token,
    )
    .await;

    let res = app.get_without_token(&routes::public_menu(&id)).await;
    assert_eq!(res.status, 200);
    let items = res.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Bread");

    // The owner still sees everything.
    let res = app.get_with_token(&routes::menu(&id), &token).await;
    assert_eq!(res.body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_public_menu_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .get_without_token(&routes::public_menu("7f0c2b8e-3d1a-4e55-9a3b-2c6f0b9d1e42"))
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app.get_without_token(&routes::public_menu("nope")).await;
    assert_eq!(res.status, 404);
}
