use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::MENUS).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");

    let res = app.get_with_token(routes::MENUS, "not-a-jwt").await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn create_and_get_menu() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");

    let res = app
        .post_with_token(
            routes::MENUS,
            &json!({
                "displayName": "Dinner",
                "categories": ["Mains", "Drinks", "Mains"],
                "customerId": "someone-else",
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["displayName"], "Dinner");
    assert_eq!(res.body["customerId"], "cust-1");
    assert_eq!(res.body["categories"], json!(["Mains", "Drinks"]));
    assert_eq!(res.body["items"], json!([]));

    let id = res.body["id"].as_str().unwrap();
    let res = app.get_with_token(&routes::menu(id), &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["id"], id);

    let res = app.get_with_token(routes::MENUS, &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_menu_validation() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");

    let res = app
        .post_with_token(routes::MENUS, &json!({ "displayName": "   " }), &token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app.post_with_token(routes::MENUS, &json!({}), &token).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app
        .post_raw_with_token(routes::MENUS, "{not json", &token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn other_customers_see_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.token_for("cust-1");
    let other = app.token_for("cust-2");
    let id = app.create_menu(&owner, "Lunch").await;

    let res = app.get_with_token(&routes::menu(&id), &other).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app
        .put_with_token(&routes::menu(&id), &json!({ "displayName": "Mine" }), &other)
        .await;
    assert_eq!(res.status, 404);

    let res = app.delete_with_token(&routes::menu(&id), &other).await;
    assert_eq!(res.status, 404);

    let res = app.get_with_token(routes::MENUS, &other).await;
    assert_eq!(res.body, json!([]));

    let res = app.get_with_token(&routes::menu(&id), &owner).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["displayName"], "Lunch");
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");

    let res = app.get_with_token(&routes::menu("not-a-uuid"), &token).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_menu_is_partial() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let res = app
        .post_with_token(
            routes::MENUS,
            &json!({ "displayName": "Lunch", "categories": ["Soups"] }),
            &token,
        )
        .await;
    let id = res.body["id"].as_str().unwrap().to_string();

    let res = app
        .put_with_token(&routes::menu(&id), &json!({ "displayName": "Brunch" }), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["displayName"], "Brunch");
    assert_eq!(res.body["categories"], json!(["Soups"]));

    let res = app
        .put_with_token(&routes::menu(&id), &json!({ "categories": [""] }), &token)
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn delete_menu_then_gone() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Lunch").await;
    app.add_item(&token, &id, "Soup", "Starters").await;

    let res = app.delete_with_token(&routes::menu(&id), &token).await;
    assert_eq!(res.status, 204);

    let res = app.get_with_token(&routes::menu(&id), &token).await;
    assert_eq!(res.status, 404);

    let res = app.delete_with_token(&routes::menu(&id), &token).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn item_lifecycle() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;

    let res = app
        .post_with_token(
            &routes::items(&id),
            &json!({
                "name": "Steak",
                "price": 24.5,
                "category": "Mains",
                "contents": ["beef"],
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let item = &res.body["items"][0];
    assert_eq!(item["price"], "24.50");
    assert_eq!(item["description"], "");
    assert_eq!(item["available"], true);
    assert_eq!(item["contents"], json!(["beef"]));
    assert_eq!(item["imageUrl"], json!(null));
    assert_eq!(res.body["categories"], json!([]));
    let item_id = item["id"].as_str().unwrap().to_string();

    let res = app
        .put_with_token(
            &routes::item(&id, &item_id),
            &json!({ "price": "26", "available": false, "imageUrl": "https://img/steak.png" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let item = &res.body["items"][0];
    assert_eq!(item["price"], "26.00");
    assert_eq!(item["available"], false);
    assert_eq!(item["name"], "Steak");
    assert_eq!(item["imageUrl"], "https://img/steak.png");

    let res = app
        .put_with_token(
            &routes::item(&id, &item_id),
            &json!({ "imageUrl": null }),
            &token,
        )
        .await;
    assert_eq!(res.body["items"][0]["imageUrl"], json!(null));

    let res = app
        .delete_with_token(&routes::item(&id, &item_id), &token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["items"], json!([]));

    let res = app
        .delete_with_token(&routes::item(&id, &item_id), &token)
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn item_validation() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;

    for body in [
        json!({ "name": "Soup", "category": "Starters" }),
        json!({ "name": "Soup", "price": "-1", "category": "Starters" }),
        json!({ "name": "Soup", "price": "1.999", "category": "Starters" }),
        json!({ "name": "", "price": "1", "category": "Starters" }),
        json!({ "name": "Soup", "price": "1", "category": " " }),
    ] {
        let res = app.post_with_token(&routes::items(&id), &body, &token).await;
        assert_eq!(res.status, 400, "accepted {body}: {}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn items_of_another_menu_are_not_found() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let first = app.create_menu(&token, "Lunch").await;
    let second = app.create_menu(&token, "Dinner").await;
    let item_id = app.add_item(&token, &second, "Soup", "Starters").await;

    let res = app
        .put_with_token(&routes::item(&first, &item_id), &json!({ "name": "X" }), &token)
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let other = app.token_for("cust-2");
    let res = app
        .post_with_token(
            &routes::items(&second),
            &json!({ "name": "Soup", "price": "1", "category": "Starters" }),
            &other,
        )
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn category_add_list_delete() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;
    app.add_item(&token, &id, "Cake", "Desserts").await;

    for _ in 0..2 {
        let res = app
            .post_with_token(&routes::categories(&id), &json!({ "name": "Desserts" }), &token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }
    let res = app
        .post_with_token(&routes::categories(&id), &json!({ "name": "Drinks" }), &token)
        .await;
    assert_eq!(res.body["categories"], json!(["Desserts", "Drinks"]));

    let res = app.get_with_token(&routes::categories(&id), &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!(["Desserts", "Drinks"]));

    let res = app
        .delete_with_token(&routes::category(&id, "Desserts"), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["categories"], json!(["Drinks"]));
    assert_eq!(res.body["items"][0]["category"], "uncategorized");
}

#[tokio::test]
async fn category_with_space_in_path() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;
    app.add_item(&token, &id, "Wine", "Hot Drinks").await;

    let res = app
        .delete_with_token(&routes::category(&id, "Hot%20Drinks"), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["items"][0]["category"], "uncategorized");
}

#[tokio::test]
async fn category_order_is_reconciled_with_items() {
    let app = TestApp::spawn().await;
    let token = app.token_for("cust-1");
    let id = app.create_menu(&token, "Dinner").await;
    app.add_item(&token, &id, "a", "A").await;
    app.add_item(&token, &id, "b", "B").await;
    app.add_item(&token, &id, "c", "C").await;
    app.post_with_token(&routes::categories(&id), &json!({ "name": "Empty" }), &token)
        .await;

    let res = app
        .put_with_token(
            &routes::category_order(&id),
            &json!({ "categoryOrder": ["C", "A", "Z"] }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["categories"], json!(["C", "A", "B"]));

    let res = app.get_with_token(&routes::categories(&id), &token).await;
    assert_eq!(res.body, json!(["C", "A", "B"]));
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = TestApp::spawn().await;
    let res = app.get_without_token(routes::OPENAPI).await;
    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/menus",
        "/menus/{id}",
        "/menus/{id}/items/{item_id}",
        "/menus/{id}/category-order",
        "/public/menus/{id}",
        "/images/presigned-url",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
