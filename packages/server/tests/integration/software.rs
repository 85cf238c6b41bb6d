use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn create_defaults_to_operating_system_with_one_license() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::SOFTWARE, &json!({ "version": "CentOS 7.9" }))
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["sub_asset_type"], "operating_system");
    assert_eq!(res.body["license_num"], 1);
    assert_eq!(res.body["display_name"], "操作系统--CentOS 7.9");
}

#[tokio::test]
async fn duplicate_version_is_conflict() {
    let app = TestApp::spawn().await;
    app.create(routes::SOFTWARE, json!({ "version": "Office 2021" }))
        .await;

    let res = app
        .post(
            routes::SOFTWARE,
            &json!({ "version": "Office 2021", "sub_asset_type": "office_development" }),
        )
        .await;

    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "CONFLICT");
}

#[tokio::test]
async fn negative_license_count_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::SOFTWARE,
            &json!({ "version": "ERP 3", "license_num": -2 }),
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn patch_changes_category_and_display() {
    let app = TestApp::spawn().await;
    let id = app
        .create(routes::SOFTWARE, json!({ "version": "ERP 3" }))
        .await;

    let res = app
        .patch(
            &routes::item(routes::SOFTWARE, id),
            &json!({ "sub_asset_type": "business", "license_num": 50 }),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["license_num"], 50);
    assert_eq!(res.body["display_name"], "业务软件--ERP 3");
}

#[tokio::test]
async fn list_filters_by_category() {
    let app = TestApp::spawn().await;
    app.create(routes::SOFTWARE, json!({ "version": "Ubuntu 24.04" }))
        .await;
    app.create(
        routes::SOFTWARE,
        json!({ "version": "VS Code", "sub_asset_type": "office_development" }),
    )
    .await;

    let res = app
        .get(&format!(
            "{}?sub_asset_type=office_development",
            routes::SOFTWARE
        ))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["pagination"]["total"], 1);
    assert_eq!(res.body["data"][0]["version"], "VS Code");

    let res = app
        .get(&format!("{}?sub_asset_type=games", routes::SOFTWARE))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let app = TestApp::spawn().await;
    let id = app
        .create(routes::SOFTWARE, json!({ "version": "Ubuntu 24.04" }))
        .await;

    let res = app.delete(&routes::item(routes::SOFTWARE, id)).await;
    assert_eq!(res.status, 204);

    let res = app.get(&routes::item(routes::SOFTWARE, id)).await;
    assert_eq!(res.status, 404);
}
