use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn defaults_type_and_status() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::ASSETS, &json!({ "name": "db01", "sn": "SN123" }))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["asset_type"], "server");
        assert_eq!(res.body["status"], "online");
        assert_eq!(res.body["display_name"], "<服务器> db01");
        assert_eq!(res.body["tags"], json!([]));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let app = TestApp::spawn().await;
        app.create_asset("db01", "SN1").await;

        let res = app
            .post(routes::ASSETS, &json!({ "name": "db01", "sn": "SN2" }))
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn duplicate_serial_number_is_conflict() {
        let app = TestApp::spawn().await;
        app.create_asset("db01", "SN1").await;

        let res = app
            .post(routes::ASSETS, &json!({ "name": "db02", "sn": "SN1" }))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn invalid_manage_ip_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({ "name": "db01", "sn": "SN1", "manage_ip": "10.0.0.300" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn accepts_ipv6_manage_ip() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({ "name": "db01", "sn": "SN1", "manage_ip": "fe80::1" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["manage_ip"], "fe80::1");
    }

    #[tokio::test]
    async fn unknown_status_key_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({ "name": "db01", "sn": "SN1", "status": "retired" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::ASSETS, &json!({ "name": "   ", "sn": "SN1" }))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn expire_day_before_purchase_day_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({
                    "name": "db01",
                    "sn": "SN1",
                    "purchase_day": "2024-06-01",
                    "expire_day": "2024-01-01",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_business_unit_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({ "name": "db01", "sn": "SN1", "business_unit_id": 9999 }),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn attaches_tags_sorted_by_name() {
        let app = TestApp::spawn().await;
        let web = app.create_tag("web").await;
        let core = app.create_tag("core").await;

        let res = app
            .post(
                routes::ASSETS,
                &json!({ "name": "db01", "sn": "SN1", "tag_ids": [web, core] }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let names: Vec<&str> = res.body["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["core", "web"]);
    }
}

mod retrieval {
    use super::*;

    #[tokio::test]
    async fn get_missing_asset_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::asset(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_filters_by_type_and_status() {
        let app = TestApp::spawn().await;
        app.create_typed_asset("db01", "SN1", "server").await;
        app.create_typed_asset("sw01", "SN2", "networkdevice").await;
        app.post(
            routes::ASSETS,
            &json!({ "name": "db02", "sn": "SN3", "status": "faulty" }),
        )
        .await;

        let res = app
            .get(&format!("{}?asset_type=server&status=online", routes::ASSETS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["data"][0]["name"], "db01");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let app = TestApp::spawn().await;
        for i in 0..3 {
            app.create_asset(&format!("host{i}"), &format!("SN{i}")).await;
        }

        let res = app
            .get(&format!("{}?page=1&per_page=2", routes::ASSETS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["total"], 3);
        assert_eq!(res.body["pagination"]["total_pages"], 2);
        assert_eq!(res.body["data"][0]["name"], "host2");
        assert_eq!(res.body["data"][1]["name"], "host1");
    }

    #[tokio::test]
    async fn page_beyond_addressable_range_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_asset("db01", "SN1").await;

        let res = app
            .get(&format!(
                "{}?page={}&per_page=20",
                routes::ASSETS,
                u64::MAX
            ))
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .get(&format!("{}?page=1000&per_page=20", routes::ASSETS))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], json!([]));
    }

    #[tokio::test]
    async fn search_matches_name_or_serial_case_insensitively() {
        let app = TestApp::spawn().await;
        app.create_asset("web-frontend", "AAA111").await;
        app.create_asset("db01", "web-sn").await;
        app.create_asset("cache01", "ZZZ").await;

        let res = app.get(&format!("{}?search=WEB", routes::ASSETS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let app = TestApp::spawn().await;
        app.create_asset("db01", "SN1").await;

        let res = app.get(&format!("{}?search=%25", routes::ASSETS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["total"], 0);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn null_clears_reference() {
        let app = TestApp::spawn().await;
        let bu = app
            .create(routes::BUSINESS_UNITS, json!({ "name": "Payments" }))
            .await;
        let id = app
            .create(
                routes::ASSETS,
                json!({ "name": "db01", "sn": "SN1", "business_unit_id": bu, "memo": "rack 4" }),
            )
            .await;

        let res = app
            .patch(&routes::asset(id), &json!({ "business_unit_id": null }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["business_unit_id"].is_null());
        assert_eq!(res.body["memo"], "rack 4");
    }

    #[tokio::test]
    async fn changing_type_updates_display_name() {
        let app = TestApp::spawn().await;
        let id = app.create_asset("fw01", "SN1").await;

        let res = app
            .patch(&routes::asset(id), &json!({ "asset_type": "securitydevice" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["display_name"], "<安全设备> fw01");
    }

    #[tokio::test]
    async fn empty_payload_returns_current_asset() {
        let app = TestApp::spawn().await;
        let id = app.create_asset("db01", "SN1").await;
        let before = app.get(&routes::asset(id)).await;

        let res = app.patch(&routes::asset(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["updated_at"], before.body["updated_at"]);
    }

    #[tokio::test]
    async fn rename_to_existing_name_is_conflict() {
        let app = TestApp::spawn().await;
        app.create_asset("db01", "SN1").await;
        let id = app.create_asset("db02", "SN2").await;

        let res = app.patch(&routes::asset(id), &json!({ "name": "db01" })).await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn expire_day_checked_against_stored_purchase_day() {
        let app = TestApp::spawn().await;
        let id = app
            .create(
                routes::ASSETS,
                json!({ "name": "db01", "sn": "SN1", "purchase_day": "2024-06-01" }),
            )
            .await;

        let res = app
            .patch(&routes::asset(id), &json!({ "expire_day": "2023-01-01" }))
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn patch_missing_asset_returns_404() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::asset(9999), &json!({ "memo": "x" }))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod tags {
    use super::*;

    #[tokio::test]
    async fn put_replaces_full_set() {
        let app = TestApp::spawn().await;
        let a = app.create_tag("a").await;
        let b = app.create_tag("b").await;
        let id = app
            .create(
                routes::ASSETS,
                json!({ "name": "db01", "sn": "SN1", "tag_ids": [a] }),
            )
            .await;

        let res = app
            .put(&routes::asset_tags(id), &json!({ "tag_ids": [b] }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["tags"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["tags"][0]["name"], "b");
    }

    #[tokio::test]
    async fn unknown_tag_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_asset("db01", "SN1").await;

        let res = app
            .put(&routes::asset_tags(id), &json!({ "tag_ids": [9999] }))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn duplicate_tag_ids_are_rejected() {
        let app = TestApp::spawn().await;
        let t = app.create_tag("a").await;
        let id = app.create_asset("db01", "SN1").await;

        let res = app
            .put(&routes::asset_tags(id), &json!({ "tag_ids": [t, t] }))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn deleting_tag_detaches_it() {
        let app = TestApp::spawn().await;
        let t = app.create_tag("a").await;
        let id = app
            .create(
                routes::ASSETS,
                json!({ "name": "db01", "sn": "SN1", "tag_ids": [t] }),
            )
            .await;

        let res = app.delete(&routes::item(routes::TAGS, t)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::asset(id)).await;
        assert_eq!(res.body["tags"], json!([]));
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_returns_204_then_404() {
        let app = TestApp::spawn().await;
        let id = app.create_asset("db01", "SN1").await;

        let res = app.delete(&routes::asset(id)).await;
        assert_eq!(res.status, 204);

        let res = app.delete(&routes::asset(id)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_cascades_to_every_sub_record() {
        let app = TestApp::spawn().await;
        let id = app.create_asset("box01", "SN1").await;

        let server = app
            .create(routes::SERVERS, json!({ "asset_id": id }))
            .await;
        let net = app
            .create(routes::NETWORK_DEVICES, json!({ "asset_id": id }))
            .await;
        let storage = app
            .create(routes::STORAGE_DEVICES, json!({ "asset_id": id }))
            .await;
        let security = app
            .create(routes::SECURITY_DEVICES, json!({ "asset_id": id }))
            .await;

        let res = app.delete(&routes::asset(id)).await;
        assert_eq!(res.status, 204);

        for path in [
            routes::item(routes::SERVERS, server),
            routes::item(routes::NETWORK_DEVICES, net),
            routes::item(routes::STORAGE_DEVICES, storage),
            routes::item(routes::SECURITY_DEVICES, security),
        ] {
            let res = app.get(&path).await;
            assert_eq!(res.status, 404, "{path} should be gone");
        }
    }
}
