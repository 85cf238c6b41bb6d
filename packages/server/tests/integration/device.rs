use serde_json::json;

use crate::common::{TestApp, routes};

mod servers {
    use super::*;

    #[tokio::test]
    async fn defaults_to_pc_server_created_automatically() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN123").await;

        let res = app
            .post(routes::SERVERS, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["sub_asset_type"], "pc_server");
        assert_eq!(res.body["created_by"], "auto");
        assert!(res.body["model"].is_null());
        assert_eq!(res.body["display_name"], "db01--PC服务器-- <sn:SN123>");
    }

    #[tokio::test]
    async fn display_name_includes_model_and_serial() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN123").await;

        let res = app
            .post(
                routes::SERVERS,
                &json!({ "asset_id": asset, "model": "R730" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["display_name"], "db01--PC服务器--R730 <sn:SN123>");
    }

    #[tokio::test]
    async fn second_server_for_same_asset_is_conflict() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN1").await;
        app.create(routes::SERVERS, json!({ "asset_id": asset })).await;

        let res = app
            .post(routes::SERVERS, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn unknown_asset_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::SERVERS, &json!({ "asset_id": 9999 }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_sub_type_is_rejected() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN1").await;

        let res = app
            .post(
                routes::SERVERS,
                &json!({ "asset_id": asset, "sub_asset_type": "mainframe" }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn server_cannot_host_itself() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN1").await;
        let id = app.create(routes::SERVERS, json!({ "asset_id": asset })).await;

        let res = app
            .patch(
                &routes::item(routes::SERVERS, id),
                &json!({ "hosted_on_id": id }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn hosting_cycle_is_rejected() {
        let app = TestApp::spawn().await;
        let a_asset = app.create_asset("host-a", "SN1").await;
        let b_asset = app.create_asset("host-b", "SN2").await;
        let c_asset = app.create_asset("host-c", "SN3").await;
        let a = app.create(routes::SERVERS, json!({ "asset_id": a_asset })).await;
        let b = app
            .create(routes::SERVERS, json!({ "asset_id": b_asset, "hosted_on_id": a }))
            .await;
        let c = app
            .create(routes::SERVERS, json!({ "asset_id": c_asset, "hosted_on_id": b }))
            .await;

        let res = app
            .patch(&routes::item(routes::SERVERS, a), &json!({ "hosted_on_id": b }))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .patch(&routes::item(routes::SERVERS, a), &json!({ "hosted_on_id": c }))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);

        let res = app
            .patch(&routes::item(routes::SERVERS, c), &json!({ "hosted_on_id": a }))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["hosted_on_id"], a);
    }

    #[tokio::test]
    async fn deleting_host_removes_hosted_servers() {
        let app = TestApp::spawn().await;
        let host_asset = app.create_asset("host01", "SN1").await;
        let vm_asset = app.create_asset("vm01", "SN2").await;
        let host = app
            .create(routes::SERVERS, json!({ "asset_id": host_asset }))
            .await;
        let vm = app
            .create(
                routes::SERVERS,
                json!({ "asset_id": vm_asset, "hosted_on_id": host }),
            )
            .await;

        let res = app.delete(&routes::item(routes::SERVERS, host)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::item(routes::SERVERS, vm)).await;
        assert_eq!(res.status, 404);

        // Parent assets survive.
        let res = app.get(&routes::asset(vm_asset)).await;
        assert_eq!(res.status, 200);
    }

    #[tokio::test]
    async fn patch_null_clears_model() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("db01", "SN1").await;
        let id = app
            .create(routes::SERVERS, json!({ "asset_id": asset, "model": "R730" }))
            .await;

        let res = app
            .patch(&routes::item(routes::SERVERS, id), &json!({ "model": null }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["model"].is_null());
        assert_eq!(res.body["display_name"], "db01--PC服务器-- <sn:SN1>");
    }

    #[tokio::test]
    async fn list_filters_by_sub_type() {
        let app = TestApp::spawn().await;
        let a = app.create_asset("db01", "SN1").await;
        let b = app.create_asset("db02", "SN2").await;
        app.create(routes::SERVERS, json!({ "asset_id": a })).await;
        app.create(
            routes::SERVERS,
            json!({ "asset_id": b, "sub_asset_type": "blade" }),
        )
        .await;

        let res = app
            .get(&format!("{}?sub_asset_type=blade", routes::SERVERS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["data"][0]["asset_id"], b);

        let res = app
            .get(&format!("{}?sub_asset_type=mainframe", routes::SERVERS))
            .await;
        assert_eq!(res.status, 400);
    }
}

mod network_devices {
    use super::*;

    #[tokio::test]
    async fn defaults_to_router_with_unknown_model() {
        let app = TestApp::spawn().await;
        let asset = app.create_typed_asset("rt01", "SN9", "networkdevice").await;

        let res = app
            .post(routes::NETWORK_DEVICES, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["sub_asset_type"], "router");
        assert_eq!(res.body["model"], "未知型号");
        assert_eq!(res.body["display_name"], "rt01--路由器--未知型号 <sn:SN9>");
    }

    #[tokio::test]
    async fn invalid_vlan_ip_is_rejected() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("sw01", "SN1").await;

        let res = app
            .post(
                routes::NETWORK_DEVICES,
                &json!({ "asset_id": asset, "vlan_ip": "not-an-ip" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn negative_port_count_is_rejected() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("sw01", "SN1").await;

        let res = app
            .post(
                routes::NETWORK_DEVICES,
                &json!({ "asset_id": asset, "port_num": -1 }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn patch_updates_ip_and_keeps_other_fields() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("sw01", "SN1").await;
        let id = app
            .create(
                routes::NETWORK_DEVICES,
                json!({
                    "asset_id": asset,
                    "sub_asset_type": "switch",
                    "model": "S5720",
                    "port_num": 48,
                }),
            )
            .await;

        let res = app
            .patch(
                &routes::item(routes::NETWORK_DEVICES, id),
                &json!({ "intranet_ip": "10.0.0.1" }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["intranet_ip"], "10.0.0.1");
        assert_eq!(res.body["port_num"], 48);
        assert_eq!(res.body["display_name"], "sw01--交换机--S5720 <sn:SN1>");
    }

    #[tokio::test]
    async fn blank_model_on_patch_resets_to_default() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("sw01", "SN1").await;
        let id = app
            .create(
                routes::NETWORK_DEVICES,
                json!({ "asset_id": asset, "model": "S5720" }),
            )
            .await;

        let res = app
            .patch(
                &routes::item(routes::NETWORK_DEVICES, id),
                &json!({ "model": " " }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["model"], "未知型号");
    }

    #[tokio::test]
    async fn second_record_for_same_asset_is_conflict() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("sw01", "SN1").await;
        app.create(routes::NETWORK_DEVICES, json!({ "asset_id": asset }))
            .await;

        let res = app
            .post(routes::NETWORK_DEVICES, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 409);
    }
}

mod storage_devices {
    use super::*;

    #[tokio::test]
    async fn defaults_to_disk_array_with_unknown_device() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("san01", "SN5").await;

        let res = app
            .post(routes::STORAGE_DEVICES, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["sub_asset_type"], "disk_array");
        assert_eq!(res.body["model"], "未知设备");
        let id = res.id();
        assert_eq!(
            res.body["display_name"],
            format!("san01--磁盘阵列未知设备id:{id}")
        );
    }

    #[tokio::test]
    async fn blank_model_falls_back_to_default() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("san01", "SN5").await;

        let res = app
            .post(
                routes::STORAGE_DEVICES,
                &json!({ "asset_id": asset, "model": "   " }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["model"], "未知设备");
    }

    #[tokio::test]
    async fn delete_keeps_parent_asset() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("san01", "SN5").await;
        let id = app
            .create(routes::STORAGE_DEVICES, json!({ "asset_id": asset }))
            .await;

        let res = app.delete(&routes::item(routes::STORAGE_DEVICES, id)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::asset(asset)).await;
        assert_eq!(res.status, 200);
    }
}

mod security_devices {
    use super::*;

    #[tokio::test]
    async fn defaults_to_firewall_with_unknown_model() {
        let app = TestApp::spawn().await;
        let asset = app.create_typed_asset("fw01", "SN7", "securitydevice").await;

        let res = app
            .post(routes::SECURITY_DEVICES, &json!({ "asset_id": asset }))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["sub_asset_type"], "firewall");
        assert_eq!(res.body["model"], "未知型号");
    }

    #[tokio::test]
    async fn patch_changes_sub_type() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("ids01", "SN8").await;
        let id = app
            .create(routes::SECURITY_DEVICES, json!({ "asset_id": asset }))
            .await;

        let res = app
            .patch(
                &routes::item(routes::SECURITY_DEVICES, id),
                &json!({ "sub_asset_type": "intrusion_detection" }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body["display_name"],
            format!("ids01--入侵检测设备未知型号id:{id}")
        );
    }

    #[tokio::test]
    async fn blank_model_falls_back_to_default() {
        let app = TestApp::spawn().await;
        let asset = app.create_asset("fw01", "SN7").await;

        let res = app
            .post(
                routes::SECURITY_DEVICES,
                &json!({ "asset_id": asset, "model": "" }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["model"], "未知型号");
        let id = res.id();
        assert_eq!(res.body["display_name"], format!("fw01--防火墙未知型号id:{id}"));
    }

    #[tokio::test]
    async fn get_missing_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::item(routes::SECURITY_DEVICES, 9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}
