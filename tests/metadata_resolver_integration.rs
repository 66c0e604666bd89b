use std::net::SocketAddr;

use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use locker_backend::features::locker::resolver::{BannerNames, MetadataClient, UNKNOWN_NAME};
use locker_backend::features::locker::{Category, Rarity};

/// 元数据桩服务：`cid_named` 有完整元数据，`eid_nameless` 缺 name 字段，
/// `cid_unknown` 返回字面量 "Unknown"，其余 id 一律 404。
async fn start_stub_metadata_server() -> SocketAddr {
    async fn cosmetic(Path(id): Path<String>) -> impl IntoResponse {
        match id.as_str() {
            "cid_named" => (
                StatusCode::OK,
                Json(json!({
                    "data": {
                        "name": "Renegade Raider",
                        "rarity": { "displayValue": "Rare" }
                    }
                })),
            ),
            "eid_nameless" => (
                StatusCode::OK,
                Json(json!({ "data": { "rarity": { "displayValue": "Epic" } } })),
            ),
            "cid_unknown" => (
                StatusCode::OK,
                Json(json!({ "data": { "name": "Unknown" } })),
            ),
            _ => (StatusCode::NOT_FOUND, Json(json!({ "status": 404 }))),
        }
    }

    async fn banners() -> Json<serde_json::Value> {
        Json(json!({
            "data": [
                {
                    "id": "OT1Banner",
                    "devName": "OT Season 1",
                    "images": { "icon": "http://127.0.0.1:1/ot1.png" }
                },
                { "id": "NoIconBanner", "devName": "No Icon" }
            ]
        }))
    }

    let app = Router::new()
        .route("/v2/cosmetics/br/:id", get(cosmetic))
        .route("/v1/banners", get(banners));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

#[tokio::test]
async fn resolves_name_and_rarity_from_upstream() {
    let addr = start_stub_metadata_server().await;
    let client = MetadataClient::new(format!("http://{addr}"));

    let item = client.resolve("cid_named", &BannerNames::new()).await;
    assert_eq!(item.name, "Renegade Raider");
    assert_eq!(item.rarity, Rarity::Rare);
    assert_eq!(item.category, Category::Skins);
}

#[tokio::test]
async fn missing_metadata_keeps_item_with_id_as_name() {
    let addr = start_stub_metadata_server().await;
    let client = MetadataClient::new(format!("http://{addr}"));

    let item = client
        .resolve("pickaxe_id_mystery", &BannerNames::new())
        .await;
    assert_eq!(item.name, "pickaxe_id_mystery");
    assert_eq!(item.rarity, Rarity::Common);
}

#[tokio::test]
async fn nameless_upstream_entry_falls_back_to_id() {
    let addr = start_stub_metadata_server().await;
    let client = MetadataClient::new(format!("http://{addr}"));

    let item = client.resolve("eid_nameless", &BannerNames::new()).await;
    assert_eq!(item.name, "eid_nameless");
    assert_eq!(item.rarity, Rarity::Epic);
}

#[tokio::test]
async fn upstream_unknown_literal_is_the_discard_sentinel() {
    let addr = start_stub_metadata_server().await;
    let client = MetadataClient::new(format!("http://{addr}"));

    let item = client.resolve("cid_unknown", &BannerNames::new()).await;
    assert_eq!(item.name, UNKNOWN_NAME);
    assert_eq!(item.rarity, Rarity::Common);
}

#[tokio::test]
async fn banner_listing_keys_are_lowercase_bare_ids() {
    let addr = start_stub_metadata_server().await;
    let client = MetadataClient::new(format!("http://{addr}"));

    let listing = client.fetch_banner_listing().await;
    let entry = listing.get("ot1banner").expect("ot1banner entry");
    assert_eq!(entry.dev_name, "OT Season 1");
    assert!(entry.icon_url.is_some());

    let no_icon = listing.get("noiconbanner").expect("noiconbanner entry");
    assert!(no_icon.icon_url.is_none());
}

#[tokio::test]
async fn unreachable_metadata_service_degrades_to_common() {
    // 连接被拒与 404 同等兜底：条目保留，不让整批渲染失败。
    let client = MetadataClient::new("http://127.0.0.1:1");

    let item = client
        .resolve("cid_unreachable", &BannerNames::new())
        .await;
    assert_eq!(item.name, "cid_unreachable");
    assert_eq!(item.rarity, Rarity::Common);

    // 兜底路径同样套用提升名单：名单内条目仍是 Mythic。
    let elevated = client
        .resolve("cid_017_athena_commando_m", &BannerNames::new())
        .await;
    assert_eq!(elevated.rarity, Rarity::Mythic);

    // 横幅总表拉不到按空表处理，本次横幅全部跳过。
    assert!(client.fetch_banner_listing().await.is_empty());
}
