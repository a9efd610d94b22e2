mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sea_orm::EntityTrait;
use serde_json::json;
use sinarbaja_api::{
    entities::{Category, Operator, PollingLabel, Product, SyncLog},
    errors::ServiceError,
    services::{
        catalog_sync::{
            apply_category_snapshot, apply_product_snapshot, KategoriItem, PenggunaItem,
            ProdukItem,
        },
        dashboard::CreatePollingInput,
    },
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn produk_item(kode_item: &str, nama: &str, kategori: &str, stok: i32) -> ProdukItem {
    serde_json::from_value(json!({
        "kode_item": kode_item,
        "nama_produk": nama,
        "nama_produk_asli": nama,
        "kategori": kategori,
        "harga_6": 1000,
        "total_stok": stok,
        "created_at": "2024-01-01T00:00:00Z",
    }))
    .unwrap()
}

#[tokio::test]
async fn sync_without_registered_url_fails_and_writes_nothing() {
    let app = TestApp::new().await;

    let err = app
        .state
        .services
        .catalog_sync
        .sync_products()
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    assert!(SyncLog::find().all(&*app.state.db).await.unwrap().is_empty());
    assert!(Product::find().all(&*app.state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn product_snapshot_is_idempotent() {
    let app = TestApp::new().await;
    let items = vec![
        produk_item("A1", "PAKU  5  CM", "Paku", 10),
        produk_item("A2", " BESI BETON ", "Besi", 4),
    ];

    apply_product_snapshot(&app.state.db, items.clone())
        .await
        .unwrap();
    let mut first: Vec<_> = Product::find().all(&*app.state.db).await.unwrap();
    first.sort_by(|a, b| a.kode_item.cmp(&b.kode_item));
    assert_eq!(first.len(), 2);

    apply_product_snapshot(&app.state.db, items).await.unwrap();
    let mut second: Vec<_> = Product::find().all(&*app.state.db).await.unwrap();
    second.sort_by(|a, b| a.kode_item.cmp(&b.kode_item));
    assert_eq!(second.len(), 2);

    // Rows unchanged apart from the refresh timestamp.
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.kode_item, b.kode_item);
        assert_eq!(a.nama_produk_asli, b.nama_produk_asli);
        assert_eq!(a.slug, b.slug);
        assert_eq!(a.total_stok, b.total_stok);
        assert_eq!(a.created_at, b.created_at);
    }
}

#[tokio::test]
async fn product_names_are_normalized_and_slugged() {
    let app = TestApp::new().await;

    apply_product_snapshot(
        &app.state.db,
        vec![produk_item("B1", "  PAKU   5 CM ", "Paku", 7)],
    )
    .await
    .unwrap();

    let row = Product::find_by_id("B1")
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.nama_produk_asli, "PAKU 5 CM");
    assert_eq!(row.slug, "paku-5-cm");
    assert!(row.active);
}

#[tokio::test]
async fn resync_preserves_storefront_owned_fields() {
    let app = TestApp::new().await;

    apply_product_snapshot(&app.state.db, vec![produk_item("C1", "SEMEN", "Semen", 3)])
        .await
        .unwrap();

    // Operator hides the product, then a sync refreshes POS data.
    app.state
        .services
        .dashboard
        .update_active(
            serde_json::from_value(
                json!({"type": "product", "kode_item": "C1", "value": false}),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    apply_product_snapshot(
        &app.state.db,
        vec![produk_item("C1", "SEMEN GRESIK", "Semen", 8)],
    )
    .await
    .unwrap();

    let row = Product::find_by_id("C1")
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.nama_produk_asli, "SEMEN GRESIK");
    assert_eq!(row.total_stok, 8);
    assert!(!row.active, "active flag must survive resync");
}

#[tokio::test]
async fn full_product_sync_pulls_from_the_registered_url() {
    let app = TestApp::new().await;
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/polling/produk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status_code": 200,
            "data": {
                "produk": [
                    {
                        "kode_item": "D1",
                        "nama_produk": "CAT TEMBOK",
                        "nama_produk_asli": "CAT TEMBOK",
                        "kategori": "Cat",
                        "harga_6": 55000,
                        "total_stok": 9,
                        "created_at": "2024-02-01T00:00:00Z",
                        "gudang": [{"stok": 9, "nama": "Gudang A"}]
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    app.state
        .services
        .dashboard
        .create_polling(CreatePollingInput {
            url: format!("{}/polling/produk", server.uri()),
            label: PollingLabel::Produk,
        })
        .await
        .unwrap();

    let receipt = app
        .state
        .services
        .catalog_sync
        .sync_products()
        .await
        .unwrap();

    let row = Product::find_by_id("D1")
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.harga_6, 55000);

    let audit = SyncLog::find().all(&*app.state.db).await.unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].label, "produk");
    assert_eq!(audit[0].synchronized_at, receipt.synchronized_at);
}

#[tokio::test]
async fn category_snapshot_creates_missing_rows_once() {
    let app = TestApp::new().await;
    let items = vec![
        KategoriItem {
            id_kategori: 2,
            nama: "Paku".to_string(),
        },
        KategoriItem {
            id_kategori: 1,
            nama: "Besi".to_string(),
        },
    ];

    apply_category_snapshot(&app.state.db, items.clone())
        .await
        .unwrap();
    apply_category_snapshot(&app.state.db, items).await.unwrap();

    let categories = Category::find().all(&*app.state.db).await.unwrap();
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn operator_sync_keeps_only_admin_roles_and_logs_as_operator() {
    let app = TestApp::new().await;
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/polling/pengguna"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status_code": 200,
            "data": [
                {
                    "username": "owner01",
                    "nama": "Pemilik",
                    "password_hash": "hash",
                    "role": "owner,kasir"
                },
                {
                    "username": "kasir01",
                    "nama": "Kasir",
                    "password_hash": "hash",
                    "role": "kasir"
                }
            ]
        })))
        .mount(&server)
        .await;

    app.state
        .services
        .dashboard
        .create_polling(CreatePollingInput {
            url: format!("{}/polling/pengguna", server.uri()),
            label: PollingLabel::Pengguna,
        })
        .await
        .unwrap();

    app.state
        .services
        .catalog_sync
        .sync_operators()
        .await
        .unwrap();

    let operators = Operator::find().all(&*app.state.db).await.unwrap();
    assert_eq!(operators.len(), 1);
    assert_eq!(operators[0].username, "owner01");

    // The audit label is `operator`, not the polling label `pengguna`.
    let audit = SyncLog::find().all(&*app.state.db).await.unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].label, "operator");
}

#[tokio::test]
async fn unused_operator_items_do_not_break_deserialization() {
    let raw = json!({
        "username": "x",
        "nama": "X",
        "password_hash": "h",
        "password_encrypt": "e",
        "role": "admin",
        "created_at": "2024-01-01",
        "updated_at": "2024-01-02"
    });
    let item: PenggunaItem = serde_json::from_value(raw).unwrap();
    assert_eq!(item.password_encrypt.as_deref(), Some("e"));
}
