mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sinarbaja_api::{
    entities::{FulfillmentType, PollingLabel},
    errors::ServiceError,
    services::{
        dashboard::{
            ActiveToggle, CreateBankInput, CreatePollingInput, TransactionBucket,
            TransactionQuery, UpdateBankInput,
        },
        orders::{BankChoice, CreateOrderInput, OrderLineInput, ShippingAddressInput},
    },
};

fn delivery_order(kode_item: &str) -> CreateOrderInput {
    CreateOrderInput {
        fulfillment_type: FulfillmentType::Delivery,
        bank: BankChoice {
            atas_nama: "TB Sinar Baja".to_string(),
            bank: "BCA".to_string(),
            no_rekening: "1234567890".to_string(),
        },
        products: vec![OrderLineInput {
            nama_produk_asli: format!("Produk {kode_item}"),
            kode_item: kode_item.to_string(),
            kategori: "Umum".to_string(),
            harga: 1000,
            quantity: 1,
            subtotal_produk: 1000,
        }],
        address: Some(ShippingAddressInput {
            nama_penerima: "Budi".to_string(),
            no_telpon: "081234567890".to_string(),
            provinsi: "Jawa Timur".to_string(),
            kota: "Surabaya".to_string(),
            kecamatan: "Wonokromo".to_string(),
            alamat_lengkap: "Jl. Mawar No. 1".to_string(),
            kode_pos: "60243".to_string(),
        }),
        subtotal_ongkir: 0,
        total: 1000,
        carts: None,
    }
}

#[tokio::test]
async fn transaction_tabs_track_the_lifecycle() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u1", "Budi").await;
    app.seed_product("T1", 1000, 10).await;
    app.seed_product("T2", 1000, 10).await;

    let orders = &app.state.services.orders;
    let first = orders.create(delivery_order("T1"), &user_id).await.unwrap();
    let second = orders.create(delivery_order("T2"), &user_id).await.unwrap();

    let tabs = app
        .state
        .services
        .dashboard
        .get_transaction_tabs()
        .await
        .unwrap();
    assert_eq!(tabs.waitrep, 2);
    assert_eq!(tabs.waituser, 0);

    // Quote one order: it moves to the waituser bucket.
    orders.update_cost(&first.transaksi_id, 10_000).await.unwrap();
    let tabs = app
        .state
        .services
        .dashboard
        .get_transaction_tabs()
        .await
        .unwrap();
    assert_eq!(tabs.waitrep, 1);
    assert_eq!(tabs.waituser, 1);

    // Listing the waituser bucket returns exactly the quoted order.
    let page = app
        .state
        .services
        .dashboard
        .get_transactions(&TransactionQuery {
            page: None,
            status: Some(TransactionBucket::Waituser),
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.transactions[0].transaksi_id, first.transaksi_id);

    // Cancel the other one's order half: it shows up under canceled.
    orders
        .update_cancel(sinarbaja_api::services::orders::CancelInput {
            transaksi_id: second.transaksi_id.clone(),
            kind: sinarbaja_api::services::orders::CancelKind::Order,
            is_cancel: true,
            alasan: Some("stok habis".to_string()),
        })
        .await
        .unwrap();
    let tabs = app
        .state
        .services
        .dashboard
        .get_transaction_tabs()
        .await
        .unwrap();
    assert_eq!(tabs.canceled, 1);

    let canceled = app
        .state
        .services
        .dashboard
        .get_transactions(&TransactionQuery {
            page: None,
            status: Some(TransactionBucket::Canceled),
        })
        .await
        .unwrap();
    assert_eq!(canceled.transactions[0].alasan.as_deref(), Some("stok habis"));
}

#[tokio::test]
async fn todays_revenue_splits_delivery() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u2", "Siti").await;
    app.seed_product("T3", 1000, 10).await;

    app.state
        .services
        .orders
        .create(delivery_order("T3"), &user_id)
        .await
        .unwrap();

    let summary = app.state.services.dashboard.get_dashboard().await.unwrap();
    assert_eq!(summary.transactions.amount, 1);
    assert_eq!(summary.transactions.total, 1000);
    assert_eq!(summary.delivery.amount, 1);
    assert_eq!(summary.delivery.total, 1000);
}

#[tokio::test]
async fn duplicate_bank_account_is_rejected() {
    let app = TestApp::new().await;
    let dashboard = &app.state.services.dashboard;

    dashboard
        .create_bank(CreateBankInput {
            no_rekening: "111222333".to_string(),
            atas_nama: "TB Sinar Baja".to_string(),
            bank: "BCA".to_string(),
        })
        .await
        .unwrap();

    let err = dashboard
        .create_bank(CreateBankInput {
            no_rekening: "111222333".to_string(),
            atas_nama: "Cabang Dua".to_string(),
            bank: "BRI".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));

    let banks = dashboard.get_banks().await.unwrap();
    assert_eq!(banks.len(), 1);

    let updated = dashboard
        .update_bank(UpdateBankInput {
            bank_id: banks[0].bank_id.clone(),
            no_rekening: None,
            atas_nama: Some("Toko Pusat".to_string()),
            bank: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.atas_nama, "Toko Pusat");

    dashboard.delete_bank(&banks[0].bank_id).await.unwrap();
    assert!(dashboard.get_banks().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_polling_url_is_rejected() {
    let app = TestApp::new().await;
    let dashboard = &app.state.services.dashboard;

    dashboard
        .create_polling(CreatePollingInput {
            url: "http://pos.local/produk".to_string(),
            label: PollingLabel::Produk,
        })
        .await
        .unwrap();

    let err = dashboard
        .create_polling(CreatePollingInput {
            url: "http://pos.local/produk".to_string(),
            label: PollingLabel::Kategori,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));

    let err = dashboard.delete_polling(9999).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn category_toggle_cascades_to_products() {
    let app = TestApp::new().await;
    app.seed_product("T4", 1000, 5).await;

    // Seed the matching category row.
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};
    use sinarbaja_api::entities::category;
    category::ActiveModel {
        nama: Set("Umum".to_string()),
        active: Set(true),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&*app.state.db)
    .await
    .unwrap();

    app.state
        .services
        .dashboard
        .update_active(ActiveToggle::Category {
            nama_kategori: "Umum".to_string(),
            value: false,
        })
        .await
        .unwrap();

    use sea_orm::EntityTrait;
    use sinarbaja_api::entities::{Category, Product};
    let product = Product::find_by_id("T4")
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!product.active);
    let category = Category::find().one(&*app.state.db).await.unwrap().unwrap();
    assert!(!category.active);
}
