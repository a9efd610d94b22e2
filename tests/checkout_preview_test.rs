mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sea_orm::{EntityTrait, PaginatorTrait};
use sinarbaja_api::{
    entities::{FulfillmentType, Order},
    errors::ServiceError,
    services::{
        carts::CreateCartInput,
        checkout::{PreviewInput, PreviewLineInput},
        orders::BankChoice,
    },
};

fn bank() -> BankChoice {
    BankChoice {
        atas_nama: "TB Sinar Baja".to_string(),
        bank: "BCA".to_string(),
        no_rekening: "1234567890".to_string(),
    }
}

#[tokio::test]
async fn pickup_preview_computes_totals_without_persisting() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u1", "Budi").await;
    app.seed_product("X1", 1000, 10).await;

    let preview = app
        .state
        .services
        .checkout
        .preview(
            PreviewInput {
                fulfillment_type: FulfillmentType::Pickup,
                bank: bank(),
                products: Some(vec![PreviewLineInput {
                    kode_item: "X1".to_string(),
                    quantity: 2,
                }]),
                carts: None,
                subtotal_ongkir: None,
            },
            &user_id,
        )
        .await
        .unwrap();

    assert_eq!(preview.subtotal_produk, 2000);
    assert_eq!(preview.subtotal_ongkir, 0);
    assert_eq!(preview.total, 2000);
    assert_eq!(preview.products.len(), 1);
    assert_eq!(preview.products[0].harga, 1000);

    // Preview never writes.
    assert_eq!(Order::find().count(&*app.state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn delivery_preview_adds_known_shipping_cost() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u2", "Siti").await;
    app.seed_product("X2", 2500, 10).await;

    let preview = app
        .state
        .services
        .checkout
        .preview(
            PreviewInput {
                fulfillment_type: FulfillmentType::Delivery,
                bank: bank(),
                products: Some(vec![PreviewLineInput {
                    kode_item: "X2".to_string(),
                    quantity: 4,
                }]),
                carts: None,
                subtotal_ongkir: Some(15_000),
            },
            &user_id,
        )
        .await
        .unwrap();

    assert_eq!(preview.subtotal_produk, 10_000);
    assert_eq!(preview.subtotal_ongkir, 15_000);
    assert_eq!(preview.total, 25_000);
}

#[tokio::test]
async fn preview_from_cart_entries_uses_cart_quantities() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u3", "Andi").await;
    app.seed_product("X3", 500, 10).await;

    app.state
        .services
        .carts
        .create_cart(
            CreateCartInput {
                kode_item: "X3".to_string(),
                qty: 3,
            },
            &user_id,
        )
        .await
        .unwrap();
    let listing = app.state.services.carts.get_carts(&user_id).await.unwrap();
    let cart = &listing[0];

    let preview = app
        .state
        .services
        .checkout
        .preview(
            PreviewInput {
                fulfillment_type: FulfillmentType::Pickup,
                bank: bank(),
                products: None,
                carts: Some(vec![cart.cart_id.clone()]),
                subtotal_ongkir: None,
            },
            &user_id,
        )
        .await
        .unwrap();

    assert_eq!(preview.subtotal_produk, 1500);
    assert_eq!(preview.products[0].quantity, 3);
}

#[tokio::test]
async fn preview_rejects_unknown_products_and_oversized_quantities() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u4", "Rina").await;
    app.seed_product("X4", 500, 2).await;

    let err = app
        .state
        .services
        .checkout
        .preview(
            PreviewInput {
                fulfillment_type: FulfillmentType::Pickup,
                bank: bank(),
                products: Some(vec![PreviewLineInput {
                    kode_item: "NOPE".to_string(),
                    quantity: 1,
                }]),
                carts: None,
                subtotal_ongkir: None,
            },
            &user_id,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let err = app
        .state
        .services
        .checkout
        .preview(
            PreviewInput {
                fulfillment_type: FulfillmentType::Pickup,
                bank: bank(),
                products: Some(vec![PreviewLineInput {
                    kode_item: "X4".to_string(),
                    quantity: 3,
                }]),
                carts: None,
                subtotal_ongkir: None,
            },
            &user_id,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UnprocessableEntity(_));
}
