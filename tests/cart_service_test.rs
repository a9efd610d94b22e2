mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use sinarbaja_api::{
    entities::{cart, Cart},
    errors::ServiceError,
    services::carts::{CreateCartInput, QuantityChange, UpdateQuantityInput},
};

async fn cart_row(app: &TestApp, user_id: &str, kode_item: &str) -> cart::Model {
    Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .filter(cart::Column::KodeItem.eq(kode_item))
        .one(&*app.state.db)
        .await
        .unwrap()
        .expect("cart row missing")
}

#[tokio::test]
async fn adding_the_same_product_twice_merges_quantities() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u1", "Budi").await;
    app.seed_product("P1", 1000, 50).await;

    let carts = &app.state.services.carts;
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P1".to_string(),
                qty: 2,
            },
            &user_id,
        )
        .await
        .unwrap();
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P1".to_string(),
                qty: 3,
            },
            &user_id,
        )
        .await
        .unwrap();

    let listing = carts.get_carts(&user_id).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].qty, 5);
    assert_eq!(listing[0].nama_produk_asli, "Produk P1");
    assert_eq!(listing[0].harga_6, 1000);
}

#[tokio::test]
async fn increment_past_stock_is_rejected() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u2", "Siti").await;
    app.seed_product("P2", 1000, 2).await;

    let carts = &app.state.services.carts;
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P2".to_string(),
                qty: 2,
            },
            &user_id,
        )
        .await
        .unwrap();
    let row = cart_row(&app, &user_id, "P2").await;

    let err = carts
        .update_quantity(
            UpdateQuantityInput {
                cart_id: row.cart_id.clone(),
                kode_item: "P2".to_string(),
                change: QuantityChange::Increment,
                qty: None,
            },
            &user_id,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UnprocessableEntity(_));

    // Quantity unchanged after the rejected bump.
    assert_eq!(cart_row(&app, &user_id, "P2").await.qty, 2);
}

#[tokio::test]
async fn increment_and_decrement_adjust_by_one() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u3", "Andi").await;
    app.seed_product("P3", 500, 10).await;

    let carts = &app.state.services.carts;
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P3".to_string(),
                qty: 4,
            },
            &user_id,
        )
        .await
        .unwrap();
    let row = cart_row(&app, &user_id, "P3").await;

    carts
        .update_quantity(
            UpdateQuantityInput {
                cart_id: row.cart_id.clone(),
                kode_item: "P3".to_string(),
                change: QuantityChange::Increment,
                qty: None,
            },
            &user_id,
        )
        .await
        .unwrap();
    assert_eq!(cart_row(&app, &user_id, "P3").await.qty, 5);

    carts
        .update_quantity(
            UpdateQuantityInput {
                cart_id: row.cart_id.clone(),
                kode_item: "P3".to_string(),
                change: QuantityChange::Decrement,
                qty: None,
            },
            &user_id,
        )
        .await
        .unwrap();
    assert_eq!(cart_row(&app, &user_id, "P3").await.qty, 4);
}

#[tokio::test]
async fn direct_input_respects_the_stock_ceiling() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u4", "Rina").await;
    app.seed_product("P4", 500, 5).await;

    let carts = &app.state.services.carts;
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P4".to_string(),
                qty: 1,
            },
            &user_id,
        )
        .await
        .unwrap();
    let row = cart_row(&app, &user_id, "P4").await;

    let err = carts
        .update_quantity(
            UpdateQuantityInput {
                cart_id: row.cart_id.clone(),
                kode_item: "P4".to_string(),
                change: QuantityChange::Input,
                qty: Some(9),
            },
            &user_id,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::UnprocessableEntity(_));

    carts
        .update_quantity(
            UpdateQuantityInput {
                cart_id: row.cart_id,
                kode_item: "P4".to_string(),
                change: QuantityChange::Input,
                qty: Some(5),
            },
            &user_id,
        )
        .await
        .unwrap();
    assert_eq!(cart_row(&app, &user_id, "P4").await.qty, 5);
}

#[tokio::test]
async fn active_toggle_and_delete_are_owner_scoped() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u5", "Dewi").await;
    let other = app.seed_user("u6", "Tono").await;
    app.seed_product("P5", 500, 10).await;

    let carts = &app.state.services.carts;
    carts
        .create_cart(
            CreateCartInput {
                kode_item: "P5".to_string(),
                qty: 1,
            },
            &user_id,
        )
        .await
        .unwrap();
    let row = cart_row(&app, &user_id, "P5").await;

    // Another user cannot touch this row.
    let err = carts
        .update_active(&row.cart_id, &other, false)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    let err = carts.delete_cart(&row.cart_id, &other).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    carts
        .update_active(&row.cart_id, &user_id, false)
        .await
        .unwrap();
    assert!(!cart_row(&app, &user_id, "P5").await.active);

    carts.delete_cart(&row.cart_id, &user_id).await.unwrap();
    assert!(Cart::find()
        .filter(cart::Column::UserId.eq(user_id.as_str()))
        .one(&*app.state.db)
        .await
        .unwrap()
        .is_none());
}
