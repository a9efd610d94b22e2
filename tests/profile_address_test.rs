mod common;

use assert_matches::assert_matches;
use common::TestApp;
use sinarbaja_api::{
    errors::ServiceError,
    services::profile::{CreateAddressInput, UpdateAddressInput, UpdateProfileInput},
};

fn address_input(label: &str, main_address: bool) -> CreateAddressInput {
    CreateAddressInput {
        nama_penerima: "Budi Santoso".to_string(),
        no_telpon: "081234567890".to_string(),
        provinsi: "Jawa Timur".to_string(),
        kota: "Surabaya".to_string(),
        kecamatan: "Wonokromo".to_string(),
        alamat_lengkap: "Jl. Mawar No. 1".to_string(),
        label: label.to_string(),
        kode_pos: "60243".to_string(),
        main_address,
    }
}

#[tokio::test]
async fn created_address_round_trips_by_id() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u1", "Budi").await;

    let created = app
        .state
        .services
        .profile
        .create_address(address_input("Rumah", false), &user_id)
        .await
        .unwrap();

    let fetched = app
        .state
        .services
        .profile
        .get_address_by_id(&created.address_id, &user_id)
        .await
        .unwrap();

    assert_eq!(fetched.nama_penerima, "Budi Santoso");
    assert_eq!(fetched.no_telpon, "081234567890");
    assert_eq!(fetched.provinsi, "Jawa Timur");
    assert_eq!(fetched.kota, "Surabaya");
    assert_eq!(fetched.kecamatan, "Wonokromo");
    assert_eq!(fetched.alamat_lengkap, "Jl. Mawar No. 1");
    assert_eq!(fetched.label, "Rumah");
    assert_eq!(fetched.kode_pos, "60243");
    assert!(!fetched.main_address);
}

#[tokio::test]
async fn addresses_are_owner_scoped() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u2", "Siti").await;
    let other = app.seed_user("u3", "Tono").await;

    let created = app
        .state
        .services
        .profile
        .create_address(address_input("Rumah", false), &user_id)
        .await
        .unwrap();

    let err = app
        .state
        .services
        .profile
        .get_address_by_id(&created.address_id, &other)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn only_one_main_address_survives() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u4", "Rina").await;
    let profile = &app.state.services.profile;

    let first = profile
        .create_address(address_input("Rumah", true), &user_id)
        .await
        .unwrap();
    assert!(first.main_address);

    let second = profile
        .create_address(address_input("Toko", true), &user_id)
        .await
        .unwrap();
    assert!(second.main_address);

    let addresses = profile.get_addresses(&user_id).await.unwrap();
    assert_eq!(addresses.len(), 2);
    let mains: Vec<_> = addresses.iter().filter(|a| a.main_address).collect();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0].address_id, second.address_id);
}

#[tokio::test]
async fn address_update_and_delete() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u5", "Dewi").await;
    let profile = &app.state.services.profile;

    let created = profile
        .create_address(address_input("Rumah", false), &user_id)
        .await
        .unwrap();

    let updated = profile
        .update_address(
            UpdateAddressInput {
                address_id: created.address_id.clone(),
                nama_penerima: None,
                no_telpon: None,
                provinsi: None,
                kota: Some("Sidoarjo".to_string()),
                kecamatan: None,
                alamat_lengkap: None,
                label: Some("Gudang".to_string()),
                kode_pos: None,
                main_address: None,
            },
            &user_id,
        )
        .await
        .unwrap();
    assert_eq!(updated.kota, "Sidoarjo");
    assert_eq!(updated.label, "Gudang");
    assert_eq!(updated.nama_penerima, "Budi Santoso");

    profile
        .delete_address(&created.address_id, &user_id)
        .await
        .unwrap();
    let err = profile
        .get_address_by_id(&created.address_id, &user_id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn profile_update_validates_phone_format() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u6", "Eko").await;
    let profile = &app.state.services.profile;

    let err = profile
        .update_profile(
            UpdateProfileInput {
                nama: None,
                no_telpon: Some("12345".to_string()),
                tanggal_lahir: None,
                jenis_kelamin: None,
            },
            &user_id,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Validation(_));

    let detail = profile
        .update_profile(
            UpdateProfileInput {
                nama: Some("Eko Prasetyo".to_string()),
                no_telpon: Some("+6281234567890".to_string()),
                tanggal_lahir: Some("1990-01-01".to_string()),
                jenis_kelamin: Some("P".to_string()),
            },
            &user_id,
        )
        .await
        .unwrap();
    assert_eq!(detail.nama, "Eko Prasetyo");
    assert_eq!(detail.no_telpon.as_deref(), Some("+6281234567890"));
}

#[tokio::test]
async fn profile_summary_counts_transactions() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("u7", "Sari").await;

    let summary = app
        .state
        .services
        .profile
        .get_profile(&user_id)
        .await
        .unwrap();
    assert_eq!(summary.nama, "Sari");
    assert_eq!(summary.total_transaction, 0);
}
