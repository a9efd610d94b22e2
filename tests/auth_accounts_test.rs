mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use common::TestApp;
use sea_orm::{ActiveModelTrait, Set};
use sinarbaja_api::{
    entities::operator,
    errors::ServiceError,
    services::accounts::{hash_password, LoginOperatorInput, LoginUserInput, RegisterUserInput},
};

#[tokio::test]
async fn register_then_login_issues_a_user_token() {
    let app = TestApp::new().await;
    let accounts = &app.state.services.accounts;

    let registered = accounts
        .register_user(RegisterUserInput {
            nama: "Budi".to_string(),
            email: "budi@example.test".to_string(),
            password: "kata-sandi-rahasia".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(registered.email, "budi@example.test");

    let session = accounts
        .login_user(LoginUserInput {
            email: "budi@example.test".to_string(),
            password: "kata-sandi-rahasia".to_string(),
        })
        .await
        .unwrap();

    let claims = app.state.auth.validate_token(&session.access_token).unwrap();
    assert_eq!(claims.sub, registered.user_id);
    assert_eq!(claims.role, "user");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    let accounts = &app.state.services.accounts;

    let input = || RegisterUserInput {
        nama: "Budi".to_string(),
        email: "dup@example.test".to_string(),
        password: "kata-sandi-rahasia".to_string(),
    };

    accounts.register_user(input()).await.unwrap();
    let err = accounts.register_user(input()).await.unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));
}

#[tokio::test]
async fn wrong_password_fails_without_leaking_which_half_was_wrong() {
    let app = TestApp::new().await;
    let accounts = &app.state.services.accounts;

    accounts
        .register_user(RegisterUserInput {
            nama: "Siti".to_string(),
            email: "siti@example.test".to_string(),
            password: "kata-sandi-rahasia".to_string(),
        })
        .await
        .unwrap();

    let err = accounts
        .login_user(LoginUserInput {
            email: "siti@example.test".to_string(),
            password: "salah".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(msg) if msg == "Email or password wrong");

    let err = accounts
        .login_user(LoginUserInput {
            email: "tidak-ada@example.test".to_string(),
            password: "apapun".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(msg) if msg == "Email or password wrong");
}

#[tokio::test]
async fn operator_login_issues_an_admin_token() {
    let app = TestApp::new().await;

    let now = Utc::now();
    operator::ActiveModel {
        username: Set("kasir01".to_string()),
        nama: Set("Kasir Satu".to_string()),
        password_hash: Set(hash_password("rahasia-operator").unwrap()),
        password_encrypt: Set(None),
        role: Set("admin".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*app.state.db)
    .await
    .unwrap();

    let session = app
        .state
        .services
        .accounts
        .login_operator(LoginOperatorInput {
            username: "kasir01".to_string(),
            password: "rahasia-operator".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.nama, "Kasir Satu");

    let claims = app.state.auth.validate_token(&session.access_token).unwrap();
    assert_eq!(claims.role, "admin");

    let err = app
        .state
        .services
        .accounts
        .login_operator(LoginOperatorInput {
            username: "kasir01".to_string(),
            password: "salah".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));
}
