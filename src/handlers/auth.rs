use crate::{
    errors::ServiceError,
    handlers::common::{created, ok},
    services::accounts::{LoginOperatorInput, LoginUserInput, RegisterUserInput},
    AppState,
};
use axum::{extract::State, response::Response, routing::post, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/operators/login", post(login_operator))
}

async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserInput>,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.accounts.register_user(body).await?))
}

async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginUserInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.accounts.login_user(body).await?))
}

async fn login_operator(
    State(state): State<AppState>,
    Json(body): Json<LoginOperatorInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.accounts.login_operator(body).await?))
}
