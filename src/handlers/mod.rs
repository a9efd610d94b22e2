pub mod auth;
pub mod carts;
pub mod checkout;
pub mod common;
pub mod dashboard;
pub mod home;
pub mod payments;
pub mod products;
pub mod profile;
pub mod transactions;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;
use crate::services;
use axum::Router;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<services::accounts::AccountService>,
    pub catalog: Arc<services::catalog::CatalogService>,
    pub catalog_sync: Arc<services::catalog_sync::CatalogSyncService>,
    pub carts: Arc<services::carts::CartService>,
    pub checkout: Arc<services::checkout::CheckoutService>,
    pub orders: Arc<services::orders::OrderService>,
    pub payments: Arc<services::payments::PaymentService>,
    pub profile: Arc<services::profile::ProfileService>,
    pub dashboard: Arc<services::dashboard::DashboardService>,
    pub regions: Arc<services::regions::RegionService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DbPool>,
        auth: AuthService,
        event_sender: EventSender,
        config: &AppConfig,
    ) -> Self {
        Self {
            accounts: Arc::new(services::accounts::AccountService::new(
                db.clone(),
                auth,
                event_sender.clone(),
            )),
            catalog: Arc::new(services::catalog::CatalogService::new(db.clone())),
            catalog_sync: Arc::new(services::catalog_sync::CatalogSyncService::new(
                db.clone(),
                event_sender.clone(),
            )),
            carts: Arc::new(services::carts::CartService::new(db.clone())),
            checkout: Arc::new(services::checkout::CheckoutService::new(db.clone())),
            orders: Arc::new(services::orders::OrderService::new(
                db.clone(),
                event_sender.clone(),
            )),
            payments: Arc::new(services::payments::PaymentService::new(
                db.clone(),
                event_sender,
            )),
            profile: Arc::new(services::profile::ProfileService::new(db.clone())),
            dashboard: Arc::new(services::dashboard::DashboardService::new(db)),
            regions: Arc::new(services::regions::RegionService::new(
                config.region_api_base.clone(),
            )),
        }
    }
}

/// Everything served under the `/api` prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(home::routes())
        .nest("/auth", auth::routes())
        .nest("/products", products::routes())
        .nest("/carts", carts::routes())
        .nest("/checkout", checkout::routes())
        .nest("/transactions", transactions::routes())
        .nest("/payments", payments::routes())
        .nest("/profile", profile::routes())
        .nest("/dashboard", dashboard::routes())
}
