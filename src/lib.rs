//! Backend API for the TB Sinar Baja storefront.
//!
//! Catalog data is synchronized from the store's POS through registered
//! polling URLs; customers browse products, fill carts and check out as
//! pickup or delivery orders; operators drive the order lifecycle from the
//! dashboard.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod ids;
pub mod migrator;
pub mod services;
pub mod uploads;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: auth::AuthService,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Builds the full application state from configuration and an
    /// established database connection.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        let auth = auth::AuthService::new(
            config.jwt_secret.clone(),
            config.jwt_expiration,
            config.operator_jwt_expiration,
        );
        let services = handlers::AppServices::new(
            db.clone(),
            auth.clone(),
            event_sender.clone(),
            &config,
        );

        Self {
            db,
            config,
            auth,
            event_sender,
            services,
        }
    }
}
