use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use sinarbaja_api::{
    config::AppConfig,
    db,
    entities::{product, user},
    events,
    AppState,
};
use tempfile::TempDir;

/// Test harness: application state backed by a throwaway SQLite database
/// with the real migrations applied.
pub struct TestApp {
    pub state: AppState,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = tmp.path().join("sinarbaja_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "test_secret_key_for_testing_purposes_only".to_string(),
            0,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.public_dir = tmp.path().join("public").to_string_lossy().into_owned();

        let pool = db::establish_connection(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let (event_sender, event_rx) = events::channel(64);
        tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(Arc::new(pool), cfg, event_sender);
        Self { state, _tmp: tmp }
    }

    /// Inserts a minimal sellable product.
    pub async fn seed_product(&self, kode_item: &str, harga_6: i64, total_stok: i32) {
        let now = Utc::now();
        product::ActiveModel {
            kode_item: Set(kode_item.to_string()),
            barcode: Set(None),
            kode_pabrik: Set(None),
            kode_toko: Set(None),
            kode_supplier: Set(None),
            nama_produk: Set(format!("Produk {kode_item}")),
            nama_produk_asli: Set(format!("Produk {kode_item}")),
            nama_produk_sebutan: Set(None),
            merk: Set(None),
            tipe: Set(None),
            satuan_besar: Set(None),
            satuan_kecil: Set(None),
            isi_satuan_besar: Set(None),
            konversi: Set(0),
            harga_pokok: Set(0),
            harga_1: Set(0),
            harga_2: Set(0),
            harga_3: Set(0),
            harga_4: Set(0),
            harga_5: Set(0),
            harga_6: Set(harga_6),
            harga_diskon: Set(0),
            berat: Set(0.0),
            volume: Set(0.0),
            slug: Set(format!("produk-{}", kode_item.to_lowercase())),
            kategori: Set("Umum".to_string()),
            subkategori: Set(None),
            total_stok: Set(total_stok),
            active: Set(true),
            deskripsi: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed product");
    }

    /// Inserts a storefront user and returns its id.
    pub async fn seed_user(&self, user_id: &str, nama: &str) -> String {
        let now = Utc::now();
        user::ActiveModel {
            user_id: Set(user_id.to_string()),
            nama: Set(nama.to_string()),
            email: Set(format!("{user_id}@example.test")),
            no_telpon: Set(Some("081234567890".to_string())),
            password_hash: Set("unused".to_string()),
            tanggal_lahir: Set(None),
            jenis_kelamin: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed user");
        user_id.to_string()
    }
}
