use crate::{
    entities::{
        banner, category, product, product_image, Banner, BannerModel, Category, CategoryModel,
        Product, ProductImage,
    },
    errors::ServiceError,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// Storefront page size for product listings.
pub const PAGE_SIZE: u64 = 10;

/// Homepage product shelf size.
const HOMEPAGE_PRODUCTS: u64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSort {
    Newest,
    Oldest,
    /// Highest retail price first.
    Highest,
    /// Lowest retail price first.
    Lowest,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub sort: Option<ProductSort>,
}

impl ProductQuery {
    pub fn page(&self) -> u64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * PAGE_SIZE
    }
}

/// Product card used by listings and the homepage shelf.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub kode_item: String,
    pub slug: String,
    pub nama_produk: String,
    pub nama_produk_asli: String,
    pub kategori: String,
    pub harga_1: i64,
    pub harga_2: i64,
    pub harga_3: i64,
    pub harga_4: i64,
    pub harga_5: i64,
    pub harga_6: i64,
    pub total_stok: i32,
    pub image: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub kode_item: String,
    pub slug: String,
    pub nama_produk: String,
    pub nama_produk_asli: String,
    pub kategori: String,
    pub harga_6: i64,
    pub total_stok: i32,
    pub berat: f64,
    pub volume: f64,
    pub merk: Option<String>,
    pub tipe: Option<String>,
    pub satuan_kecil: Option<String>,
    pub satuan_besar: Option<String>,
    pub isi_satuan_besar: Option<String>,
    pub deskripsi: Option<String>,
    pub image: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Homepage {
    pub banners: Vec<BannerModel>,
    pub newest: Vec<ProductCard>,
}

/// Read side of the catalog: plain filtered/paginated queries.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Banners plus the newest sellable products (visible, priced, in
    /// stock).
    #[instrument(skip(self))]
    pub async fn homepage(&self) -> Result<Homepage, ServiceError> {
        let banners = Banner::find()
            .order_by_desc(banner::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let products = Product::find()
            .filter(product::Column::Active.eq(true))
            .filter(product::Column::Harga6.gt(0))
            .filter(product::Column::TotalStok.gt(0))
            .order_by_desc(product::Column::CreatedAt)
            .limit(HOMEPAGE_PRODUCTS)
            .all(&*self.db)
            .await?;

        let newest = self.to_cards(products).await?;
        Ok(Homepage { banners, newest })
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<ProductCard>, ServiceError> {
        let mut select = Product::find();

        select = match query.sort {
            Some(ProductSort::Newest) => select.order_by_desc(product::Column::CreatedAt),
            Some(ProductSort::Oldest) => select.order_by_asc(product::Column::CreatedAt),
            Some(ProductSort::Highest) => select.order_by_desc(product::Column::Harga6),
            Some(ProductSort::Lowest) => select.order_by_asc(product::Column::Harga6),
            None => select,
        };

        let products = select
            .limit(PAGE_SIZE)
            .offset(query.offset())
            .all(&*self.db)
            .await?;

        self.to_cards(products).await
    }

    #[instrument(skip(self))]
    pub async fn product_by_slug(&self, slug: &str) -> Result<ProductDetail, ServiceError> {
        let product = Product::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        self.to_detail(product).await
    }

    #[instrument(skip(self))]
    pub async fn product_by_code(&self, kode_item: &str) -> Result<ProductDetail, ServiceError> {
        let product = Product::find_by_id(kode_item)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        self.to_detail(product).await
    }

    /// All categories ordered by name.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<CategoryModel>, ServiceError> {
        Ok(Category::find()
            .order_by_asc(category::Column::Nama)
            .all(&*self.db)
            .await?)
    }

    async fn to_cards(
        &self,
        products: Vec<product::Model>,
    ) -> Result<Vec<ProductCard>, ServiceError> {
        let mut images = images_by_code(
            &self.db,
            products.iter().map(|p| p.kode_item.clone()).collect(),
        )
        .await?;

        Ok(products
            .into_iter()
            .map(|p| ProductCard {
                image: images.remove(&p.kode_item).unwrap_or_default(),
                kode_item: p.kode_item,
                slug: p.slug,
                nama_produk: p.nama_produk,
                nama_produk_asli: p.nama_produk_asli,
                kategori: p.kategori,
                harga_1: p.harga_1,
                harga_2: p.harga_2,
                harga_3: p.harga_3,
                harga_4: p.harga_4,
                harga_5: p.harga_5,
                harga_6: p.harga_6,
                total_stok: p.total_stok,
            })
            .collect())
    }

    async fn to_detail(&self, product: product::Model) -> Result<ProductDetail, ServiceError> {
        let mut images = images_by_code(&self.db, vec![product.kode_item.clone()]).await?;

        Ok(ProductDetail {
            image: images.remove(&product.kode_item).unwrap_or_default(),
            kode_item: product.kode_item,
            slug: product.slug,
            nama_produk: product.nama_produk,
            nama_produk_asli: product.nama_produk_asli,
            kategori: product.kategori,
            harga_6: product.harga_6,
            total_stok: product.total_stok,
            berat: product.berat,
            volume: product.volume,
            merk: product.merk,
            tipe: product.tipe,
            satuan_kecil: product.satuan_kecil,
            satuan_besar: product.satuan_besar,
            isi_satuan_besar: product.isi_satuan_besar,
            deskripsi: product.deskripsi,
        })
    }
}

/// Loads every image for the given product codes in one query, grouped by
/// code, newest first.
pub async fn images_by_code(
    db: &DatabaseConnection,
    codes: Vec<String>,
) -> Result<HashMap<String, Vec<String>>, ServiceError> {
    if codes.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = ProductImage::find()
        .filter(product_image::Column::KodeItem.is_in(codes))
        .order_by_desc(product_image::Column::CreatedAt)
        .all(db)
        .await?;

    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        grouped.entry(row.kode_item).or_default().push(row.url);
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        let query = ProductQuery {
            page: None,
            sort: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.offset(), 0);

        let query = ProductQuery {
            page: Some(0),
            sort: None,
        };
        assert_eq!(query.page(), 1);

        let query = ProductQuery {
            page: Some(3),
            sort: None,
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn sort_deserializes_from_query_values() {
        let q: ProductQuery =
            serde_json::from_str(r#"{"page": 2, "sort": "highest"}"#).unwrap();
        assert_eq!(q.sort, Some(ProductSort::Highest));
    }
}
