use crate::domain::order::Order;
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::domain::product::Product;
use crate::error::{OrderError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing orders.
pub const CF_ORDERS: &str = "orders";
/// Column Family for storing the product catalog.
pub const CF_PRODUCTS: &str = "products";

fn cf_missing(name: &str) -> OrderError {
    OrderError::InternalError(Box::new(std::io::Error::other(format!(
        "{name} column family not found"
    ))))
}

fn codec_error(e: serde_json::Error) -> OrderError {
    OrderError::InternalError(Box::new(e))
}

/// A persistent store implementation using RocksDB.
///
/// Handles storage for both `Order` and `Product` entities using separate
/// Column Families, with serde_json values.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring the
    /// "orders" and "products" column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_products])?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Seeds one catalog product. Not part of the `ProductRepository` port,
    /// which only exposes lookup.
    pub fn put_product(&self, product: &Product) -> Result<()> {
        let cf = self.db.cf_handle(CF_PRODUCTS).ok_or_else(|| cf_missing(CF_PRODUCTS))?;
        let value = serde_json::to_vec(product).map_err(codec_error)?;
        self.db.put_cf(&cf, product.id.as_bytes(), value)?;
        Ok(())
    }

    fn put_order(&self, order: &Order) -> Result<()> {
        let cf = self.db.cf_handle(CF_ORDERS).ok_or_else(|| cf_missing(CF_ORDERS))?;
        let value = serde_json::to_vec(order).map_err(codec_error)?;
        self.db.put_cf(&cf, order.id().as_bytes(), value)?;
        Ok(())
    }

    fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        let cf = self.db.cf_handle(CF_ORDERS).ok_or_else(|| cf_missing(CF_ORDERS))?;
        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes).map_err(codec_error)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OrderRepository for RocksDBStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        self.get_order(id)
    }

    async fn insert(&self, order: Order) -> Result<()> {
        self.put_order(&order)
    }

    async fn update(&self, order: Order) -> Result<()> {
        if self.get_order(order.id())?.is_none() {
            return Err(OrderError::NotFound(format!("order {}", order.id())));
        }
        self.put_order(&order)
    }
}

#[async_trait]
impl ProductRepository for RocksDBStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let cf = self.db.cf_handle(CF_PRODUCTS).ok_or_else(|| cf_missing(CF_PRODUCTS))?;
        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes).map_err(codec_error)?)),
            None => Ok(None),
        }
    }
}
