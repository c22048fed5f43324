use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::{load_catalog, ProductSource};
use crate::errors::ServiceError;
use crate::models::{Product, ProductFormData, ProductPatch};
use crate::queries::ProductFilter;

/// In-memory product API.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<RwLock<Vec<Product>>>,
    latency: Duration,
}

impl ProductService {
    /// Creates a product service over an initial catalog
    pub fn new(products: Vec<Product>, latency: Duration) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
            latency,
        }
    }

    /// Full catalog in insertion order
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.simulate_latency().await;
        Ok(self.products.read().await.clone())
    }

    /// Catalog filtered and sorted by `filter`
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        load_catalog(self, filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Product, ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Product id must not be empty".to_string(),
            ));
        }
        self.simulate_latency().await;

        self.products
            .read()
            .await
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| {
                warn!(product_id = %id, "Product not found");
                ServiceError::NotFound(format!("Product {} not found", id))
            })
    }

    /// Validates the form and appends a new product with a fresh id
    #[instrument(skip(self, form), fields(sku = %form.sku))]
    pub async fn create_product(&self, form: ProductFormData) -> Result<Product, ServiceError> {
        form.validate()?;
        self.simulate_latency().await;

        let mut products = self.products.write().await;
        if products.iter().any(|existing| existing.sku == form.sku) {
            let msg = format!("Product with SKU '{}' already exists", form.sku);
            error!(%msg);
            return Err(ServiceError::Conflict(msg));
        }

        let product = form.into_product(Uuid::new_v4().to_string(), Utc::now());
        products.push(product.clone());

        info!(product_id = %product.id, name = %product.name, "Product created successfully");
        Ok(product)
    }

    /// Applies `patch` to an existing product. The merged record must pass
    /// the same validation as a new one.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, ServiceError> {
        self.simulate_latency().await;

        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let merged = products[index].merge(patch);
        merged.validate()?;

        if products
            .iter()
            .any(|other| other.id != id && other.sku == merged.sku)
        {
            let msg = format!("Product with SKU '{}' already exists", merged.sku);
            error!(%msg);
            return Err(ServiceError::Conflict(msg));
        }

        let current = &products[index];
        let updated = merged.into_product(current.id.clone(), current.created_at);
        let updated = Product {
            updated_at: Utc::now(),
            ..updated
        };
        products[index] = updated.clone();

        info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        self.simulate_latency().await;

        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| product.id != id);
        if products.len() == before {
            return Err(ServiceError::NotFound(format!("Product {} not found", id)));
        }

        info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    /// Adds `delta` units to the product's stock. The result may not drop
    /// below zero.
    #[instrument(skip(self))]
    pub(crate) async fn apply_stock_delta(
        &self,
        id: &str,
        delta: i64,
    ) -> Result<Product, ServiceError> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let next = i64::from(product.stock_quantity)
            .checked_add(delta)
            .ok_or_else(|| {
                ServiceError::InvalidInput(format!("Quantity {} is out of range", delta))
            })?;
        if next < 0 {
            warn!(product_id = %id, on_hand = product.stock_quantity, delta, "Stock would go negative");
            return Err(ServiceError::InsufficientStock(format!(
                "Product {} has {} units, cannot remove {}",
                product.name,
                product.stock_quantity,
                delta.unsigned_abs()
            )));
        }

        product.stock_quantity = u32::try_from(next).map_err(|_| {
            ServiceError::InvalidInput(format!("Stock level {} is out of range", next))
        })?;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ProductSource for ProductService {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError> {
        ProductService::fetch_products(self).await
    }
}
