use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::ProductService;
use crate::errors::ServiceError;
use crate::models::{InventoryTransaction, NewTransaction};

/// In-memory log of stock movements. Recording a movement also moves the
/// product's stock through the product service.
#[derive(Clone)]
pub struct InventoryService {
    transactions: Arc<RwLock<Vec<InventoryTransaction>>>,
    products: ProductService,
    latency: Duration,
}

impl InventoryService {
    /// `transactions` are expected newest first.
    pub fn new(
        transactions: Vec<InventoryTransaction>,
        products: ProductService,
        latency: Duration,
    ) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
            products,
            latency,
        }
    }

    /// Every recorded movement, newest first
    #[instrument(skip(self))]
    pub async fn list_transactions(&self) -> Result<Vec<InventoryTransaction>, ServiceError> {
        self.simulate_latency().await;
        Ok(self.transactions.read().await.clone())
    }

    #[instrument(skip(self))]
    pub async fn recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<InventoryTransaction>, ServiceError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().take(limit).cloned().collect())
    }

    /// Records a movement performed by `actor`.
    ///
    /// Outbound quantities are stored negative whatever sign the caller
    /// used. Fails without side effects when the product is unknown, the
    /// quantity is zero or the stock would drop below zero.
    #[instrument(skip(self, new), fields(product_id = %new.product_id, kind = %new.transaction_type))]
    pub async fn record_transaction(
        &self,
        new: NewTransaction,
        actor: &str,
    ) -> Result<InventoryTransaction, ServiceError> {
        if new.quantity == 0 {
            return Err(ServiceError::ValidationError(
                "Quantity must be non-zero".to_string(),
            ));
        }
        if new.product_id.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Please select a product".to_string(),
            ));
        }
        self.simulate_latency().await;

        let quantity = new.signed_quantity();
        let product = self
            .products
            .apply_stock_delta(&new.product_id, quantity)
            .await
            .map_err(|e| {
                warn!(error = %e, "Stock movement rejected");
                e
            })?;

        let transaction = InventoryTransaction {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            transaction_type: new.transaction_type,
            quantity,
            reason: new.reason,
            performed_by: actor.to_string(),
            timestamp: Utc::now(),
        };
        self.transactions.write().await.insert(0, transaction.clone());

        info!(
            transaction_id = %transaction.id,
            quantity,
            stock_quantity = product.stock_quantity,
            "Inventory transaction recorded"
        );
        Ok(transaction)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
