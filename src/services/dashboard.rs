use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use super::{InventoryService, ProductService};
use crate::errors::ServiceError;
use crate::models::{ChartData, DashboardStats, InventoryHistoryPoint, StockStatus};

/// Window counted as "recent" on the dashboard.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Longest inventory history the dashboard serves.
pub const MAX_HISTORY_DAYS: u32 = 366;

/// Aggregates shown on the dashboard landing page.
#[derive(Clone)]
pub struct DashboardService {
    products: ProductService,
    inventory: InventoryService,
}

impl DashboardService {
    pub fn new(products: ProductService, inventory: InventoryService) -> Self {
        Self {
            products,
            inventory,
        }
    }

    /// Headline figures. Low stock counts every product that needs
    /// restocking, out of stock included.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats, ServiceError> {
        let products = self.products.fetch_products().await?;
        let transactions = self.inventory.list_transactions().await?;
        let since = now - Duration::days(RECENT_WINDOW_DAYS);

        Ok(DashboardStats {
            total_products: products.len(),
            low_stock_items: products
                .iter()
                .filter(|p| p.stock_status() != StockStatus::InStock)
                .count(),
            total_value: products.iter().map(|p| p.stock_value()).sum(),
            recent_transactions: transactions
                .iter()
                .filter(|t| t.timestamp >= since && t.timestamp <= now)
                .count(),
        })
    }

    /// Products with the highest stock value, highest first
    #[instrument(skip(self))]
    pub async fn top_products(&self, limit: usize) -> Result<Vec<ChartData>, ServiceError> {
        let mut products = self.products.fetch_products().await?;
        products.sort_by(|a, b| b.stock_value().cmp(&a.stock_value()));

        Ok(products
            .into_iter()
            .take(limit)
            .map(|p| ChartData {
                value: p.stock_value(),
                name: p.name,
            })
            .collect())
    }

    /// Product count per category, largest first then by name
    #[instrument(skip(self))]
    pub async fn stock_distribution(&self) -> Result<Vec<ChartData>, ServiceError> {
        let products = self.products.fetch_products().await?;

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for product in &products {
            *counts.entry(product.category.clone()).or_default() += 1;
        }

        let mut distribution: Vec<ChartData> = counts
            .into_iter()
            .map(|(name, count)| ChartData {
                name,
                value: Decimal::from(count),
            })
            .collect();
        distribution.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(distribution)
    }

    /// Units moved in and out per day over the last `days` days (today
    /// included), oldest first.
    #[instrument(skip(self))]
    pub async fn inventory_history(
        &self,
        days: u32,
    ) -> Result<Vec<InventoryHistoryPoint>, ServiceError> {
        self.inventory_history_until(Utc::now().date_naive(), days).await
    }

    pub async fn inventory_history_until(
        &self,
        today: NaiveDate,
        days: u32,
    ) -> Result<Vec<InventoryHistoryPoint>, ServiceError> {
        if days > MAX_HISTORY_DAYS {
            return Err(ServiceError::InvalidInput(format!(
                "History is limited to {} days, got {}",
                MAX_HISTORY_DAYS, days
            )));
        }

        let mut buckets: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        for offset in 0..i64::from(days) {
            let date = today
                .checked_sub_signed(Duration::days(offset))
                .ok_or_else(|| {
                    ServiceError::InvalidInput(format!(
                        "History window starting {} is out of range",
                        today
                    ))
                })?;
            buckets.insert(date, (0, 0));
        }

        let transactions = self.inventory.list_transactions().await?;
        for transaction in &transactions {
            let Some((units_in, units_out)) = buckets.get_mut(&transaction.timestamp.date_naive())
            else {
                continue;
            };
            let units = transaction.quantity.unsigned_abs();
            if transaction.quantity >= 0 {
                *units_in = units_in.saturating_add(units);
            } else {
                *units_out = units_out.saturating_add(units);
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(date, (units_in, units_out))| InventoryHistoryPoint {
                date,
                units_in,
                units_out,
            })
            .collect())
    }
}
