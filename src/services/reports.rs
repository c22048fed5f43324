use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument};

use super::ProductService;
use crate::errors::ServiceError;
use crate::models::{ChartData, Product};

/// Stock value shares for the reports page.
#[derive(Clone)]
pub struct ReportService {
    products: ProductService,
}

impl ReportService {
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }

    /// Share of total stock value held by each category, in percent
    #[instrument(skip(self))]
    pub async fn category_breakdown(&self) -> Result<Vec<ChartData>, ServiceError> {
        let products = self.products.fetch_products().await?;
        Ok(value_shares(&products, |p| &p.category))
    }

    /// Share of total stock value held by each supplier, in percent
    #[instrument(skip(self))]
    pub async fn supplier_breakdown(&self) -> Result<Vec<ChartData>, ServiceError> {
        let products = self.products.fetch_products().await?;
        Ok(value_shares(&products, |p| &p.supplier))
    }
}

/// Groups stock value by `key` and converts each group into a percentage of
/// the total, rounded to one decimal place. Largest share first.
fn value_shares<F>(products: &[Product], key: F) -> Vec<ChartData>
where
    F: Fn(&Product) -> &String,
{
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for product in products {
        *totals.entry(key(product).as_str()).or_default() += product.stock_value();
    }

    let grand_total: Decimal = totals.values().copied().sum();
    debug!(groups = totals.len(), total = %grand_total, "Computed value shares");

    let mut shares: Vec<ChartData> = totals
        .into_iter()
        .map(|(name, value)| {
            let share = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                (value * Decimal::ONE_HUNDRED / grand_total)
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            };
            ChartData {
                name: name.to_string(),
                value: share,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.value.cmp(&a.value));
    shares
}
