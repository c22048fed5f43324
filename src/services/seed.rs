//! Deterministic demo data for the mock services.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::{InventoryTransaction, Product, TransactionType};

const SEED_CATEGORIES: [&str; 3] = ["Electronics", "Office Supplies", "Furniture"];
const SEED_SUPPLIERS: u32 = 5;
const SEED_MIN_STOCK_LEVEL: u32 = 10;
const CREATED_WITHIN_MS: i64 = 10_000_000_000;
const UPDATED_WITHIN_MS: i64 = 1_000_000_000;
const TRANSACTIONS_WITHIN_DAYS: i64 = 30;

/// Generates `count` catalog entries `p1..pN`.
pub fn demo_products(rng: &mut StdRng, count: u32, now: DateTime<Utc>) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            Product {
                id: format!("p{}", n),
                name: format!("Product {}", n),
                sku: format!("SKU-{}", 1000 + i),
                description: format!("Description for product {}", n),
                category: SEED_CATEGORIES[(i % 3) as usize].to_string(),
                price: Decimal::from(rng.gen_range(50..=1000i64)),
                cost_price: Decimal::from(rng.gen_range(30..=530i64)),
                stock_quantity: rng.gen_range(0..=100),
                min_stock_level: SEED_MIN_STOCK_LEVEL,
                supplier: format!("Supplier {}", (i % SEED_SUPPLIERS) + 1),
                created_at: now - Duration::milliseconds(rng.gen_range(0..CREATED_WITHIN_MS)),
                updated_at: now - Duration::milliseconds(rng.gen_range(0..UPDATED_WITHIN_MS)),
            }
        })
        .collect()
}

/// Generates `count` movements against `products`, newest first.
pub fn demo_transactions(
    rng: &mut StdRng,
    products: &[Product],
    count: u32,
    now: DateTime<Utc>,
) -> Vec<InventoryTransaction> {
    if products.is_empty() {
        return Vec::new();
    }

    let window_ms = Duration::days(TRANSACTIONS_WITHIN_DAYS).num_milliseconds();
    let mut transactions: Vec<InventoryTransaction> = (0..count)
        .map(|i| {
            let product = &products[rng.gen_range(0..products.len())];
            let (transaction_type, reason) = match i % 3 {
                0 => (TransactionType::In, "Purchase"),
                1 => (TransactionType::Out, "Sale"),
                _ => (TransactionType::Adjustment, "Inventory count adjustment"),
            };
            let magnitude: i64 = rng.gen_range(1..=30);
            let quantity = match transaction_type {
                TransactionType::Out => -magnitude,
                TransactionType::In | TransactionType::Adjustment => magnitude,
            };

            InventoryTransaction {
                id: format!("t{}", i + 1),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                transaction_type,
                quantity,
                reason: reason.to_string(),
                performed_by: "Admin User".to_string(),
                timestamp: now - Duration::milliseconds(rng.gen_range(0..window_ms)),
            }
        })
        .collect();

    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    transactions
}
