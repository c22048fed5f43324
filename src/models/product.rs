use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

/// Categories offered by the product form. The catalog itself accepts any
/// non-empty category string.
pub const CATEGORIES: [&str; 7] = [
    "Electronics",
    "Office Supplies",
    "Furniture",
    "Kitchen",
    "Clothing",
    "Tools",
    "Other",
];

/// Catalog entry as served by the product source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub stock_quantity: u32,
    pub min_stock_level: u32,
    pub supplier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Derived stock classification; never stored.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock_quantity, self.min_stock_level)
    }

    /// Value of the units on hand at sale price.
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.stock_quantity)
    }

    /// Builds the form payload that results from applying `patch` on top of
    /// this product. The caller validates the result.
    pub fn merge(&self, patch: ProductPatch) -> ProductFormData {
        ProductFormData {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            sku: patch.sku.unwrap_or_else(|| self.sku.clone()),
            description: patch.description.unwrap_or_else(|| self.description.clone()),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            price: patch.price.unwrap_or(self.price),
            cost_price: patch.cost_price.unwrap_or(self.cost_price),
            stock_quantity: patch.stock_quantity.unwrap_or(self.stock_quantity),
            min_stock_level: patch.min_stock_level.unwrap_or(self.min_stock_level),
            supplier: patch.supplier.unwrap_or_else(|| self.supplier.clone()),
        }
    }
}

/// Stock classification of a product relative to its minimum level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StockStatus {
    Out,
    Low,
    InStock,
}

impl StockStatus {
    /// The single source of truth for the out / low / in-stock thresholds.
    pub fn classify(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            StockStatus::Out
        } else if quantity <= threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    /// Label shown next to a product in the catalog table.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Out => "Out of stock",
            StockStatus::Low => "Low stock",
            StockStatus::InStock => "In stock",
        }
    }
}

/// Payload accepted when creating or replacing a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductFormData {
    #[validate(length(min = 3, message = "Product name must be at least 3 characters"))]
    pub name: String,

    #[validate(length(min = 3, message = "SKU must be at least 3 characters"))]
    pub sku: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(custom = "validate_positive_amount")]
    pub price: Decimal,

    #[validate(custom = "validate_positive_amount")]
    pub cost_price: Decimal,

    pub stock_quantity: u32,

    pub min_stock_level: u32,

    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
}

impl ProductFormData {
    /// Materializes a catalog record. Validation is the caller's job.
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            sku: self.sku,
            description: self.description,
            category: self.category,
            price: self.price,
            cost_price: self.cost_price,
            stock_quantity: self.stock_quantity,
            min_stock_level: self.min_stock_level,
            supplier: self.supplier,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub stock_quantity: Option<u32>,
    pub min_stock_level: Option<u32>,
    pub supplier: Option<String>,
}

fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        let mut err = ValidationError::new("positive");
        err.message = Some("Amount must be positive".into());
        return Err(err);
    }
    Ok(())
}
