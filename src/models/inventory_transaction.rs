use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of stock movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransactionType {
    In,
    Out,
    Adjustment,
}

/// Recorded stock movement. Read-only once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub transaction_type: TransactionType,
    /// Signed delta applied to the product's stock.
    pub quantity: i64,
    pub reason: String,
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Request to record a movement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewTransaction {
    pub product_id: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub reason: String,
}

impl NewTransaction {
    /// Quantity as stored: outbound movements are always negative, the other
    /// kinds keep the sign they were entered with.
    pub fn signed_quantity(&self) -> i64 {
        match self.transaction_type {
            TransactionType::Out if self.quantity > 0 => -self.quantity,
            TransactionType::Out | TransactionType::In | TransactionType::Adjustment => {
                self.quantity
            }
        }
    }
}
