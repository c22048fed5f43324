use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    pub total_value: Decimal,
    pub recent_transactions: usize,
}

/// One labelled value of a chart series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub name: String,
    pub value: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryHistoryPoint {
    pub date: NaiveDate,
    #[serde(rename = "in")]
    pub units_in: u64,
    #[serde(rename = "out")]
    pub units_out: u64,
}
