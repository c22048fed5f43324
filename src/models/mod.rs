// Catalog
pub mod product;

// Identity
pub mod user;

// Stock movements
pub mod inventory_transaction;

// Dashboard read models
pub mod dashboard;

pub use dashboard::{ChartData, DashboardStats, InventoryHistoryPoint};
pub use inventory_transaction::{InventoryTransaction, NewTransaction, TransactionType};
pub use product::{Product, ProductFormData, ProductPatch, StockStatus, CATEGORIES};
pub use user::{LoginCredentials, User, UserRole};
