//! Mock collaborators behind the dashboard: product catalog, inventory
//! movements, dashboard aggregates and reports. State lives in memory and is
//! shared through `Arc<RwLock<..>>`, so every service is cheap to clone.

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::auth::{AccessGate, AuthService, RouteTable};
use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::models::Product;
use crate::queries::{query, ProductFilter};

pub mod dashboard;
pub mod inventory;
pub mod product_service;
pub mod reports;
pub mod seed;

pub use dashboard::DashboardService;
pub use inventory::InventoryService;
pub use product_service::ProductService;
pub use reports::ReportService;

/// Supplier of the full product list. Failures are reported as-is to the
/// caller; nothing here retries.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError>;
}

/// Fetches the catalog from `source` and runs the product query over it.
#[instrument(skip(source))]
pub async fn load_catalog<S>(source: &S, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError>
where
    S: ProductSource + ?Sized,
{
    let products = source.fetch_products().await?;
    Ok(query(&products, filter))
}

/// Every service wired against the same in-memory state.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub routes: RouteTable,
    pub products: ProductService,
    pub inventory: InventoryService,
    pub dashboard: DashboardService,
    pub reports: ReportService,
}

impl AppServices {
    /// Builds the demo data set described by `config`.
    #[instrument(skip(config), fields(seed = config.mock_seed))]
    pub fn from_config(config: &AppConfig) -> Self {
        let now = Utc::now();
        let latency = config.mock_latency();
        let mut rng = StdRng::seed_from_u64(config.mock_seed);

        let catalog = seed::demo_products(&mut rng, config.mock_product_count, now);
        let history =
            seed::demo_transactions(&mut rng, &catalog, config.mock_transaction_count, now);
        info!(
            products = catalog.len(),
            transactions = history.len(),
            "Seeded demo data"
        );

        let products = ProductService::new(catalog, latency);
        let inventory = InventoryService::new(history, products.clone(), latency);
        let dashboard = DashboardService::new(products.clone(), inventory.clone());
        let reports = ReportService::new(products.clone());
        let routes = RouteTable::new(AccessGate::new(config.login_path.clone()))
            .with_fallback(config.default_redirect_path.clone());

        Self {
            auth: AuthService::new(latency),
            routes,
            products,
            inventory,
            dashboard,
            reports,
        }
    }
}
