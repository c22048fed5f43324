use assert_matches::assert_matches;
use stockzy::auth::{Decision, IdentitySource, Session};
use stockzy::config::AppConfig;
use stockzy::errors::ServiceError;
use stockzy::models::{LoginCredentials, NewTransaction, TransactionType, UserRole};
use stockzy::queries::{paginate, PageRequest, ProductFilter, SortDirection, SortKey, StockStatusFilter};
use stockzy::services::AppServices;

fn services() -> AppServices {
    AppServices::from_config(&AppConfig::default())
}

#[tokio::test]
async fn seeded_catalog_is_deterministic() {
    let first = services().products.fetch_products().await.unwrap();
    let second = services().products.fetch_products().await.unwrap();

    let quantities = |products: &[stockzy::models::Product]| -> Vec<u32> {
        products.iter().map(|p| p.stock_quantity).collect()
    };
    assert_eq!(quantities(&first), quantities(&second));
    assert_eq!(first.len(), 20);
}

#[tokio::test]
async fn operator_session_walks_the_dashboard() {
    let services = services();
    assert_eq!(services.auth.current_session().await, Session::anonymous());

    services
        .auth
        .login(LoginCredentials {
            username: "estoquista".to_string(),
            password: "123456".to_string(),
        })
        .await
        .unwrap();
    let session = services.auth.current_session().await;
    assert_eq!(session, Session::authenticated(UserRole::Operator));

    assert_eq!(services.routes.guard(&session, "/inventory"), Some(Decision::Allow));
    assert_eq!(
        services.routes.guard(&session, "/reports"),
        Some(Decision::RedirectTo("/dashboard".to_string()))
    );
}

#[tokio::test]
async fn recorded_movement_shows_up_everywhere() {
    let services = services();
    let before = services.products.get_product("p1").await.unwrap();
    let stats_before = services.dashboard.stats().await.unwrap();

    services
        .inventory
        .record_transaction(
            NewTransaction {
                product_id: "p1".to_string(),
                transaction_type: TransactionType::In,
                quantity: 25,
                reason: "Purchase".to_string(),
            },
            "Estoquista User",
        )
        .await
        .unwrap();

    let after = services.products.get_product("p1").await.unwrap();
    assert_eq!(after.stock_quantity, before.stock_quantity + 25);

    let latest = services.inventory.recent_transactions(1).await.unwrap();
    assert_eq!(latest[0].performed_by, "Estoquista User");

    let stats_after = services.dashboard.stats().await.unwrap();
    assert_eq!(stats_after.recent_transactions, stats_before.recent_transactions + 1);
    assert_eq!(
        stats_after.total_value - stats_before.total_value,
        before.price * rust_decimal::Decimal::from(25)
    );
}

#[tokio::test]
async fn oversold_movement_is_refused() {
    let services = services();
    let product = services.products.get_product("p2").await.unwrap();

    let result = services
        .inventory
        .record_transaction(
            NewTransaction {
                product_id: "p2".to_string(),
                transaction_type: TransactionType::Out,
                quantity: i64::from(product.stock_quantity) + 1,
                reason: "Sale".to_string(),
            },
            "Admin User",
        )
        .await;

    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));
}

#[tokio::test]
async fn filtered_catalog_pages() {
    let services = services();
    let filter = ProductFilter::default()
        .with_category("Furniture")
        .with_stock_status(StockStatusFilter::All)
        .sorted_by(SortKey::Price, SortDirection::Desc);

    let products = services.products.list_products(&filter).await.unwrap();
    assert!(products.iter().all(|p| p.category == "Furniture"));
    assert!(products.windows(2).all(|pair| pair[0].price >= pair[1].price));

    let page = paginate(products.clone(), PageRequest::new(2, 4), 100);
    assert_eq!(page.total, products.len() as u64);
    assert_eq!(page.items, products[4..products.len().min(8)].to_vec());
}

#[tokio::test]
async fn report_shares_cover_the_whole_catalog() {
    let services = services();
    let shares = services.reports.category_breakdown().await.unwrap();
    assert_eq!(shares.len(), 3);

    let total: rust_decimal::Decimal = shares.iter().map(|s| s.value).sum();
    assert!((total - rust_decimal::Decimal::ONE_HUNDRED).abs() <= rust_decimal::Decimal::new(2, 1));
}
