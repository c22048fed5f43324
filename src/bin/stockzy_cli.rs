use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use stockzy::{
    auth::{Decision, IdentitySource},
    config::{self, AppConfig},
    models::{InventoryTransaction, LoginCredentials, Product},
    queries::{paginate, PageRequest, ProductFilter, ProductFilterParams},
    services::AppServices,
};
use tracing::debug;

const TOP_PRODUCTS: usize = 5;
const HISTORY_DAYS: u32 = 7;

#[derive(Parser)]
#[command(name = "stockzy-cli", about = "Query the Stockzy demo inventory from the terminal")]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog through the product query
    Products(ProductsArgs),
    /// Show a single product
    Product(ProductArgs),
    /// List stock movements, newest first
    Transactions(TransactionsArgs),
    /// Dashboard figures and charts
    Dashboard,
    /// Sign in and report the access decision for each path
    Access(AccessArgs),
}

#[derive(Args)]
struct ProductsArgs {
    #[arg(long, help = "Case-insensitive text matched against name, SKU and description")]
    search: Option<String>,
    #[arg(long, help = "Exact category, or 'all'")]
    category: Option<String>,
    #[arg(long, help = "all | in-stock | low-stock | out-of-stock")]
    stock_status: Option<String>,
    #[arg(long, help = "name | sku | stock | price")]
    sort_by: Option<String>,
    #[arg(long, help = "asc | desc")]
    direction: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long, help = "Page size (defaults to the configured page size)")]
    per_page: Option<u64>,
}

#[derive(Args)]
struct ProductArgs {
    /// Product identifier, e.g. p1
    id: String,
}

#[derive(Args)]
struct TransactionsArgs {
    #[arg(long, help = "Only show the most recent N movements")]
    limit: Option<usize>,
}

#[derive(Args)]
struct AccessArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    /// Dashboard paths to check, e.g. /reports
    #[arg(required = true)]
    paths: Vec<String>,
}

#[derive(Serialize)]
struct AccessReport {
    path: String,
    decision: Option<Decision>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config().context("failed to load application config")?;
    config::init_tracing(config.log_level(), config.log_json);
    let services = AppServices::from_config(&config);

    match cli.command {
        Commands::Products(args) => handle_products(&services, &config, args, cli.json).await?,
        Commands::Product(args) => handle_product(&services, args, cli.json).await?,
        Commands::Transactions(args) => handle_transactions(&services, args, cli.json).await?,
        Commands::Dashboard => handle_dashboard(&services, cli.json).await?,
        Commands::Access(args) => handle_access(&services, args, cli.json).await?,
    }

    Ok(())
}

async fn handle_products(
    services: &AppServices,
    config: &AppConfig,
    args: ProductsArgs,
    json: bool,
) -> Result<()> {
    let filter = ProductFilter::from(ProductFilterParams {
        search: args.search,
        category: args.category,
        stock_status: args.stock_status,
        sort_by: args.sort_by,
        sort_direction: args.direction,
    });
    debug!(?filter, "Listing products");

    let products = services
        .products
        .list_products(&filter)
        .await
        .context("failed to list products")?;

    let request = PageRequest::new(args.page, args.per_page.unwrap_or(config.default_page_size));
    let page = paginate(products, request, config.max_page_size);

    if json {
        return print_json(&page);
    }

    if page.items.is_empty() {
        println!("No products match the current filters.");
    }
    for product in &page.items {
        render_product(product);
    }
    println!(
        "Page {} of {} ({} products)",
        page.page,
        page.total_pages.max(1),
        page.total
    );
    Ok(())
}

async fn handle_product(services: &AppServices, args: ProductArgs, json: bool) -> Result<()> {
    let product = services
        .products
        .get_product(&args.id)
        .await
        .with_context(|| format!("failed to load product {}", args.id))?;

    if json {
        return print_json(&product);
    }

    render_product(&product);
    println!("  {}", product.description);
    println!(
        "  cost {} • min level {} • supplier {}",
        product.cost_price, product.min_stock_level, product.supplier
    );
    println!(
        "  created {} • updated {}",
        product.created_at.to_rfc3339(),
        product.updated_at.to_rfc3339()
    );
    Ok(())
}

async fn handle_transactions(
    services: &AppServices,
    args: TransactionsArgs,
    json: bool,
) -> Result<()> {
    let transactions = match args.limit {
        Some(limit) => services.inventory.recent_transactions(limit).await,
        None => services.inventory.list_transactions().await,
    }
    .context("failed to list transactions")?;

    if json {
        return print_json(&transactions);
    }

    for transaction in &transactions {
        render_transaction(transaction);
    }
    Ok(())
}

async fn handle_dashboard(services: &AppServices, json: bool) -> Result<()> {
    let dashboard = &services.dashboard;
    let stats = dashboard.stats().await.context("failed to compute stats")?;
    let top = dashboard
        .top_products(TOP_PRODUCTS)
        .await
        .context("failed to rank products")?;
    let distribution = dashboard
        .stock_distribution()
        .await
        .context("failed to compute distribution")?;
    let history = dashboard
        .inventory_history(HISTORY_DAYS)
        .await
        .context("failed to compute history")?;

    if json {
        return print_json(&serde_json::json!({
            "stats": stats,
            "top_products": top,
            "stock_distribution": distribution,
            "inventory_history": history,
        }));
    }

    println!("Total products:      {}", stats.total_products);
    println!("Low stock items:     {}", stats.low_stock_items);
    println!("Total stock value:   {}", stats.total_value);
    println!("Recent transactions: {}", stats.recent_transactions);

    println!("\nTop products by stock value");
    for entry in &top {
        println!("- {} • {}", entry.name, entry.value);
    }

    println!("\nProducts per category");
    for entry in &distribution {
        println!("- {} • {}", entry.name, entry.value);
    }

    println!("\nLast {} days (in / out)", HISTORY_DAYS);
    for point in &history {
        println!("- {} • {} / {}", point.date, point.units_in, point.units_out);
    }
    Ok(())
}

async fn handle_access(services: &AppServices, args: AccessArgs, json: bool) -> Result<()> {
    let credentials = LoginCredentials {
        username: args.username,
        password: args.password,
    };
    let auth = services
        .auth
        .login(credentials)
        .await
        .context("failed to sign in")?;

    let session = services.auth.current_session().await;
    let reports: Vec<AccessReport> = args
        .paths
        .into_iter()
        .map(|path| AccessReport {
            decision: services.routes.guard(&session, &path),
            path,
        })
        .collect();

    if json {
        return print_json(&reports);
    }

    println!("Signed in as {} ({})", auth.user.name, auth.user.role);
    for report in &reports {
        match &report.decision {
            Some(Decision::Allow) => println!("- {} • allowed", report.path),
            Some(Decision::RedirectTo(target)) => {
                println!("- {} • redirect to {}", report.path, target)
            }
            None => println!("- {} • unknown route", report.path),
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_product(product: &Product) {
    println!(
        "- {} • {} • {} • {} • stock {} ({}) • {}",
        product.id,
        product.sku,
        product.name,
        product.category,
        product.stock_quantity,
        product.stock_status().label(),
        product.price
    );
}

fn render_transaction(transaction: &InventoryTransaction) {
    println!(
        "- {} • {} • {} {:+} • {} • by {}",
        transaction.timestamp.format("%Y-%m-%d %H:%M"),
        transaction.product_name,
        transaction.transaction_type,
        transaction.quantity,
        transaction.reason,
        transaction.performed_by
    );
}
