use clap::Parser;
use miette::{IntoDiagnostic, Result};
use orderdesk::application::add_order_item::{AddOrderItemRequest, AddOrderItemUseCase};
use orderdesk::application::checkout_order::CheckoutOrderUseCase;
use orderdesk::application::open_order::OpenOrderUseCase;
use orderdesk::domain::ports::{
    CustomerRepositoryRef, OrderRepositoryRef, ProductRepositoryRef,
};
use orderdesk::domain::product::Product;
use orderdesk::error::OrderError;
use orderdesk::infrastructure::in_memory::{
    InMemoryCustomerRepository, InMemoryEventManager, InMemoryOrderRepository,
    InMemoryProductRepository,
};
use orderdesk::infrastructure::pix::PixSandboxGateway;
use orderdesk::interfaces::csv::catalog_reader::{CatalogReader, CustomerReader};
use orderdesk::interfaces::csv::command_reader::{CommandAction, CommandReader, OrderCommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input order commands CSV file
    input: PathBuf,

    /// Seed product catalog CSV file (id,name,price)
    #[arg(long)]
    catalog: PathBuf,

    /// Seed customers CSV file (id,name)
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB for
    /// orders and the product catalog.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn load_catalog(path: &PathBuf) -> Result<Vec<Product>> {
    let file = File::open(path).into_diagnostic()?;
    let mut products = Vec::new();
    for product in CatalogReader::new(file).products() {
        products.push(product.into_diagnostic()?);
    }
    Ok(products)
}

async fn load_customers(cli: &Cli) -> Result<CustomerRepositoryRef> {
    let repository = InMemoryCustomerRepository::new();
    if let Some(path) = &cli.customers {
        let file = File::open(path).into_diagnostic()?;
        for customer in CustomerReader::new(file).customers() {
            repository.insert(customer.into_diagnostic()?).await;
        }
    }
    Ok(Arc::new(repository))
}

#[cfg_attr(not(feature = "storage-rocksdb"), allow(unused_variables))]
fn build_stores(
    cli: &Cli,
    catalog: Vec<Product>,
) -> Result<(OrderRepositoryRef, ProductRepositoryRef)> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        use orderdesk::infrastructure::rocksdb::RocksDBStore;

        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        for product in &catalog {
            store.put_product(product).into_diagnostic()?;
        }
        return Ok((Arc::new(store.clone()), Arc::new(store)));
    }

    let products = InMemoryProductRepository::with_products(catalog);
    Ok((
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(products),
    ))
}

async fn run_command(
    command: OrderCommand,
    open_order: &OpenOrderUseCase,
    add_item: &AddOrderItemUseCase,
    checkout: &CheckoutOrderUseCase,
) -> orderdesk::error::Result<()> {
    match command.action {
        CommandAction::Open => {
            let dto = open_order.execute(command.customer).await?;
            print_json(&dto)?;
        }
        CommandAction::Add => {
            let order_id = command.order.ok_or_else(|| {
                OrderError::ValidationError("add requires an order id".to_string())
            })?;
            let product_id = command.product.ok_or_else(|| {
                OrderError::ValidationError("add requires a product id".to_string())
            })?;
            let dto = add_item
                .execute(AddOrderItemRequest {
                    product_id,
                    quantity: command.quantity.unwrap_or(1),
                    order_id,
                })
                .await?;
            print_json(&dto)?;
        }
        CommandAction::Checkout => {
            let product_ids = command.product_ids();
            let dto = checkout.execute(command.customer, product_ids).await?;
            print_json(&dto)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> orderdesk::error::Result<()> {
    let line =
        serde_json::to_string(value).map_err(|e| OrderError::InternalError(Box::new(e)))?;
    println!("{line}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = load_catalog(&cli.catalog)?;
    let customer_repository = load_customers(&cli).await?;
    let (order_repository, product_repository) = build_stores(&cli, catalog)?;

    let open_order = OpenOrderUseCase::new(
        order_repository.clone(),
        customer_repository.clone(),
    );
    let add_item = AddOrderItemUseCase::new(
        order_repository.clone(),
        product_repository.clone(),
    );
    let checkout = CheckoutOrderUseCase::new(
        order_repository,
        customer_repository,
        product_repository,
        Arc::new(PixSandboxGateway::new()),
        Arc::new(InMemoryEventManager::new()),
    );

    // Process commands in order; per-command failures are reported but do not
    // abort the rest of the stream.
    let file = File::open(&cli.input).into_diagnostic()?;
    for command in CommandReader::new(file).commands() {
        match command {
            Ok(command) => {
                if let Err(e) = run_command(command, &open_order, &add_item, &checkout).await {
                    eprintln!("Error processing command: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error reading command: {e}");
            }
        }
    }

    Ok(())
}
