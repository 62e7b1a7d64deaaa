use crate::clock::Clock;
use crate::config::StorefrontConfig;
use crate::domain::product::Product;
use crate::forms::products::AddProductForm;
use crate::ids::IdGenerator;
use crate::repository::{ProductReader, ProductWriter, SessionReader};
use crate::services::{ensure_admin, simulate_latency, ServiceError, ServiceResult};

/// Headline numbers shown at the top of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    /// Number of listed products.
    pub total_products: usize,
    /// Sum of price times stock across the catalog.
    pub inventory_value_cents: i64,
    /// Products whose stock fell below the configured threshold.
    pub low_stock_count: usize,
}

/// Catalog listing plus headline numbers for the admin console.
#[derive(Debug)]
pub struct AdminDashboard {
    pub products: Vec<Product>,
    pub stats: DashboardStats,
}

/// Loads the admin console view of the catalog.
pub fn load_dashboard<R>(repo: &R, config: &StorefrontConfig) -> ServiceResult<AdminDashboard>
where
    R: SessionReader + ProductReader + ?Sized,
{
    ensure_admin(repo)?;

    let products = repo.list_products().map_err(ServiceError::from)?;
    let stats = DashboardStats {
        total_products: products.len(),
        inventory_value_cents: products
            .iter()
            .map(|product| product.price_cents * product.stock)
            .sum(),
        low_stock_count: products
            .iter()
            .filter(|product| product.stock < config.low_stock_threshold)
            .count(),
    };

    Ok(AdminDashboard { products, stats })
}

/// Lists a new product at the top of the catalog.
///
/// Runs the simulated save latency before the write.
pub fn create_product<R, C, G>(
    repo: &R,
    clock: &C,
    ids: &G,
    config: &StorefrontConfig,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: SessionReader + ProductWriter + ?Sized,
    C: Clock,
    G: IdGenerator,
{
    ensure_admin(repo)?;

    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    simulate_latency(config.admin_save_delay);

    let product = new_product.into_product(ids, clock.now());
    repo.create_product(&product).map_err(ServiceError::from)?;

    Ok(product)
}

/// Delists a product.
pub fn remove_product<R>(repo: &R, product_id: &str) -> ServiceResult<()>
where
    R: SessionReader + ProductWriter + ?Sized,
{
    ensure_admin(repo)?;

    repo.delete_product(product_id).map_err(ServiceError::from)
}

/// Renders the catalog as a CSV document for download.
///
/// One row per product with its identifier, name, unit price, category,
/// stock on hand and the value tied up in that stock.
pub fn export_inventory_csv<R>(repo: &R) -> ServiceResult<String>
where
    R: SessionReader + ProductReader + ?Sized,
{
    ensure_admin(repo)?;

    let products = repo.list_products().map_err(ServiceError::from)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "ID",
            "Product Name",
            "Price (BDT)",
            "Category",
            "Current Stock",
            "Total Value",
        ])
        .map_err(|err| ServiceError::Export(err.to_string()))?;

    for product in &products {
        writer
            .write_record([
                product.id.as_str(),
                product.name.as_str(),
                &format_money(product.price_cents),
                product.category.as_str(),
                &product.stock.to_string(),
                &format_money(product.price_cents * product.stock),
            ])
            .map_err(|err| ServiceError::Export(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Export(err.to_string()))?;

    String::from_utf8(bytes).map_err(|err| ServiceError::Export(err.to_string()))
}

/// File name offered for the CSV download, carrying the export date.
pub fn export_file_name<C>(clock: &C, config: &StorefrontConfig) -> String
where
    C: Clock,
{
    format!(
        "{}_catalog_{}.csv",
        config.shop.slug,
        clock.now().format("%Y-%m-%d")
    )
}

fn format_money(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}
