use serde_json::{Value, json};

use crate::objects::product::{Product, ProductData};
use crate::objects::serviceclient::ServiceClient;
use crate::scenario::source::InputSource;

/// Identifier of the object fetched before anything is created.
pub const DEFAULT_SAMPLE_ID: &str = "2";

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    /// Object fetched as a warm-up demonstration.
    pub sample_id: String,
    /// When set, create everything but only run the remaining steps on the
    /// first created product with this name.
    pub select_name: Option<String>,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            sample_id: DEFAULT_SAMPLE_ID.to_string(),
            select_name: None,
        }
    }
}

/// Snapshots of one product as it went through the lifecycle.
#[derive(Debug, Clone)]
pub struct LifecycleOutcome {
    pub created: Product,
    pub fetched: Option<Product>,
    pub updated: Option<Product>,
    pub patched: Option<Product>,
    pub deleted: bool,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
    /// Result of the warm-up fetch.
    pub sample: Option<Product>,
    /// Number of candidates the input source yielded.
    pub candidates: usize,
    /// Products the service accepted, in creation order.
    pub created: Vec<Product>,
    /// One entry per product that went through fetch/update/patch/delete.
    pub outcomes: Vec<LifecycleOutcome>,
}

/// First product whose name matches `name`, ignoring case and surrounding
/// whitespace.
pub fn select_by_name<'a>(products: &'a [Product], name: &str) -> Option<&'a Product> {
    let wanted = name.trim().to_lowercase();
    products
        .iter()
        .find(|product| product.name.trim().to_lowercase() == wanted)
}

/// Full replacement body sent with PUT.
pub fn updated_product(product: &Product) -> Product {
    let data = product.data.clone().unwrap_or_default();
    Product {
        id: product.id.clone(),
        name: format!("{} - Updated via PUT", product.name),
        data: Some(ProductData {
            price: Some(data.price.unwrap_or_default() + 100.0),
            hard_disk_size: Some("2 TB".to_string()),
            ..data
        }),
    }
}

/// Partial body sent with PATCH.
pub fn patch_body(product: &Product) -> Value {
    json!({
        "name": format!("{} - Patched", product.name),
        "data": { "CPU model": "14-Core CPU" }
    })
}

/// Run one scenario: warm-up fetch, load candidates, then create and walk
/// products through fetch, update, patch and delete.
///
/// Only transport failures and undecodable responses are returned as errors;
/// everything else is reported on stdout and the run carries on.
pub async fn run(
    client: &ServiceClient,
    source: InputSource,
    options: &ScenarioOptions,
) -> Result<ScenarioReport, String> {
    let mut report = ScenarioReport::default();

    println!("Fetching sample product (GET)...");
    report.sample = client.fetch(&client.object_url(&options.sample_id)).await?;
    if let Some(sample) = &report.sample {
        println!("{}", sample);
    }

    let candidates = source.load().await;
    report.candidates = candidates.len();
    if candidates.is_empty() {
        println!("No valid products found. Exiting...");
        return Ok(report);
    }

    match options.select_name.as_deref() {
        None => {
            for candidate in &candidates {
                let Some(created) = create(client, candidate).await? else {
                    println!("POST failed, skipping...");
                    continue;
                };
                report.created.push(created.clone());
                report.outcomes.push(run_lifecycle(client, created).await?);
            }
        }
        Some(name) => {
            for candidate in &candidates {
                match create(client, candidate).await? {
                    Some(created) => report.created.push(created),
                    None => println!("POST failed, skipping..."),
                }
            }

            let Some(selected) = select_by_name(&report.created, name).cloned() else {
                println!("No created product named '{}'. Skipping update, patch and delete.", name);
                return Ok(report);
            };
            println!("\nSelected product: {}", selected.name);
            report.outcomes.push(run_lifecycle(client, selected).await?);
        }
    }

    println!("\nProcess completed for all products.");
    Ok(report)
}

/// POST one product. A response without an id counts as a failed create.
async fn create(client: &ServiceClient, product: &Product) -> Result<Option<Product>, String> {
    println!("\nPosting product: {}", product.name);

    let Some(created) = client.create(client.collection_url(), product).await? else {
        return Ok(None);
    };

    if created.id.is_none() {
        log::warn!("Created product '{}' came back without an id.", created.name);
        return Ok(None);
    }

    println!("\n--- Created Product ---");
    println!("{}", created);
    Ok(Some(created))
}

async fn run_lifecycle(client: &ServiceClient, created: Product) -> Result<LifecycleOutcome, String> {
    let url = client.object_url(created.id_or_empty());

    println!("\nFetching created product (GET)...");
    let fetched = client.fetch(&url).await?;
    if let Some(fetched) = &fetched {
        println!("{}", fetched);
    }

    println!("\nUpdating product (PUT)...");
    let updated = client.update(&url, &updated_product(&created)).await?;
    if let Some(updated) = &updated {
        println!("\n--- Product Updated (PUT) ---");
        println!("{}", updated);
    }

    println!("\nPatching product (PATCH)...");
    let patched = client.partial_update(&url, &patch_body(&created)).await?;
    if let Some(patched) = &patched {
        println!("\n--- Product Patched ---");
        println!("{}", patched);
    }

    println!("\nDeleting product (DELETE)...");
    let deleted = client.delete(&url).await?;
    if deleted {
        println!("\n--- Product Deleted ---");
        println!("Deleted Product ID: {}", created.id_or_empty());
    }

    Ok(LifecycleOutcome {
        created,
        fetched,
        updated,
        patched,
        deleted,
    })
}
