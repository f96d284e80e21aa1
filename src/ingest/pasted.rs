use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::objects::parse::parse_products;
use crate::objects::product::Product;

/// Read one line of pasted JSON and turn it into products.
///
/// The line may hold a single product object or an array of them. Any read
/// or parse failure is logged and yields an empty list; products without a
/// name are dropped.
pub async fn read_products_from_paste<R>(reader: &mut R) -> Vec<Product>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    println!("Paste product JSON on a single line and press Enter:");

    let mut line = String::new();
    if let Err(e) = reader.read_line(&mut line).await {
        log::error!("Failed to read pasted input: {}", e);
        return vec![];
    }

    let line = line.trim();
    if line.is_empty() {
        log::error!("No input was pasted.");
        return vec![];
    }

    match parse_pasted(line) {
        Ok(products) => products
            .into_iter()
            .filter(|product| {
                let keep = !product.name.trim().is_empty();
                if !keep {
                    log::warn!("Skipping pasted product without a name.");
                }
                keep
            })
            .collect(),
        Err(e) => {
            log::error!("Invalid JSON input: {}", e);
            vec![]
        }
    }
}

fn parse_pasted(text: &str) -> Result<Vec<Product>, String> {
    let json: Value =
        serde_json::from_str(text).map_err(|e| format!("Failed to parse JSON: {e}"))?;
    parse_products(&json)
}
