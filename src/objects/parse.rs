use serde_json::{Map, Value};

use crate::objects::product::{Product, ProductData};

/// Look up a key in a JSON object ignoring ASCII case. First match wins.
fn get_ignore_case<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn parse_string(object: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match get_ignore_case(object, key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("Unable to parse '{}' value: {}", key, other)),
    }
}

fn parse_year(object: &Map<String, Value>) -> Result<Option<i32>, String> {
    let value = match get_ignore_case(object, "year") {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    if let Some(i) = value.as_i64() {
        return i32::try_from(i)
            .map(Some)
            .map_err(|_| format!("Year out of range: {}", i));
    }

    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(Some(f as i32))
        }
        _ => Err(format!("Unable to parse 'year' value: {}", value)),
    }
}

fn parse_price(object: &Map<String, Value>) -> Result<Option<f64>, String> {
    match get_ignore_case(object, "price") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("Unable to parse 'price' value: {}", value)),
    }
}

/// Parse the nested attribute object of a product.
pub(crate) fn parse_product_data(json: &Value) -> Result<ProductData, String> {
    let object = json
        .as_object()
        .ok_or_else(|| format!("Product data must be an object, got: {}", json))?;

    Ok(ProductData {
        year: parse_year(object)?,
        price: parse_price(object)?,
        cpu_model: parse_string(object, "CPU model")?,
        hard_disk_size: parse_string(object, "hard disk size")?,
    })
}

/// Parse a product from a JSON object, matching field names case-insensitively.
pub(crate) fn parse_product(json: &Value) -> Result<Product, String> {
    let object = json
        .as_object()
        .ok_or_else(|| format!("Product must be a JSON object, got: {}", json))?;

    let data = match get_ignore_case(object, "data") {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_product_data(value)?),
    };

    Ok(Product {
        id: parse_string(object, "id")?,
        name: parse_string(object, "name")?.unwrap_or_default(),
        data,
    })
}

/// Parse either a single product object or an array of them.
pub(crate) fn parse_products(json: &Value) -> Result<Vec<Product>, String> {
    match json {
        Value::Array(items) => items.iter().map(parse_product).collect(),
        _ => parse_product(json).map(|product| vec![product]),
    }
}
