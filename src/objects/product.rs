use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::objects::parse::parse_product;

/// Attribute bag carried under the `data` key of an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductData {
    /// Release year.
    #[serde(rename = "year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Price, non-negative by convention.
    #[serde(rename = "price", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// CPU model, e.g. "Intel Core i9".
    #[serde(rename = "CPU model", skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    /// Disk size as free text, e.g. "1 TB".
    #[serde(rename = "hard disk size", skip_serializing_if = "Option::is_none")]
    pub hard_disk_size: Option<String>,
}

impl ProductData {
    /// Create a fully populated attribute bag.
    pub fn new(year: i32, price: f64, cpu_model: &str, hard_disk_size: &str) -> Self {
        Self {
            year: Some(year),
            price: Some(price),
            cpu_model: Some(cpu_model.to_string()),
            hard_disk_size: Some(hard_disk_size.to_string()),
        }
    }
}

/// Object exchanged with the remote service.
///
/// `id` is only ever assigned by the server; it is left out of request bodies
/// until a create call has returned one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(rename = "name")]
    pub name: String,
    /// Nested attributes, absent for objects created without them.
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductData>,
}

impl Product {
    /// Create a product that has not been sent to the service yet.
    pub fn new(name: &str, data: ProductData) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            data: Some(data),
        }
    }

    /// Identifier, or an empty string before creation.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_product(&value).map_err(serde::de::Error::custom)
    }
}

fn display_or_empty<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.as_ref();
        writeln!(f, "ID: {}", self.id_or_empty())?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Year: {}", display_or_empty(data.and_then(|d| d.year)))?;
        writeln!(f, "Price: {}", display_or_empty(data.and_then(|d| d.price)))?;
        writeln!(
            f,
            "CPU: {}",
            display_or_empty(data.and_then(|d| d.cpu_model.as_deref()))
        )?;
        write!(
            f,
            "Disk: {}",
            display_or_empty(data.and_then(|d| d.hard_disk_size.as_deref()))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new("Laptop A", ProductData::new(2022, 999.99, "i7", "512 GB"))
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(laptop()).unwrap();

        assert_eq!(json["name"], "Laptop A");
        assert_eq!(json["data"]["year"], 2022);
        assert_eq!(json["data"]["price"], 999.99);
        assert_eq!(json["data"]["CPU model"], "i7");
        assert_eq!(json["data"]["hard disk size"], "512 GB");
    }

    #[test]
    fn id_is_omitted_until_assigned() {
        let json = serde_json::to_value(laptop()).unwrap();
        assert!(json.get("id").is_none());

        let mut created = laptop();
        created.id = Some("ff808181".to_string());
        let json = serde_json::to_value(created).unwrap();
        assert_eq!(json["id"], "ff808181");
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let mut original = laptop();
        original.id = Some("abc-123".to_string());

        let text = serde_json::to_string(&original).unwrap();
        let decoded: Product = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn round_trip_ignores_key_casing() {
        let original = laptop();
        let text = serde_json::to_string(&original)
            .unwrap()
            .replace("\"CPU model\"", "\"cpu MODEL\"")
            .replace("\"hard disk size\"", "\"Hard Disk Size\"")
            .replace("\"name\"", "\"Name\"")
            .replace("\"data\"", "\"DATA\"");

        let decoded: Product = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn display_prints_all_fields() {
        let mut product = laptop();
        product.id = Some("7".to_string());

        let text = product.to_string();

        assert_eq!(
            text,
            "ID: 7\nName: Laptop A\nYear: 2022\nPrice: 999.99\nCPU: i7\nDisk: 512 GB"
        );
    }

    #[test]
    fn display_leaves_missing_attributes_blank() {
        let product = Product {
            id: None,
            name: "Bare".to_string(),
            data: None,
        };

        let text = product.to_string();

        assert_eq!(text, "ID: \nName: Bare\nYear: \nPrice: \nCPU: \nDisk: ");
    }
}
