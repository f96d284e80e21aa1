use std::fmt;
use std::path::PathBuf;

use tokio::io::AsyncBufRead;

use crate::ingest::excel::read_products_from_excel;
use crate::ingest::pasted::read_products_from_paste;
use crate::objects::product::{Product, ProductData};

/// Where the products to create come from.
pub enum InputSource {
    /// First worksheet of a spreadsheet file.
    Excel(PathBuf),
    /// One line of JSON read from the given stream, usually stdin.
    Pasted(Box<dyn AsyncBufRead + Unpin + Send>),
    /// Products built in code.
    Literal(Vec<Product>),
}

impl InputSource {
    /// Literal source holding the built-in demo product.
    pub fn literal_default() -> Self {
        InputSource::Literal(vec![Product::new(
            "Apple MacBook Pro 16",
            ProductData::new(2019, 1849.99, "Intel Core i9", "1 TB"),
        )])
    }

    /// Produce the candidate products. Failures are logged, never returned.
    pub async fn load(self) -> Vec<Product> {
        match self {
            InputSource::Excel(path) => read_products_from_excel(path),
            InputSource::Pasted(mut reader) => read_products_from_paste(&mut *reader).await,
            InputSource::Literal(products) => products,
        }
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Excel(path) => f.debug_tuple("Excel").field(path).finish(),
            InputSource::Pasted(_) => f.write_str("Pasted"),
            InputSource::Literal(products) => f.debug_tuple("Literal").field(products).finish(),
        }
    }
}
