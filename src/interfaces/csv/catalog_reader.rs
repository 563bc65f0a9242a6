use crate::domain::customer::Customer;
use crate::domain::product::{Price, Product};
use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    price: Decimal,
}

impl ProductRecord {
    fn into_product(self) -> Result<Product> {
        Ok(Product::new(self.id, self.name, Price::new(self.price)?))
    }
}

/// Reads the seed product catalog (`id,name,price` rows) from a CSV source.
/// Prices are validated on the way in.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map_err(OrderError::from)
                .and_then(ProductRecord::into_product)
        })
    }
}

/// Reads seed customers (`id,name` rows) from a CSV source.
pub struct CustomerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CustomerReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn customers(self) -> impl Iterator<Item = Result<Customer>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(OrderError::from))
    }
}
