use crate::error::{OrderError, Result};
use serde::Deserialize;
use std::io::Read;
use uuid::Uuid;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Open,
    Add,
    Checkout,
}

/// One row of the order command stream.
///
/// Which columns are meaningful depends on the action: `open` uses `customer`,
/// `add` uses `order`/`product`/`quantity`, `checkout` uses `customer` and the
/// `|`-separated `products` list.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderCommand {
    pub action: CommandAction,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub order: Option<Uuid>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub products: Option<String>,
}

impl OrderCommand {
    /// Splits the `products` column into ids, preserving order and repeats.
    pub fn product_ids(&self) -> Vec<String> {
        self.products
            .as_deref()
            .unwrap_or("")
            .split('|')
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Reads order commands from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<OrderCommand>`. It handles whitespace trimming and flexible record
/// lengths automatically.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands, so a
    /// long command stream never has to fit in memory.
    pub fn commands(self) -> impl Iterator<Item = Result<OrderCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(OrderError::from))
    }
}
