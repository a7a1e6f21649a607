//! Product catalog loaded from a comma-separated text file
//!
//! Each relevant line holds `id, name, type, quantity, price`. Blank lines
//! and lines starting with `#` are skipped. Products keep the order in which
//! they were appended and ids are unique.

use crate::error::CatalogError;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

const CSV_DELIMITER: char = ',';
const MAX_PRICE_SCALE: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Food,
    DishDetergent,
    FruitAndVegetables,
}

impl ProductType {
    pub fn code(self) -> &'static str {
        match self {
            ProductType::Food => "AL",
            ProductType::DishDetergent => "DL",
            ProductType::FruitAndVegetables => "FRL",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProductType::Food => "Alimentação",
            ProductType::DishDetergent => "Detergente p/ Loiça",
            ProductType::FruitAndVegetables => "Frutas e Legumes",
        }
    }
}

impl FromStr for ProductType {
    type Err = CatalogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AL" => Ok(ProductType::Food),
            "DL" => Ok(ProductType::DishDetergent),
            "FRL" => Ok(ProductType::FruitAndVegetables),
            _ => Err(CatalogError::InvalidAttribute(format!("Invalid product type {}.", s))),
        }
    }
}

/// Non-negative decimal price, kept exactly as `units / 10^scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    units: u64,
    scale: u32,
}

impl Price {
    pub fn new(units: u64, scale: u32) -> Self {
        Self { units, scale }
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

impl FromStr for Price {
    type Err = CatalogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidAttribute(format!("Invalid price {}.", s));

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let well_formed = !whole.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit())
            && frac.len() as u32 <= MAX_PRICE_SCALE;
        if !well_formed || (s.contains('.') && frac.is_empty()) {
            return Err(invalid());
        }

        let units = format!("{}{}", whole, frac).parse::<u64>().map_err(|_| invalid())?;
        Ok(Price::new(units, frac.len() as u32))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.units);
        }
        let divisor = 10u64.pow(self.scale);
        write!(
            f,
            "{}.{:0width$}",
            self.units / divisor,
            self.units % divisor,
            width = self.scale as usize
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub product_type: ProductType,
    pub quantity: u64,
    pub price: Price,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        product_type: ProductType,
        quantity: u64,
        price: Price,
    ) -> Result<Self, CatalogError> {
        if !(10_000..=99_999).contains(&id) {
            return Err(CatalogError::InvalidAttribute(format!("Invalid id {}.", id)));
        }
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::InvalidAttribute("Invalid name (empty).".to_string()));
        }

        Ok(Self { id, name, product_type, quantity, price })
    }

    /// Parse one `id, name, type, quantity, price` line
    pub fn from_csv(line: &str) -> Result<Self, CatalogError> {
        let fields: Vec<&str> = line.split(CSV_DELIMITER).map(str::trim).collect();
        if fields.len() != 5 {
            return Err(CatalogError::InvalidAttribute(format!(
                "Expected 5 fields, found {}.",
                fields.len()
            )));
        }

        let id = fields[0]
            .parse::<i64>()
            .ok()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| CatalogError::InvalidAttribute(format!("Invalid id {}.", fields[0])))?;
        let quantity = fields[3]
            .parse::<i64>()
            .ok()
            .and_then(|q| u64::try_from(q).ok())
            .ok_or_else(|| {
                CatalogError::InvalidAttribute(format!("Invalid quantity {}.", fields[3]))
            })?;

        Product::new(id, fields[1], fields[2].parse()?, quantity, fields[4].parse()?)
    }

    pub fn type_name(&self) -> &'static str {
        self.product_type.name()
    }
}

impl FromStr for Product {
    type Err = CatalogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::from_csv(s)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product {} id: {} price: {}", self.name, self.id, self.price)
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<u32, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        self.index.insert(product.id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn search_by_id(&self, id: u32) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    /// Lazily yield the products accepted by `filter`, in catalog order
    pub fn search<'a, F>(&'a self, filter: F) -> impl Iterator<Item = &'a Product> + 'a
    where
        F: Fn(&Product) -> bool + 'a,
    {
        self.products.iter().filter(move |&p| filter(p))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lines of a catalog file that carry data, paired with their 1-based line number
pub struct RelevantLines<B> {
    lines: Lines<B>,
    line_no: usize,
}

impl<B: BufRead> Iterator for RelevantLines<B> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(Ok((self.line_no, line)));
        }
    }
}

pub fn relevant_lines<B: BufRead>(reader: B) -> RelevantLines<B> {
    RelevantLines {
        lines: reader.lines(),
        line_no: 0,
    }
}

/// Build a catalog from any buffered reader
pub fn read_catalog<B: BufRead>(reader: B) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    for entry in relevant_lines(reader) {
        let (line, text) = entry?;
        let product = Product::from_csv(&text).map_err(|e| match e {
            CatalogError::InvalidAttribute(message) => CatalogError::Parse { line, message },
            other => other,
        })?;
        catalog.append(product)?;
    }
    Ok(catalog)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let catalog = read_catalog(BufReader::new(File::open(path)?))?;
    debug!("loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}
