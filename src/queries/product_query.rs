//! Catalog search, filtering and ordering.
//!
//! `query` is a pure function of its two arguments: the caller hands in an
//! already-fetched product list and the filter state of the catalog view, and
//! gets back the subset to display in display order. Stages run in a fixed
//! order (search, category, stock status, sort) and every stage works on the
//! output of the previous one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, trace};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Product, StockStatus};

/// Category value the catalog view uses for "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Stock-status selector of the catalog view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StockStatusFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatusFilter {
    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StockStatusFilter::All => true,
            StockStatusFilter::InStock => status == StockStatus::InStock,
            StockStatusFilter::LowStock => status == StockStatus::Low,
            StockStatusFilter::OutOfStock => status == StockStatus::Out,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    Name,
    Sku,
    Stock,
    Price,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Orients a single comparison. Descending flips each pair's result,
    /// so equal keys stay in input order under a stable sort.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Filter state of the catalog view.
///
/// `sort_by == None` keeps the surviving products in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub search: String,
    pub category: String,
    pub stock_status: StockStatusFilter,
    pub sort_by: Option<SortKey>,
    pub sort_direction: SortDirection,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            stock_status: StockStatusFilter::All,
            sort_by: Some(SortKey::Name),
            sort_direction: SortDirection::Asc,
        }
    }
}

impl ProductFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock_status(mut self, stock_status: StockStatusFilter) -> Self {
        self.stock_status = stock_status;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key);
        self.sort_direction = direction;
        self
    }

    /// Column-header click: the active key while ascending flips to
    /// descending, anything else selects `key` ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort_direction = if self.sort_by == Some(key) && self.sort_direction == SortDirection::Asc
        {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.sort_by = Some(key);
    }

    fn category_constraint(&self) -> Option<&str> {
        match self.category.as_str() {
            "" | ALL_CATEGORIES => None,
            category => Some(category),
        }
    }
}

/// Untyped filter parameters as they arrive from form controls or the CLI.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductFilterParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock_status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl From<ProductFilterParams> for ProductFilter {
    /// Malformed values become "no constraint" instead of an error.
    fn from(params: ProductFilterParams) -> Self {
        let stock_status = match params.stock_status.as_deref() {
            None => StockStatusFilter::All,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(stock_status = %raw, "Ignoring unknown stock status selector");
                StockStatusFilter::All
            }),
        };

        let sort_by = match params.sort_by.as_deref() {
            None => Some(SortKey::Name),
            Some(raw) => match raw.parse() {
                Ok(key) => Some(key),
                Err(_) => {
                    debug!(sort_by = %raw, "Ignoring unknown sort key; keeping input order");
                    None
                }
            },
        };

        let sort_direction = match params.sort_direction.as_deref() {
            None => SortDirection::Asc,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(sort_direction = %raw, "Ignoring unknown sort direction");
                SortDirection::Asc
            }),
        };

        ProductFilter {
            search: params.search.unwrap_or_default(),
            category: params.category.unwrap_or_default(),
            stock_status,
            sort_by,
            sort_direction,
        }
    }
}

/// Runs the four catalog stages over `products`.
pub fn query(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let needle = filter.search.to_lowercase();
    let category = filter.category_constraint();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| contains_needle(product, &needle))
        .filter(|product| category.map_or(true, |c| product.category == c))
        .filter(|product| filter.stock_status.matches(product.stock_status()))
        .cloned()
        .collect();

    if let Some(key) = filter.sort_by {
        sort_stage(&mut result, key, filter.sort_direction);
    }

    trace!(
        input = products.len(),
        output = result.len(),
        "Product query evaluated"
    );
    result
}

/// True when `search` (lower-cased, untrimmed) is empty or occurs in the
/// lower-cased name, SKU or description.
pub fn matches_search(product: &Product, search: &str) -> bool {
    contains_needle(product, &search.to_lowercase())
}

fn contains_needle(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.sku.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Stable in-place sort by `key`.
pub fn sort_stage(products: &mut [Product], key: SortKey, direction: SortDirection) {
    products.sort_by(|a, b| direction.apply(compare_by(key, a, b)));
}

/// Ascending comparison of two products on one key.
pub fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => locale_compare(&a.name, &b.name),
        SortKey::Sku => locale_compare(&a.sku, &b.sku),
        SortKey::Stock => a.stock_quantity.cmp(&b.stock_quantity),
        SortKey::Price => a.price.cmp(&b.price),
    }
}

/// Root-collation order of ASCII punctuation and symbols. Everything here
/// sorts after whitespace and before digits.
const ASCII_VARIABLE_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// One collation element per folded character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CollationElement {
    primary: (u8, u32),
    secondary: u32,
    tertiary: u8,
}

/// Collation used for names and SKUs in the catalog table.
///
/// Three levels, each decided over the whole string before the next is
/// consulted:
/// 1. base characters: whitespace < punctuation < symbols < digits <
///    letters, letters compared case-insensitively without accents;
/// 2. accents, unaccented first;
/// 3. case, lower case first.
///
/// Digits compare one at a time (`"SKU-10" < "SKU-9"`).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let a = collation_elements(a);
    let b = collation_elements(b);

    a.iter()
        .map(|e| e.primary)
        .cmp(b.iter().map(|e| e.primary))
        .then_with(|| a.iter().map(|e| e.secondary).cmp(b.iter().map(|e| e.secondary)))
        .then_with(|| a.iter().map(|e| e.tertiary).cmp(b.iter().map(|e| e.tertiary)))
}

fn collation_elements(s: &str) -> Vec<CollationElement> {
    let mut elements: Vec<CollationElement> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = elements.last_mut() {
                if last.secondary == 0 {
                    last.secondary = u32::from(c);
                }
                continue;
            }
        }

        let tertiary = u8::from(c.is_uppercase());
        elements.extend(c.to_lowercase().map(|folded| CollationElement {
            primary: primary_weight(folded),
            secondary: 0,
            tertiary,
        }));
    }
    elements
}

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, u32::from(c))
    } else if let Some(position) = ASCII_VARIABLE_ORDER.find(c) {
        (1, position as u32)
    } else if let Some(digit) = c.to_digit(10) {
        (3, digit)
    } else if c.is_alphanumeric() {
        (4, u32::from(c))
    } else {
        (2, u32::from(c))
    }
}
