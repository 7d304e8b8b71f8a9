//! Product listing queries: filtering, sorting and pagination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Product;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently created first.
    Newest,
    /// Highest rated first.
    Popular,
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" | "price-asc" => Ok(Self::PriceAsc),
            "price_desc" | "price-desc" => Ok(Self::PriceDesc),
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filters and paging for a product listing.
///
/// Every filter is optional; an empty query lists the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    /// Category slug.
    pub category: Option<String>,
    /// Collection slug.
    pub collection: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Keep products offered in any of these colors.
    pub colors: Vec<String>,
    /// Keep products offered in any of these sizes.
    pub sizes: Vec<String>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
    /// 1-based page number; 0 is treated as 1.
    pub page: Option<u32>,
    /// Page size; 0 falls back to the catalog default.
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Whether `product` passes every filter in this query.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| &product.category != category)
        {
            return false;
        }

        if self
            .collection
            .as_ref()
            .is_some_and(|collection| !product.in_collection(collection))
        {
            return false;
        }

        if self.min_price.is_some_and(|min| product.price.amount < min) {
            return false;
        }

        if self.max_price.is_some_and(|max| product.price.amount > max) {
            return false;
        }

        if !self.colors.is_empty() && !self.colors.iter().any(|c| product.offers_color(c)) {
            return false;
        }

        if !self.sizes.is_empty() && !self.sizes.iter().any(|s| product.offers_size(s)) {
            return false;
        }

        self.search.as_ref().is_none_or(|search| {
            let needle = search.to_lowercase();
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Number of products matching the filters, across all pages.
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl ProductPage {
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Run `query` over `products`.
///
/// Filters apply first, then the sort (stable, so ties keep catalog order),
/// then pagination.
#[must_use]
pub fn run_query(products: &[Product], query: &ProductQuery, default_limit: u32) -> ProductPage {
    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();

    if let Some(sort) = query.sort {
        sort_products(&mut matched, sort);
    }

    let page = query.page.filter(|&p| p > 0).unwrap_or(1);
    let limit = query
        .limit
        .filter(|&l| l > 0)
        .unwrap_or_else(|| default_limit.max(1));

    let total = matched.len();
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let total_pages = u32::try_from(total.div_ceil(limit as usize)).unwrap_or(u32::MAX);

    ProductPage {
        products: matched
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect(),
        total,
        page,
        limit,
        total_pages,
    }
}

/// Sort in place by the given order.
pub fn sort_products(products: &mut [&Product], sort: ProductSort) {
    match sort {
        ProductSort::PriceAsc => products.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        ProductSort::PriceDesc => products.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
        ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ProductSort::Popular => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}
