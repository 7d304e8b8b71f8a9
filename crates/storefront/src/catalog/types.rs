//! Domain types for the product catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use neon_core::{CategoryId, CollectionId, Price, ProductId};

// =============================================================================
// Product Types
// =============================================================================

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Current selling price.
    pub price: Price,
    /// Original price, shown struck through when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Price>,
    /// Image URLs, featured image first.
    pub images: Vec<String>,
    /// Category slug.
    pub category: String,
    /// Collection slugs.
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Offered colors; empty when the product has no color options.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Offered sizes; empty when the product has no size options.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Average review score out of 5.
    pub rating: f32,
    pub review_count: u32,
    /// Units available.
    pub stock: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The first image, used as the cart thumbnail.
    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the compare-at price exceeds the current price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare| compare.amount > self.price.amount)
    }

    #[must_use]
    pub fn in_collection(&self, slug: &str) -> bool {
        self.collections.iter().any(|c| c == slug)
    }

    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whether the two products share at least one tag.
    #[must_use]
    pub fn shares_tag_with(&self, other: &Self) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }
}

// =============================================================================
// Category & Collection Types
// =============================================================================

/// Top-level product category (e.g. "men", "electronics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
}

/// Merchandising collection (e.g. "best-sellers", "sale").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Homepage collection referencing products by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedCollection {
    pub id: CollectionId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub products: Vec<ProductId>,
}

/// Featured collection with its product IDs resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedCollectionProducts {
    pub id: CollectionId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub products: Vec<Product>,
}

/// Everything an in-memory catalog serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub featured_collections: Vec<FeaturedCollection>,
    pub products: Vec<Product>,
}

impl CatalogData {
    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use neon_core::CurrencyCode;

    use super::*;

    fn hoodie() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "prod_1",
            "name": "Neon Tech Hoodie",
            "description": "Oversized hoodie",
            "price": { "amount": "89.99", "currency_code": "USD" },
            "compare_at_price": { "amount": "119.99", "currency_code": "USD" },
            "images": ["a.jpg", "b.jpg"],
            "category": "men",
            "collections": ["new-arrivals"],
            "tags": ["hoodie", "casual"],
            "colors": ["black"],
            "sizes": ["S", "M"],
            "rating": 4.8,
            "review_count": 124,
            "stock": 43,
            "is_new": true,
            "created_at": "2023-10-15T08:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_optional_fields_default() {
        let product = hoodie();
        assert!(product.is_new);
        assert!(!product.is_featured);
        assert_eq!(product.price, Price::from_cents(8999, CurrencyCode::USD));
    }

    #[test]
    fn test_featured_image() {
        assert_eq!(hoodie().featured_image(), Some("a.jpg"));

        let mut bare = hoodie();
        bare.images.clear();
        assert_eq!(bare.featured_image(), None);
    }

    #[test]
    fn test_is_on_sale() {
        let mut product = hoodie();
        assert!(product.is_on_sale());

        product.compare_at_price = None;
        assert!(!product.is_on_sale());
    }

    #[test]
    fn test_variant_offers() {
        let product = hoodie();
        assert!(product.offers_size("M"));
        assert!(!product.offers_size("XXL"));
        assert!(product.offers_color("black"));
        assert!(!product.offers_color("pink"));
    }
}
