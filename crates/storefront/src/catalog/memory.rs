//! In-memory catalog backed by static data.

use std::collections::HashSet;
use std::future::{Future, ready};
use std::path::Path;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use neon_core::ProductId;

use super::query::{ProductPage, ProductQuery, ProductSort, run_query, sort_products};
use super::types::{CatalogData, Category, Collection, FeaturedCollectionProducts, Product};
use super::{BEST_SELLERS_COLLECTION, CatalogError, CatalogProvider};
use crate::config::StorefrontConfig;

/// Built-in catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Default products per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Catalog served from memory.
///
/// Cheaply cloneable; clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    data: Arc<CatalogData>,
    page_size: u32,
}

impl InMemoryCatalog {
    /// Wrap catalog data, rejecting duplicate product IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if two products share an ID.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &data.products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self {
            data: Arc::new(data),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Load the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture fails to parse.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse catalog data from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Parse catalog data from YAML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Yaml` on malformed input.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::new(serde_yaml::from_str(yaml)?)
    }

    /// Load catalog data from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension, or
    /// fails to parse.
    #[instrument]
    pub async fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> Result<Self, CatalogError> = match extension.as_str() {
            "json" => Self::from_json_str,
            "yaml" | "yml" => Self::from_yaml_str,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        let catalog = parse(&tokio::fs::read_to_string(path).await?)?;

        info!(products = catalog.data.products.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Load the catalog named by the configuration, falling back to the
    /// built-in data.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be loaded.
    pub async fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Self::from_path(path).await?,
            None => Self::builtin()?,
        };
        Ok(catalog.with_page_size(config.page_size))
    }

    /// Override the default listing page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    fn shuffled<'a>(products: impl Iterator<Item = &'a Product>, limit: usize) -> Vec<Product> {
        let mut picked: Vec<&Product> = products.collect();
        picked.shuffle(&mut rand::rng());
        picked.into_iter().take(limit).cloned().collect()
    }
}

impl CatalogProvider for InMemoryCatalog {
    #[instrument(skip(self))]
    fn filtered_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<ProductPage, CatalogError>> + Send {
        let page = run_query(&self.data.products, query, self.page_size);
        debug!(total = page.total, page = page.page, "Filtered products");
        ready(Ok(page))
    }

    fn product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send {
        ready(Ok(self.data.product(id).cloned()))
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    fn related_products(
        &self,
        id: &ProductId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let related = self.data.product(id).map_or_else(Vec::new, |product| {
            Self::shuffled(
                self.data.products.iter().filter(|p| {
                    p.id != product.id
                        && (p.category == product.category || p.shares_tag_with(product))
                }),
                limit,
            )
        });
        ready(Ok(related))
    }

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, CatalogError>> + Send {
        ready(Ok(self.data.categories.clone()))
    }

    fn collections(&self) -> impl Future<Output = Result<Vec<Collection>, CatalogError>> + Send {
        ready(Ok(self.data.collections.clone()))
    }

    fn featured_collections(
        &self,
    ) -> impl Future<Output = Result<Vec<FeaturedCollectionProducts>, CatalogError>> + Send {
        let resolved = self
            .data
            .featured_collections
            .iter()
            .map(|collection| FeaturedCollectionProducts {
                id: collection.id.clone(),
                name: collection.name.clone(),
                slug: collection.slug.clone(),
                image: collection.image.clone(),
                products: collection
                    .products
                    .iter()
                    .filter_map(|id| self.data.product(id).cloned())
                    .collect(),
            })
            .collect();
        ready(Ok(resolved))
    }

    fn new_arrivals(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        ready(Ok(Self::shuffled(
            self.data.products.iter().filter(|p| p.is_new),
            limit,
        )))
    }

    fn best_sellers(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let mut picked: Vec<&Product> = self
            .data
            .products
            .iter()
            .filter(|p| p.in_collection(BEST_SELLERS_COLLECTION))
            .collect();
        sort_products(&mut picked, ProductSort::Popular);
        ready(Ok(picked.into_iter().take(limit).cloned().collect()))
    }

    fn featured_products(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        ready(Ok(Self::shuffled(
            self.data.products.iter().filter(|p| p.is_featured),
            limit,
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        assert_eq!(catalog.data().products.len(), 12);
        assert_eq!(catalog.data().categories.len(), 4);
        assert_eq!(catalog.data().collections.len(), 4);
        assert_eq!(catalog.data().featured_collections.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut data = InMemoryCatalog::builtin().unwrap().data().clone();
        let copy = data.products[0].clone();
        data.products.push(copy);

        assert!(matches!(
            InMemoryCatalog::new(data),
            Err(CatalogError::DuplicateProduct(_))
        ));
    }

    #[test]
    fn test_yaml_catalog() {
        let yaml = r"
products:
  - id: lamp
    name: Lamp
    description: A lamp
    price: { amount: '10.00', currency_code: USD }
    images: []
    category: home
    rating: 4.0
    review_count: 1
    stock: 3
    created_at: 2023-10-01T00:00:00Z
";
        let catalog = InMemoryCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.data().products.len(), 1);
        assert!(catalog.data().categories.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let result = InMemoryCatalog::from_path(Path::new("catalog.toml")).await;
        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_from_path_json() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.json");
        let catalog = InMemoryCatalog::from_path(&path).await.unwrap();
        assert_eq!(catalog.data().products.len(), 12);
    }

    #[tokio::test]
    async fn test_from_config_applies_page_size() {
        let config = StorefrontConfig {
            page_size: 4,
            ..Default::default()
        };
        let catalog = InMemoryCatalog::from_config(&config).await.unwrap();
        let page = catalog
            .filtered_products(&ProductQuery::default())
            .await
            .unwrap();
        assert_eq!(page.limit, 4);
    }

    #[tokio::test]
    async fn test_filtered_products_uses_page_size() {
        let catalog = InMemoryCatalog::builtin().unwrap().with_page_size(5);
        let page = catalog
            .filtered_products(&ProductQuery::default())
            .await
            .unwrap();

        assert_eq!(page.products.len(), 5);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let hoodie = catalog.product(&id("prod_1")).await.unwrap().unwrap();
        assert_eq!(hoodie.name, "Neon Tech Hoodie");
        assert!(catalog.product(&id("prod_404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_related_products() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let source = catalog.product(&id("prod_1")).await.unwrap().unwrap();
        let related = catalog.related_products(&id("prod_1"), 4).await.unwrap();

        assert!(related.len() <= 4);
        assert!(!related.is_empty());
        for product in &related {
            assert_ne!(product.id, source.id);
            assert!(product.category == source.category || product.shares_tag_with(&source));
        }

        let unknown = catalog.related_products(&id("prod_404"), 4).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_best_sellers_by_rating() {
        let catalog = InMemoryCatalog::builtin().unwrap();
        let best = catalog.best_sellers(8).await.unwrap();

        let ids: Vec<&str> = best.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_2", "prod_3", "prod_10", "prod_5", "prod_8"]);
    }

    #[tokio::test]
    async fn test_flagged_listings() {
        let catalog = InMemoryCatalog::builtin().unwrap();

        let new = catalog.new_arrivals(8).await.unwrap();
        assert_eq!(new.len(), 6);
        assert!(new.iter().all(|p| p.is_new));

        let featured = catalog.featured_products(4).await.unwrap();
        assert_eq!(featured.len(), 4);
        assert!(featured.iter().all(|p| p.is_featured));
    }

    #[tokio::test]
    async fn test_featured_collections_drop_unknown_ids() {
        let mut data = InMemoryCatalog::builtin().unwrap().data().clone();
        data.featured_collections[0].products.push(id("prod_404"));
        let catalog = InMemoryCatalog::new(data).unwrap();

        let collections = catalog.featured_collections().await.unwrap();
        assert_eq!(collections[0].slug, "new-season-essentials");
        assert_eq!(collections[0].products.len(), 4);
    }
}
