//! Client-side catalog filtering.
//!
//! A listing is fetched once per navigation and then narrowed in memory:
//! category AND price range AND text search, recomputed on every change.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest accepted price.
    pub min: Money,
    /// Highest accepted price.
    pub max: Money,
}

impl PriceRange {
    /// Create a range from two bounds.
    pub fn new(min: Money, max: Money) -> Self {
        Self { min, max }
    }

    /// Range spanning whole-dollar bounds.
    pub const fn dollars(min: i64, max: i64) -> Self {
        Self {
            min: Money::from_dollars(min),
            max: Money::from_dollars(max),
        }
    }

    /// Check whether `price` falls inside the range (both ends inclusive).
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    /// The unfiltered range, $0 to $1000.
    fn default() -> Self {
        PriceRange::dollars(0, 1000)
    }
}

/// A labelled price bucket from the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBucket {
    /// Label shown to the shopper.
    pub label: &'static str,
    /// Covered range.
    pub range: PriceRange,
}

/// The standard price buckets.
pub const PRICE_BUCKETS: &[PriceBucket] = &[
    PriceBucket {
        label: "Under $25",
        range: PriceRange::dollars(0, 25),
    },
    PriceBucket {
        label: "$25 - $50",
        range: PriceRange::dollars(25, 50),
    },
    PriceBucket {
        label: "$50 - $100",
        range: PriceRange::dollars(50, 100),
    },
    PriceBucket {
        label: "$100 - $200",
        range: PriceRange::dollars(100, 200),
    },
    PriceBucket {
        label: "Over $200",
        range: PriceRange::dollars(200, 1000),
    },
];

/// Where a listing page gets its products from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// `GET /products/search?q=`
    Search(String),
    /// `GET /products/category/:category`
    Category(String),
    /// `GET /products`
    All,
}

impl ListingSource {
    /// Pick the fetch for a navigation: a search term wins over a category.
    pub fn for_navigation(search: Option<&str>, category: Option<&str>) -> Self {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        if let Some(term) = non_empty(search) {
            ListingSource::Search(term.to_string())
        } else if let Some(category) = non_empty(category) {
            ListingSource::Category(category.to_string())
        } else {
            ListingSource::All
        }
    }
}

/// Filter state for a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Selected category slug.
    pub category: Option<String>,
    /// Selected price range.
    pub price: PriceRange,
    /// Search term.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Create an unfiltered view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.select_category(category);
        self
    }

    /// Select a price range.
    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = range;
        self
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    /// Select a category; the empty string or "all" clears it.
    pub fn select_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category = if category.is_empty() || category == "all" {
            None
        } else {
            Some(category)
        };
    }

    /// Select `category`, or clear the selection if it is already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if self.category.as_deref() == Some(category) {
            self.category = None;
        } else {
            self.select_category(category);
        }
    }

    /// Set the search term; an empty term disables text matching.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
    }

    /// Check whether a single product passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        if !self.price.contains(product.price) {
            return false;
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        true
    }

    /// Apply the filter, preserving the listing order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(1), "Classic Tee", Money::new(1999), "men")
                .with_description("Soft cotton t-shirt"),
            Product::new(ProductId::new(2), "Silk Blouse", Money::new(7900), "women")
                .with_description("Lightweight and breathable"),
            Product::new(ProductId::new(3), "Canvas Tote", Money::new(2500), "accessories")
                .with_description("Carries a COTTON lining"),
            Product::new(ProductId::new(4), "Wool Coat", Money::new(25000), "men")
                .with_description("Warm winter coat"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_unfiltered_returns_everything_in_order() {
        let products = catalog();
        assert_eq!(ids(&CatalogFilter::new().apply(&products)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_filter() {
        let products = catalog();
        let filter = CatalogFilter::new().with_category("men");
        assert_eq!(ids(&filter.apply(&products)), vec![1, 4]);
    }

    #[test]
    fn test_price_bucket_bounds_are_inclusive() {
        let products = catalog();
        let filter = CatalogFilter::new().with_price(PRICE_BUCKETS[1].range);
        // $25.00 is the lower edge of "$25 - $50"
        assert_eq!(ids(&filter.apply(&products)), vec![3]);

        let under_25 = CatalogFilter::new().with_price(PRICE_BUCKETS[0].range);
        assert_eq!(ids(&under_25.apply(&products)), vec![1, 3]);
    }

    #[test]
    fn test_text_search_is_case_insensitive_over_name_and_description() {
        let products = catalog();
        let filter = CatalogFilter::new().with_search("cotton");
        assert_eq!(ids(&filter.apply(&products)), vec![1, 3]);

        let by_name = CatalogFilter::new().with_search("COAT");
        assert_eq!(ids(&by_name.apply(&products)), vec![4]);
    }

    #[test]
    fn test_uncategorised_product_only_shows_unfiltered() {
        let mut products = catalog();
        products.push(Product::new(ProductId::new(5), "Gift Card", Money::new(5000), ""));
        assert_eq!(ids(&CatalogFilter::new().apply(&products)), vec![1, 2, 3, 4, 5]);
        let filter = CatalogFilter::new().with_category("men");
        assert_eq!(ids(&filter.apply(&products)), vec![1, 4]);
    }

    #[test]
    fn test_filters_intersect() {
        let products = catalog();
        let filter = CatalogFilter::new()
            .with_category("men")
            .with_price(PRICE_BUCKETS[0].range)
            .with_search("tee");
        assert_eq!(ids(&filter.apply(&products)), vec![1]);

        let none = CatalogFilter::new()
            .with_category("women")
            .with_search("tee");
        assert!(none.apply(&products).is_empty());
    }

    #[test]
    fn test_toggle_category_clears_when_reselected() {
        let mut filter = CatalogFilter::new();
        filter.toggle_category("men");
        assert_eq!(filter.category.as_deref(), Some("men"));
        filter.toggle_category("men");
        assert_eq!(filter.category, None);
        filter.toggle_category("all");
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_default_price_range_excludes_over_1000() {
        let products = vec![Product::new(
            ProductId::new(9),
            "Designer Bag",
            Money::new(150_000),
            "accessories",
        )];
        assert!(CatalogFilter::new().apply(&products).is_empty());
    }

    #[test]
    fn test_listing_source_precedence() {
        assert_eq!(
            ListingSource::for_navigation(Some("shirt"), Some("men")),
            ListingSource::Search("shirt".to_string())
        );
        assert_eq!(
            ListingSource::for_navigation(Some("  "), Some("men")),
            ListingSource::Category("men".to_string())
        );
        assert_eq!(ListingSource::for_navigation(None, None), ListingSource::All);
    }
}
